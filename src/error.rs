//! 错误类型定义

use thiserror::Error;

/// 调色板转换错误类型
///
/// 流开头的正常结束不属于错误，由 `Ok(None)` 表示。
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("输入意外结束")]
    UnexpectedEof,

    #[error("未知的 ACO 版本: {0}")]
    UnsupportedVersion(u16),
}

impl PaletteError {
    /// 将读取过程中的 IO 错误归类，短读视为截断
    pub fn from_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            PaletteError::UnexpectedEof
        } else {
            PaletteError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, PaletteError>;
