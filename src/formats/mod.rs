//! 色板文件格式模块

pub mod aco;
pub mod gpl;

pub use aco::{AcoDecoder, AcoVersion};
pub use gpl::GplWriter;

use crate::error::Result;
use crate::palette::AcoPalette;
use std::io::Read;
use tracing::debug;

/// 多文档 ACO 流读取器
///
/// 同一输入中可以依次拼接多个 ACO 文档，只有最后一个有意义。
pub struct AcoStreamReader<R> {
    decoder: AcoDecoder<R>,
    documents: usize,
}

impl<R: Read> AcoStreamReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            decoder: AcoDecoder::new(reader),
            documents: 0,
        }
    }

    /// 读取下一个文档，流结束时返回 None
    pub fn next_palette(&mut self) -> Result<Option<AcoPalette>> {
        let palette = self.decoder.decode()?;
        if palette.is_some() {
            self.documents += 1;
            debug!("已解码第 {} 个文档", self.documents);
        }
        Ok(palette)
    }

    /// 读取到流结束，返回最后一个成功解码的文档
    pub fn read_last(mut self) -> Result<Option<AcoPalette>> {
        let mut last = None;
        while let Some(palette) = self.next_palette()? {
            last = Some(palette);
        }
        Ok(last)
    }

    /// 已解码的文档数量
    pub fn documents(&self) -> usize {
        self.documents
    }
}

/// 从输入中读取最后一个 ACO 文档
pub fn read_last_palette<R: Read>(reader: R) -> Result<Option<AcoPalette>> {
    AcoStreamReader::new(reader).read_last()
}
