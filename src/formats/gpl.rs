//! GIMP 调色板 (.gpl) 文本输出

use crate::error::Result;
use crate::palette::{AcoPalette, ColorEntry};
use std::io::Write;

/// GPL 文本生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct GplWriter;

impl GplWriter {
    pub const NAME: &'static str = "Untitled";
    pub const COLUMNS: u32 = 16;
    /// 无名称条目的输出，与 C 版 printf 打印空指针的结果一致
    pub const MISSING_NAME: &'static str = "(null)";

    pub fn new() -> Self {
        Self
    }

    /// 生成完整的 GPL 文本
    ///
    /// 头部以 "#" 结束，每个条目前置换行，末尾不追加换行。
    pub fn format(&self, palette: &AcoPalette) -> String {
        let mut text = format!(
            "GIMP Palette\nName: {}\nColumns: {}\n#",
            Self::NAME,
            Self::COLUMNS
        );
        for entry in palette {
            text.push('\n');
            text.push_str(&self.format_row(entry));
        }
        text
    }

    /// 格式化单行 "r g b name"
    pub fn format_row(&self, entry: &ColorEntry) -> String {
        let name = entry.name().unwrap_or(Self::MISSING_NAME);
        format!("{} {} {} {}", entry.color.r, entry.color.g, entry.color.b, name)
    }

    /// 写入到输出流
    pub fn write_to<W: Write>(&self, palette: &AcoPalette, mut writer: W) -> Result<()> {
        writer.write_all(self.format(palette).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
