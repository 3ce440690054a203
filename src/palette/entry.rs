//! 调色板条目与解码结果

use super::Color;
use crate::formats::aco::AcoVersion;

/// 单个色板条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    /// 颜色值
    pub color: Color,
    /// 颜色名称，版本 1 或无名称数据时为 None
    pub name: Option<String>,
}

impl ColorEntry {
    /// 创建无名称条目
    pub fn new(color: Color) -> Self {
        Self { color, name: None }
    }

    /// 创建带名称条目，空名称视为无名称
    pub fn with_name(color: Color, name: String) -> Self {
        let name = if name.is_empty() { None } else { Some(name) };
        Self { color, name }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.color.r, self.color.g, self.color.b)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// 一个完整解码的 ACO 文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcoPalette {
    /// 文件版本
    pub version: AcoVersion,
    /// 头部声明的颜色数量
    pub declared_count: u16,
    /// 按流中顺序保存的 RGB 条目（非 RGB 条目已跳过）
    pub entries: Vec<ColorEntry>,
}

impl AcoPalette {
    pub fn new(version: AcoVersion, declared_count: u16, entries: Vec<ColorEntry>) -> Self {
        Self {
            version,
            declared_count,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 被跳过的非 RGB 条目数量
    pub fn skipped_count(&self) -> usize {
        (self.declared_count as usize).saturating_sub(self.entries.len())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AcoPalette {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
