//! RGB 颜色定义

/// 8 位 RGB 颜色结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 从 16 位通道创建颜色，每个通道整除 256（截断，不四舍五入）
    pub fn from_channels16(r: u16, g: u16, b: u16) -> Self {
        Self {
            r: narrow_channel(r),
            g: narrow_channel(g),
            b: narrow_channel(b),
        }
    }
}

/// 16 位通道转 8 位
pub fn narrow_channel(value: u16) -> u8 {
    (value / 256) as u8
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color(#{:02X}{:02X}{:02X})", self.r, self.g, self.b)
    }
}
