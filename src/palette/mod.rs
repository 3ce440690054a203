//! 调色板数据模型

pub mod color;
pub mod entry;

pub use color::Color;
pub use entry::{AcoPalette, ColorEntry};
