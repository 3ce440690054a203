//! ACO 格式解析 (Photoshop 色板文件)
//! 支持版本 1 (Photoshop < 7.0) 与版本 2 (Photoshop >= 7.0)，所有字段均为大端 16 位

use crate::error::{PaletteError, Result};
use crate::palette::{AcoPalette, Color, ColorEntry};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{ErrorKind, Read};
use tracing::{debug, info, warn};

/// 颜色名称的最大可见长度
pub const MAX_NAME_LEN: usize = 255;

/// ACO 文件版本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcoVersion {
    /// 版本 1，无颜色名称
    V1,
    /// 版本 2，每个颜色带 UTF-16 名称
    V2,
}

impl AcoVersion {
    /// 从文件头的版本字识别版本
    pub fn from_word(word: u16) -> Result<Self> {
        match word {
            1 => Ok(AcoVersion::V1),
            2 => Ok(AcoVersion::V2),
            other => Err(PaletteError::UnsupportedVersion(other)),
        }
    }

    /// 获取版本说明
    pub fn description(&self) -> &str {
        match self {
            AcoVersion::V1 => "1 (photoshop < 7.0)",
            AcoVersion::V2 => "2 (photoshop >= 7.0)",
        }
    }

    /// 记录中是否带有名称字段
    pub fn has_names(&self) -> bool {
        matches!(self, AcoVersion::V2)
    }
}

/// 颜色空间标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Rgb,
    Hsb,
    Cmyk,
    Lab,
    Grayscale,
    WideCmyk,
    Other(u16),
}

impl ColorSpace {
    pub fn from_tag(tag: u16) -> Self {
        match tag {
            0 => ColorSpace::Rgb,
            1 => ColorSpace::Hsb,
            2 => ColorSpace::Cmyk,
            7 => ColorSpace::Lab,
            8 => ColorSpace::Grayscale,
            9 => ColorSpace::WideCmyk,
            other => ColorSpace::Other(other),
        }
    }

    pub fn tag(&self) -> u16 {
        match self {
            ColorSpace::Rgb => 0,
            ColorSpace::Hsb => 1,
            ColorSpace::Cmyk => 2,
            ColorSpace::Lab => 7,
            ColorSpace::Grayscale => 8,
            ColorSpace::WideCmyk => 9,
            ColorSpace::Other(tag) => *tag,
        }
    }

    /// 获取颜色空间名称
    pub fn name(&self) -> &str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Hsb => "HSB",
            ColorSpace::Cmyk => "CMYK",
            ColorSpace::Lab => "Lab",
            ColorSpace::Grayscale => "Grayscale",
            ColorSpace::WideCmyk => "Wide CMYK",
            ColorSpace::Other(_) => "unknown",
        }
    }
}

/// 大端 16 位字读取器，不做额外缓冲
pub struct WordReader<R> {
    inner: R,
}

impl<R: Read> WordReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// 读取一个必需的字，短读视为截断
    pub fn read_word(&mut self) -> Result<u16> {
        self.inner
            .read_u16::<BigEndian>()
            .map_err(PaletteError::from_read)
    }

    /// 读取文档开头的字
    ///
    /// 没有任何剩余字节时返回 `Ok(None)`；只剩半个字时视为截断。
    pub fn read_leading_word(&mut self) -> Result<Option<u16>> {
        let mut high = [0u8; 1];
        loop {
            match self.inner.read(&mut high) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let low = self.inner.read_u8().map_err(PaletteError::from_read)?;
        Ok(Some(u16::from_be_bytes([high[0], low])))
    }

    /// 读取并丢弃若干个字
    pub fn skip_words(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.read_word()?;
        }
        Ok(())
    }
}

/// ACO 文档解码器
pub struct AcoDecoder<R> {
    words: WordReader<R>,
}

impl<R: Read> AcoDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            words: WordReader::new(reader),
        }
    }

    /// 解码下一个文档
    ///
    /// 流在文档边界处结束时返回 `Ok(None)`，其余任何缺失字节都是错误。
    pub fn decode(&mut self) -> Result<Option<AcoPalette>> {
        let version_word = match self.words.read_leading_word()? {
            Some(word) => word,
            None => return Ok(None),
        };
        let version = AcoVersion::from_word(version_word)?;
        info!("读取 ACO 流版本: {}", version.description());

        let declared_count = self.words.read_word()?;
        info!("文件包含 {} 个颜色", declared_count);

        let mut entries = Vec::with_capacity(declared_count as usize);
        for index in 0..declared_count {
            if let Some(entry) = self.read_record(version)? {
                debug!("颜色 {}: {} {:?}", index, entry.color, entry.name);
                entries.push(entry);
            }
        }

        Ok(Some(AcoPalette::new(version, declared_count, entries)))
    }

    /// 读取一条颜色记录，非 RGB 记录被完整消费后返回 None
    fn read_record(&mut self, version: AcoVersion) -> Result<Option<ColorEntry>> {
        let space = ColorSpace::from_tag(self.words.read_word()?);

        if space != ColorSpace::Rgb {
            self.words.skip_words(4)?;
            if version.has_names() {
                self.words.skip_words(1)?;
                let name_len = self.words.read_word()?;
                self.words.skip_words(name_len as usize)?;
            }
            warn!("跳过非 RGB 颜色 (colorspace {} {})", space.tag(), space.name());
            return Ok(None);
        }

        let r = self.words.read_word()?;
        let g = self.words.read_word()?;
        let b = self.words.read_word()?;
        // 第四通道，RGB 不使用
        self.words.skip_words(1)?;
        let color = Color::from_channels16(r, g, b);

        if !version.has_names() {
            return Ok(Some(ColorEntry::new(color)));
        }

        // 保留字
        self.words.skip_words(1)?;
        let name = self.read_name()?;
        Ok(Some(ColorEntry::with_name(color, name)))
    }

    /// 读取版本 2 的颜色名称
    ///
    /// 声明长度包含结尾的 0 字；超出容量的代码单元仍会被读取。
    fn read_name(&mut self) -> Result<String> {
        let units = self.words.read_word()?.saturating_sub(1);

        let mut name = String::new();
        let mut visible = 0usize;
        let mut terminated = false;
        for _ in 0..units {
            let unit = self.words.read_word()?;
            if terminated || visible >= MAX_NAME_LEN {
                continue;
            }
            match name_char(unit) {
                '\0' => terminated = true,
                ch => {
                    name.push(ch);
                    visible += 1;
                }
            }
        }

        self.words.skip_words(1)?;
        Ok(name)
    }
}

/// 将 UTF-16 代码单元转为单个字符，超过一个字节的替换为空格
///
/// 0x80..=0xFF 按 Latin-1 转为对应的 Unicode 字符，输出时占两个 UTF-8 字节，
/// 而不是 C 版直接写出的单个原始字节。
pub fn name_char(unit: u16) -> char {
    if unit > 0xFF {
        ' '
    } else {
        char::from(unit as u8)
    }
}
