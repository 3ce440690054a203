//! aco2gpl - Photoshop 色板 (.aco) 转 GIMP 调色板 (.gpl)
//!
//! 从标准输入（或指定文件）读取一个或多个拼接的 ACO 文档，
//! 将最后一个成功解码的文档以 GPL 文本写到标准输出。
//! 诊断信息全部写到标准错误。

#![warn(missing_docs)]
#![allow(dead_code)]

mod error;
mod formats;
mod palette;

use anyhow::{Context, bail};
use formats::GplWriter;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// 应用程序名称
pub const APP_NAME: &str = "aco2gpl";

/// 应用程序版本（从 Cargo.toml 读取）
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let _guard = init_logging();

    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// 初始化日志，输出到标准错误，级别由 RUST_LOG 控制
fn init_logging() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .init();

    guard
}

/// 解析命令行参数并执行转换
fn run(args: Vec<String>) -> anyhow::Result<()> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", APP_NAME, APP_VERSION);
        return Ok(());
    }

    if let Some(flag) = args.iter().find(|a| a.starts_with('-') && a.as_str() != "-") {
        bail!("未知选项: {}", flag);
    }

    let files: Vec<&String> = args.iter().collect();
    if files.len() > 1 {
        bail!("只能指定一个输入文件");
    }

    let input: Box<dyn Read> = match files.first().map(|s| s.as_str()) {
        Some(path) if path != "-" => {
            info!("输入文件: {}", path);
            let file =
                File::open(path).with_context(|| format!("无法打开输入文件: {}", path))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };

    convert(input, io::stdout().lock()).context("ACO 转换失败")?;
    Ok(())
}

fn print_usage() {
    eprintln!("使用方法:");
    eprintln!("  {} [选项] [输入文件] > palette.gpl", APP_NAME);
    eprintln!();
    eprintln!("未指定输入文件或为 \"-\" 时从标准输入读取。");
    eprintln!();
    eprintln!("选项:");
    eprintln!("  --help, -h       显示帮助信息");
    eprintln!("  --version, -V    显示版本");
    eprintln!();
    eprintln!("环境变量:");
    eprintln!("  RUST_LOG         日志级别 (默认 info)");
}

/// 读取输入中的所有 ACO 文档，将最后一个写为 GPL
///
/// 返回是否输出了调色板；没有任何文档时只记录警告。
fn convert<R: Read, W: Write>(input: R, output: W) -> error::Result<bool> {
    let palette = formats::read_last_palette(input)?;

    info!("生成 GPL...");
    let written = match palette {
        Some(palette) => {
            if palette.skipped_count() > 0 {
                info!("共跳过 {} 个非 RGB 颜色", palette.skipped_count());
            }
            GplWriter::new().write_to(&palette, output)?;
            true
        }
        None => {
            warn!("没有数据!");
            false
        }
    };
    info!("完成.");

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaletteError;
    use crate::formats::aco::tests::AcoBuilder;
    use std::io::Cursor;

    fn run_convert(bytes: Vec<u8>) -> (error::Result<bool>, String) {
        let mut out = Vec::new();
        let result = convert(Cursor::new(bytes), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_app_info() {
        assert_eq!(APP_NAME, "aco2gpl");
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let (result, out) = run_convert(Vec::new());
        assert!(!result.unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn test_header_only_output() {
        let (result, out) = run_convert(vec![0x00, 0x01, 0x00, 0x00]);
        assert!(result.unwrap());
        assert_eq!(out, "GIMP Palette\nName: Untitled\nColumns: 16\n#");
    }

    #[test]
    fn test_only_last_document_emitted() {
        let mut bytes = AcoBuilder::new(1, 3)
            .rgb_v1(0x0A00, 0x0B00, 0x0C00)
            .rgb_v1(0x0D00, 0x0E00, 0x0F00)
            .rgb_v1(0x1000, 0x1100, 0x1200)
            .build();
        bytes.extend(AcoBuilder::new(1, 1).rgb_v1(0xFFFF, 0x8000, 0x0000).build());

        let (result, out) = run_convert(bytes);
        assert!(result.unwrap());
        assert_eq!(
            out,
            "GIMP Palette\nName: Untitled\nColumns: 16\n#\n255 128 0 (null)"
        );
        assert!(!out.contains("10 11 12"));
    }

    #[test]
    fn test_truncated_input_writes_nothing() {
        let bytes = AcoBuilder::new(1, 5)
            .rgb_v1(0, 0, 0)
            .rgb_v1(0, 0, 0)
            .build();
        let (result, out) = run_convert(bytes);
        assert!(matches!(result, Err(PaletteError::UnexpectedEof)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_version_writes_nothing() {
        let (result, out) = run_convert(AcoBuilder::new(5, 0).build());
        assert!(matches!(result, Err(PaletteError::UnsupportedVersion(5))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_channels_survive_widening() {
        let colors = [(0u8, 0u8, 0u8), (255, 255, 255), (12, 200, 99), (1, 2, 254)];
        let mut builder = AcoBuilder::new(2, colors.len() as u16);
        for (i, (r, g, b)) in colors.iter().enumerate() {
            // 低字节填充任意值，截断后应被丢弃
            let low = (i as u16 * 37) & 0xFF;
            builder.rgb_v2(
                *r as u16 * 256 + low,
                *g as u16 * 256 + low,
                *b as u16 * 256 + low,
                &[0x0063],
            );
        }

        let (result, out) = run_convert(builder.build());
        assert!(result.unwrap());
        let rows: Vec<&str> = out.lines().skip(4).collect();
        let expected: Vec<String> = colors
            .iter()
            .map(|(r, g, b)| format!("{} {} {} c", r, g, b))
            .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_skipped_colors_not_emitted() {
        let bytes = AcoBuilder::new(2, 3)
            .foreign_v2(1, &[0x0041, 0x0000])
            .rgb_v2(0x2000, 0x4000, 0x6000, &[0x0047, 0x4E2D])
            .foreign_v2(8, &[])
            .build();
        let (result, out) = run_convert(bytes);
        assert!(result.unwrap());
        assert!(out.ends_with("#\n32 64 96 G "));
    }

    #[test]
    fn test_latin1_name_written_as_utf8() {
        let bytes = AcoBuilder::new(2, 1).rgb_v2(0, 0, 0, &[0x0063, 0x00E9]).build();
        let (result, out) = run_convert(bytes);
        assert!(result.unwrap());
        assert!(out.ends_with("\n0 0 0 cé"));
        // é 为两个 UTF-8 字节，而非单个 0xE9
        assert!(out.as_bytes().ends_with(&[b'c', 0xC3, 0xA9]));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(run(vec!["--bogus".to_string()]).is_err());
    }

    #[test]
    fn test_two_files_rejected() {
        assert!(run(vec!["a.aco".to_string(), "b.aco".to_string()]).is_err());
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = run(vec!["/nonexistent/palette.aco".to_string()]).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/palette.aco"));
    }
}
