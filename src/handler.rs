//! # 命令处理逻辑模块
//!
//! 协调解码、帧序列构建与逐帧写出，并向用户报告结果。

use crate::cli::GenerateArgs;
use crate::codec::decode;
use crate::sequence::FrameSequence;
use crate::writer::write_all;
use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

/// 处理帧生成的执行逻辑。
///
/// 读取源 BMP 文件，构建 `args.count` 帧，然后用源文件的前导数据把每一帧写入输出目录。
/// 输出目录中已有的同名帧文件会被直接覆盖，因此重复运行的结果相同。
///
/// # Arguments
///
/// * `args` - 包含输入路径、输出目录与帧数的 `GenerateArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取源文件，或源文件不是受支持的 24 位未压缩 BMP。
/// * 无法创建输出目录或写入某个帧文件。此时之前写出的文件保留。
pub fn handle_generate(args: GenerateArgs) -> Result<()> {
    let source = decode(&args.input).with_context(|| {
        format!(
            "Unable to decode BMP file: {}",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    let frame = source.frame().with_context(|| {
        format!(
            "Pixel data in '{}' does not match its declared dimensions.",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    info!(
        width = frame.width(),
        height = frame.height(),
        count = args.count,
        "building frame sequence"
    );
    let sequence = FrameSequence::build(frame, args.count);

    let written = write_all(&source.preamble, sequence.iter(), &args.output).with_context(|| {
        format!(
            "Failed to write frames to: {}",
            args.output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} frames have been written to: {}",
        written.len().to_string().green().bold(),
        args.output.to_string_lossy().green().bold()
    );

    Ok(())
}
