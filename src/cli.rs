//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行参数。帧数是唯一可调的选项，
//! 其余参数只决定输入文件与输出位置。

use crate::constants::{DEFAULT_FRAME_COUNT, DEFAULT_OUTPUT_DIR};
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser};
use std::path::PathBuf;

/// 读取一张 24 位 BMP 图像，通过反复灰度化与垂直翻转派生出一组帧，并逐帧写出为 BMP 文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "读取一张 24 位未压缩 BMP 图像，第一帧为原图，之后每一帧都由前一帧灰度化再垂直翻转得到，所有帧以 frame_001.bmp、frame_002.bmp …… 的形式写入输出目录。"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: GenerateArgs,
}

/// 生成帧序列所需的参数。
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// 源 BMP 图像路径 (24 位、未压缩)。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 输出目录，不存在时自动创建，已有的同名帧文件会被覆盖。
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// 生成的帧数 (至少为 1)。
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_FRAME_COUNT,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub count: usize,
}
