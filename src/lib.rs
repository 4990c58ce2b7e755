//! # bmp_frames 库
//!
//! 本库包含 BMP 编解码、像素变换、帧序列构建与帧写出的核心逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod handler;
pub mod pixel;
pub mod sequence;
pub mod writer;

pub use error::{BmpError, Result};
