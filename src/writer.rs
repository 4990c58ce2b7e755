//! # 帧写出模块
//!
//! 将每一帧用源文件的前导数据重新编码，依次写入输出目录，每帧一个文件。

use crate::codec::{Preamble, encode};
use crate::error::Result;
use crate::pixel::Frame;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 第 `index` 帧 (从 0 开始) 的文件名，编号从 1 开始，例如 `frame_001.bmp`。
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:03}.bmp", index + 1)
}

/// 把所有帧写入 `output_dir`，返回按顺序写出的文件路径。
///
/// 目录不存在时会被创建，已存在不算错误。同名文件会被覆盖。
///
/// # Errors
///
/// 目录无法创建、某个文件无法写入或某帧与前导数据不匹配时立即返回，
/// 剩余的帧不再写出，已写出的文件保留。
pub fn write_all<'a>(
    preamble: &Preamble,
    frames: impl IntoIterator<Item = &'a Frame>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    frames
        .into_iter()
        .enumerate()
        .map(|(i, frame)| -> Result<PathBuf> {
            let path = output_dir.join(frame_file_name(i));
            fs::write(&path, encode(preamble, frame)?)?;
            debug!(path = %path.display(), "wrote frame");
            Ok(path)
        })
        .collect()
}
