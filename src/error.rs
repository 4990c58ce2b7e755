//! # 错误类型模块
//!
//! 库层统一使用 [`BmpError`]，分为两类：I/O 错误与格式错误。
//! 应用层 (`handler`) 再用 `anyhow` 附加上下文信息。

use std::io;

/// BMP 编解码与帧写出过程中可能出现的错误。
#[derive(Debug, thiserror::Error)]
pub enum BmpError {
    /// 文件不存在、权限不足、读写不完整或目录创建失败。
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid signature: expected \"BM\", found {0:?}")]
    BadSignature([u8; 2]),

    #[error("truncated header: need {needed} bytes, got {actual}")]
    TruncatedHeader { needed: usize, actual: usize },

    #[error("unsupported BMP variant: {0}")]
    Unsupported(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("pixel data too short: need {needed} bytes, got {actual}")]
    PixelDataTooShort { needed: usize, actual: usize },

    /// 前导数据声明的图像形状与待编码的帧不一致。
    #[error(
        "header describes a {header_width}x{header_height} image, but the frame is {frame_width}x{frame_height}"
    )]
    DimensionMismatch {
        header_width: usize,
        header_height: usize,
        frame_width: usize,
        frame_height: usize,
    },
}

impl BmpError {
    /// 是否属于格式错误 (不可恢复，在产生任何帧之前中止)。
    pub fn is_format(&self) -> bool {
        !self.is_io()
    }

    pub fn is_io(&self) -> bool {
        matches!(self, BmpError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, BmpError>;
