//! # BMP 编解码模块
//!
//! 逐字段读取两个固定布局的头部 (小端序)，并把文件开头到像素数据偏移量之间的
//! 全部字节原样保存为 [`Preamble`]。编码时直接复用这段前导数据，
//! 因此输出文件的头部与源文件逐字节一致。
//!
//! 行数据不做 4 字节对齐填充：每行恰好 `width * 3` 字节。

use crate::constants::{
    BMP_SIGNATURE, BYTES_PER_PIXEL, COMPRESSION_NONE, FILE_HEADER_SIZE, HEADERS_SIZE,
    INFO_HEADER_SIZE, SUPPORTED_BIT_COUNT,
};
use crate::error::{BmpError, Result};
use crate::pixel::{Frame, Pixel};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use tracing::debug;

/// 在字节切片上按小端序顺序读取字段的游标。
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BmpError::TruncatedHeader {
                needed: end,
                actual: self.data.len(),
            })?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }
}

/// BITMAPFILEHEADER，磁盘上共 14 字节。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub pixel_offset: u32,
}

impl FileHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let signature = cursor.read_array::<2>()?;
        if signature != BMP_SIGNATURE {
            return Err(BmpError::BadSignature(signature));
        }
        Ok(Self {
            signature,
            file_size: cursor.read_u32()?,
            reserved1: cursor.read_u16()?,
            reserved2: cursor.read_u16()?,
            pixel_offset: cursor.read_u32()?,
        })
    }

    /// 按磁盘布局序列化为 14 字节。
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.signature);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }
}

/// BITMAPINFOHEADER，磁盘上共 40 字节。
///
/// `height` 为正表示自底向上存储，为负表示自顶向下。本模块不改变存储顺序，
/// 只使用其绝对值作为行数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            header_size: cursor.read_u32()?,
            width: cursor.read_i32()?,
            height: cursor.read_i32()?,
            planes: cursor.read_u16()?,
            bit_count: cursor.read_u16()?,
            compression: cursor.read_u32()?,
            image_size: cursor.read_u32()?,
            x_pels_per_meter: cursor.read_i32()?,
            y_pels_per_meter: cursor.read_i32()?,
            colors_used: cursor.read_u32()?,
            colors_important: cursor.read_u32()?,
        })
    }

    /// 按磁盘布局序列化为 40 字节。
    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }

    /// 帧的 (行数, 列数)。
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        let width = usize::try_from(self.width)
            .map_err(|_| BmpError::Unsupported(format!("negative width {}", self.width)))?;
        Ok((self.height.unsigned_abs() as usize, width))
    }

    fn validate(&self) -> Result<()> {
        if self.bit_count != SUPPORTED_BIT_COUNT {
            return Err(BmpError::Unsupported(format!(
                "{} bits per pixel (only 24 is supported)",
                self.bit_count
            )));
        }
        if self.compression != COMPRESSION_NONE {
            return Err(BmpError::Unsupported(format!(
                "compression method {}",
                self.compression
            )));
        }
        if self.image_size == 0 {
            return Err(BmpError::InvalidHeader(
                "image data size (biSizeImage) is zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// 源文件 `[0, pixel_offset)` 范围内的原始字节，包括两个头部以及
/// 之后可能存在的扩展头或调色板字节。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble(Vec<u8>);

impl Preamble {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 从前导数据中重新解析两个固定头部。
    pub fn headers(&self) -> Result<(FileHeader, InfoHeader)> {
        let mut cursor = Cursor::new(&self.0);
        let file_header = FileHeader::read(&mut cursor)?;
        let info_header = InfoHeader::read(&mut cursor)?;
        Ok((file_header, info_header))
    }
}

/// 一次解码的全部结果。
#[derive(Debug, Clone)]
pub struct DecodedBmp {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pub preamble: Preamble,
    /// 从像素偏移量开始、长度为 `biSizeImage` 的原始字节。
    pub pixel_data: Vec<u8>,
}

impl DecodedBmp {
    /// 把原始像素字节解释为一帧图像。
    pub fn frame(&self) -> Result<Frame> {
        let (height, width) = self.info_header.dimensions()?;
        decode_pixels(&self.pixel_data, width, height)
    }
}

/// 读取并解码 BMP 文件。
///
/// 文件只读取一次，前导数据与头部解析使用同一块内存。
///
/// # Errors
///
/// * 无法读取文件，或像素数据少于头部声明的长度时返回 [`BmpError::Io`]。
/// * 签名错误、头部被截断、位深度或压缩方式不受支持时返回格式错误。
pub fn decode(path: impl AsRef<Path>) -> Result<DecodedBmp> {
    let data = fs::read(path.as_ref())?;
    decode_bytes(&data)
}

/// 从内存中的完整文件内容解码。
pub fn decode_bytes(data: &[u8]) -> Result<DecodedBmp> {
    let mut cursor = Cursor::new(data);
    let file_header = FileHeader::read(&mut cursor)?;
    let info_header = InfoHeader::read(&mut cursor)?;
    info_header.validate()?;

    debug!(
        width = info_header.width,
        height = info_header.height,
        pixel_offset = file_header.pixel_offset,
        image_size = info_header.image_size,
        "parsed BMP headers"
    );

    let offset = file_header.pixel_offset as usize;
    if offset < HEADERS_SIZE {
        return Err(BmpError::InvalidHeader(format!(
            "pixel data offset {offset} overlaps the {HEADERS_SIZE}-byte headers"
        )));
    }
    let preamble = data.get(..offset).ok_or_else(|| {
        io::Error::new(
            ErrorKind::UnexpectedEof,
            format!(
                "file ends at byte {} before the pixel data offset {offset}",
                data.len()
            ),
        )
    })?;

    let size = info_header.image_size as usize;
    let pixel_data = data.get(offset..offset + size).ok_or_else(|| {
        io::Error::new(
            ErrorKind::UnexpectedEof,
            format!(
                "expected {size} bytes of pixel data, only {} available",
                data.len() - offset
            ),
        )
    })?;

    Ok(DecodedBmp {
        file_header,
        info_header,
        preamble: Preamble(preamble.to_vec()),
        pixel_data: pixel_data.to_vec(),
    })
}

/// 把原始字节解释为 `height` 行、每行 `width` 个像素的帧，保持存储顺序。
/// 磁盘上每个像素为 B, G, R 三个字节。
pub fn decode_pixels(raw: &[u8], width: usize, height: usize) -> Result<Frame> {
    let count = width
        .checked_mul(height)
        .ok_or_else(|| BmpError::InvalidHeader(format!("dimensions {width}x{height} overflow")))?;
    let needed = count
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or_else(|| BmpError::InvalidHeader(format!("dimensions {width}x{height} overflow")))?;
    if raw.len() < needed {
        return Err(BmpError::PixelDataTooShort {
            needed,
            actual: raw.len(),
        });
    }

    let pixels = raw[..needed]
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|bgr| Pixel::new(bgr[2], bgr[1], bgr[0]))
        .collect();

    Frame::from_pixels(height, width, pixels)
        .ok_or_else(|| BmpError::InvalidHeader("pixel count mismatch".to_string()))
}

/// 前导数据后接逐行序列化的像素，生成完整的 BMP 文件内容。
///
/// 头部字段不重新计算。编码前会校验前导数据声明的宽高与帧一致，
/// 且声明的图像大小足以容纳帧数据，否则返回错误。
pub fn encode(preamble: &Preamble, frame: &Frame) -> Result<Vec<u8>> {
    let (file_header, info_header) = preamble.headers()?;
    if file_header.pixel_offset as usize != preamble.len() {
        return Err(BmpError::InvalidHeader(format!(
            "preamble is {} bytes but declares pixel data at offset {}",
            preamble.len(),
            file_header.pixel_offset
        )));
    }

    let (height, width) = info_header.dimensions()?;
    if (height, width) != (frame.height(), frame.width()) {
        return Err(BmpError::DimensionMismatch {
            header_width: width,
            header_height: height,
            frame_width: frame.width(),
            frame_height: frame.height(),
        });
    }
    if (info_header.image_size as usize) < frame.byte_len() {
        return Err(BmpError::InvalidHeader(format!(
            "declared image size {} is smaller than the {} bytes of frame data",
            info_header.image_size,
            frame.byte_len()
        )));
    }

    let mut out = Vec::with_capacity(preamble.len() + frame.byte_len());
    out.extend_from_slice(preamble.as_bytes());
    out.extend_from_slice(&frame.to_bytes());
    Ok(out)
}

/// 为给定尺寸的 24 位未压缩图像生成一段全新的 54 字节前导数据。
pub fn synthesize_preamble(width: usize, height: usize) -> Result<Preamble> {
    let too_large = || BmpError::Unsupported(format!("dimensions {width}x{height} too large"));

    let image_size = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    let file_size = image_size
        .checked_add(HEADERS_SIZE as u32)
        .ok_or_else(too_large)?;

    let file_header = FileHeader {
        signature: BMP_SIGNATURE,
        file_size,
        reserved1: 0,
        reserved2: 0,
        pixel_offset: HEADERS_SIZE as u32,
    };
    let info_header = InfoHeader {
        header_size: INFO_HEADER_SIZE as u32,
        width: i32::try_from(width).map_err(|_| too_large())?,
        height: i32::try_from(height).map_err(|_| too_large())?,
        planes: 1,
        bit_count: SUPPORTED_BIT_COUNT,
        compression: COMPRESSION_NONE,
        image_size,
        x_pels_per_meter: 0,
        y_pels_per_meter: 0,
        colors_used: 0,
        colors_important: 0,
    };

    let mut bytes = Vec::with_capacity(HEADERS_SIZE);
    bytes.extend_from_slice(&file_header.to_bytes());
    bytes.extend_from_slice(&info_header.to_bytes());
    Ok(Preamble(bytes))
}
