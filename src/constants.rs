/// BMP 文件头 (BITMAPFILEHEADER) 的固定大小 (字节)。
/// 布局为 2 + 4 + 2 + 2 + 4。
pub const FILE_HEADER_SIZE: usize = 14;

/// BMP 信息头 (BITMAPINFOHEADER) 的固定大小 (字节)。
/// 布局为 4 + 4 + 4 + 2 + 2 + 4 + 4 + 4 + 4 + 4 + 4。
pub const INFO_HEADER_SIZE: usize = 40;

/// 两个固定头部的总长度，也是合成前导数据时的像素数据偏移量。
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// 文件签名，ASCII 字符 "BM"。
pub const BMP_SIGNATURE: [u8; 2] = *b"BM";

/// 唯一支持的位深度：24 位 RGB，每像素 3 字节。
pub const SUPPORTED_BIT_COUNT: u16 = 24;

/// 每个像素序列化后的字节数。
pub const BYTES_PER_PIXEL: usize = 3;

/// 未压缩 (BI_RGB) 的压缩方式编号。
pub const COMPRESSION_NONE: u32 = 0;

/// 默认生成的帧数。
pub const DEFAULT_FRAME_COUNT: usize = 30;

/// 默认的输出目录名。
pub const DEFAULT_OUTPUT_DIR: &str = "frames";
