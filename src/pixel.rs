//! # 像素缓冲区模块
//!
//! [`Frame`] 以单块连续内存保存一帧图像，按 `row * width + col` 索引。
//! 复制即深拷贝 (`Clone`)，帧之间从不共享存储。

use crate::constants::BYTES_PER_PIXEL;

/// 一个 24 位像素，不含 alpha 通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 三个通道的整数平均值 (向下取整)。
    pub fn average(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

/// 一帧图像：`height` 行，每行 `width` 个像素，行优先存储。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Frame {
    /// 分配一帧全零的图像。
    pub fn allocate(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width * height],
        }
    }

    /// 由行优先的像素列表构造一帧。长度必须等于 `width * height`。
    pub fn from_pixels(height: usize, width: usize, pixels: Vec<Pixel>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn row(&self, index: usize) -> &[Pixel] {
        let start = index * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn pixel(&self, row: usize, col: usize) -> Pixel {
        self.pixels[row * self.width + col]
    }

    pub fn set_pixel(&mut self, row: usize, col: usize, pixel: Pixel) {
        self.pixels[row * self.width + col] = pixel;
    }

    /// 序列化后的字节数 (不含行填充)。
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * BYTES_PER_PIXEL
    }

    /// 按存储顺序将像素写成 BMP 的 B, G, R 字节三元组，行与行之间不填充。
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        self.pixels
            .iter()
            .for_each(|p| out.extend_from_slice(&[p.b, p.g, p.r]));
        out
    }

    /// 原地转为灰度：每个像素三个通道都设为其整数平均值。
    pub fn grayscale(&mut self) -> &mut Self {
        self.pixels.iter_mut().for_each(|p| {
            let avg = p.average();
            *p = Pixel::new(avg, avg, avg);
        });
        self
    }

    /// 原地垂直翻转：第 `i` 行与第 `height - 1 - i` 行整体交换。
    /// 高度为奇数时中间一行保持不变。
    pub fn flip_vertical(&mut self) -> &mut Self {
        let width = self.width;
        for i in 0..self.height / 2 {
            let mirror = self.height - 1 - i;
            let (top, bottom) = self.pixels.split_at_mut(mirror * width);
            top[i * width..(i + 1) * width].swap_with_slice(&mut bottom[..width]);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_frame(height: usize, width: usize) -> Frame {
        let mut rng = rand::rng();
        let pixels = (0..height * width)
            .map(|_| Pixel::new(rng.random(), rng.random(), rng.random()))
            .collect();
        Frame::from_pixels(height, width, pixels).unwrap()
    }

    fn two_by_two() -> Frame {
        Frame::from_pixels(
            2,
            2,
            vec![
                Pixel::new(30, 60, 90),
                Pixel::new(0, 0, 0),
                Pixel::new(255, 255, 255),
                Pixel::new(10, 20, 30),
            ],
        )
        .unwrap()
    }

    #[test]
    fn allocate_is_zeroed() {
        let frame = Frame::allocate(3, 4);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.width(), 4);
        assert!(frame.pixels().iter().all(|p| *p == Pixel::default()));
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert!(Frame::from_pixels(2, 2, vec![Pixel::default(); 3]).is_none());
    }

    #[test]
    fn clone_is_independent() {
        let source = Frame::allocate(4, 5);
        let mut copy = source.clone();
        copy.set_pixel(0, 0, Pixel::new(1, 2, 3));
        copy.grayscale();

        assert_eq!(source, Frame::allocate(4, 5));
        assert_eq!(copy.pixel(0, 0), Pixel::new(2, 2, 2));
    }

    #[test]
    fn grayscale_truncates_average() {
        let mut frame =
            Frame::from_pixels(1, 2, vec![Pixel::new(1, 1, 0), Pixel::new(255, 255, 254)]).unwrap();
        frame.grayscale();
        assert_eq!(frame.pixel(0, 0), Pixel::new(0, 0, 0));
        assert_eq!(frame.pixel(0, 1), Pixel::new(254, 254, 254));
    }

    #[test]
    fn worked_example() {
        let mut frame = two_by_two();
        frame.grayscale();
        assert_eq!(frame.row(0), &[Pixel::new(60, 60, 60), Pixel::new(0, 0, 0)]);
        assert_eq!(frame.row(1), &[Pixel::new(255, 255, 255), Pixel::new(20, 20, 20)]);

        frame.flip_vertical();
        assert_eq!(frame.row(0), &[Pixel::new(255, 255, 255), Pixel::new(20, 20, 20)]);
        assert_eq!(frame.row(1), &[Pixel::new(60, 60, 60), Pixel::new(0, 0, 0)]);
    }

    #[test]
    fn flip_twice_is_identity() {
        for (h, w) in [(1, 1), (2, 3), (5, 4), (8, 7)] {
            let original = random_frame(h, w);
            let mut frame = original.clone();
            frame.flip_vertical().flip_vertical();
            assert_eq!(frame, original);
        }
    }

    #[test]
    fn grayscale_is_stable() {
        let mut once = random_frame(6, 6);
        once.grayscale();
        let mut twice = once.clone();
        twice.grayscale();
        assert_eq!(once, twice);
    }

    #[test]
    fn odd_height_keeps_middle_row() {
        let original = random_frame(5, 3);
        let mut frame = original.clone();
        frame.flip_vertical();

        assert_eq!(frame.row(2), original.row(2));
        assert_eq!(frame.row(0), original.row(4));
        assert_eq!(frame.row(4), original.row(0));
        assert_eq!(frame.row(1), original.row(3));
        assert_eq!(frame.row(3), original.row(1));
    }

    #[test]
    fn to_bytes_writes_bgr_without_padding() {
        let frame = two_by_two();
        assert_eq!(
            frame.to_bytes(),
            vec![90, 60, 30, 0, 0, 0, 255, 255, 255, 30, 20, 10]
        );
    }
}
