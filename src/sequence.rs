//! # 帧序列模块
//!
//! 第 0 帧为解码得到的源图像，之后每一帧都由前一帧的副本依次经过灰度转换和
//! 垂直翻转得到。每一帧独占自己的存储。

use crate::pixel::Frame;
use std::ops::Index;
use tracing::debug;

/// 由前一帧派生下一帧：复制后先灰度、再垂直翻转。`previous` 不会被修改。
pub fn derive_next(previous: &Frame) -> Frame {
    let mut next = previous.clone();
    next.grayscale().flip_vertical();
    next
}

/// 按顺序排列的帧集合。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// 构建 `count` 帧。`count` 为 0 时返回空序列。
    pub fn build(source: Frame, count: usize) -> Self {
        let mut frames = Vec::with_capacity(count);
        if count > 0 {
            frames.push(source);
        }
        for i in 1..count {
            let next = derive_next(&frames[i - 1]);
            debug!(index = i, "derived frame");
            frames.push(next);
        }
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }
}

impl Index<usize> for FrameSequence {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}
