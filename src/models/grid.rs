use image::{imageops, DynamicImage, RgbaImage};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::limits::MAX_GIF_DIMENSION;

/// 精灵图网格：行数 × 列数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
}

/// 单帧尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One grid cell: its position in the grid and its crop rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub row: u32,
    pub col: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridSpec {
    /// 创建网格，行列都必须 ≥ 1
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ExportError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// 计算单帧尺寸（整除，余数像素被丢弃）
    #[inline]
    pub fn frame_size(&self, width: u32, height: u32) -> FrameSize {
        FrameSize {
            width: width / self.cols,
            height: height / self.rows,
        }
    }

    /// Crop rectangles in playback order: rows outer, columns inner.
    pub fn tiles(&self, width: u32, height: u32) -> impl Iterator<Item = Tile> {
        let size = self.frame_size(width, height);
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| {
            (0..cols).map(move |col| Tile {
                row,
                col,
                x: col * size.width,
                y: row * size.height,
                width: size.width,
                height: size.height,
            })
        })
    }

    /// Interior cut positions in pixels along x and y.
    ///
    /// Includes the edge of the dropped remainder strip when the sheet does
    /// not divide evenly; never includes 0 or the image edge itself.
    pub fn cut_lines(&self, width: u32, height: u32) -> (Vec<u32>, Vec<u32>) {
        let size = self.frame_size(width, height);
        if size.is_empty() {
            return (Vec::new(), Vec::new());
        }
        let cuts = |count: u32, step: u32, edge: u32| -> Vec<u32> {
            (1..=count).map(|i| i * step).filter(|&p| p < edge).collect()
        };
        (
            cuts(self.cols, size.width, width),
            cuts(self.rows, size.height, height),
        )
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { rows: 1, cols: 4 }
    }
}

/// 按网格切割精灵图，返回行优先顺序的帧序列
///
/// Grids that would produce zero-sized frames, or frames too large for a GIF,
/// are rejected here rather than left for the encoder to trip over.
pub fn slice_frames(image: &DynamicImage, grid: GridSpec) -> Result<Vec<RgbaImage>> {
    let (width, height) = (image.width(), image.height());
    let size = grid.frame_size(width, height);

    if size.is_empty() {
        return Err(ExportError::DegenerateFrame {
            width,
            height,
            rows: grid.rows,
            cols: grid.cols,
        });
    }
    if size.width > MAX_GIF_DIMENSION || size.height > MAX_GIF_DIMENSION {
        return Err(ExportError::FrameTooLarge {
            width: size.width,
            height: size.height,
        });
    }

    debug!(
        rows = grid.rows,
        cols = grid.cols,
        frame_width = size.width,
        frame_height = size.height,
        "slicing sprite sheet"
    );

    let rgba = image.to_rgba8();
    let frames = grid
        .tiles(width, height)
        .map(|t| imageops::crop_imm(&rgba, t.x, t.y, t.width, t.height).to_image())
        .collect();

    Ok(frames)
}
