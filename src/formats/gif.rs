use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{ExportError, Result};
use crate::limits::MAX_GIF_DIMENSION;
use crate::models::LoopMode;

/// 将帧序列编码为 GIF 动画
///
/// The first frame sets the canvas; the rest follow it in order, each shown
/// for `duration_ms`. `LoopMode::Forever` writes the NETSCAPE loop block with
/// a count of zero; `LoopMode::Once` leaves it out so viewers play one pass.
pub fn encode_gif<W: Write>(
    writer: W,
    frames: &[RgbaImage],
    duration_ms: u32,
    loop_mode: LoopMode,
) -> Result<()> {
    let first = frames.first().ok_or(ExportError::NoFrames)?;
    let (width, height) = first.dimensions();
    if width > MAX_GIF_DIMENSION || height > MAX_GIF_DIMENSION {
        return Err(ExportError::FrameTooLarge { width, height });
    }

    let mut encoder = GifEncoder::new(writer);
    if loop_mode.is_forever() {
        encoder.set_repeat(Repeat::Infinite)?;
    }

    let delay = Delay::from_numer_denom_ms(duration_ms, 1);
    encoder.encode_frames(
        frames
            .iter()
            .map(|f| Frame::from_parts(f.clone(), 0, 0, delay)),
    )?;

    Ok(())
}

/// Delay a GIF frame really gets: stored in 1/100 s, fractions dropped
#[inline]
pub fn stored_delay_ms(duration_ms: u32) -> u32 {
    duration_ms / 10 * 10
}

/// 写入 GIF 文件
///
/// Encodes in memory first; the file is only created once encoding succeeded.
pub fn write_gif(
    path: &Path,
    frames: &[RgbaImage],
    duration_ms: u32,
    loop_mode: LoopMode,
) -> Result<()> {
    let mut buf = Vec::new();
    encode_gif(&mut buf, frames, duration_ms, loop_mode)?;

    fs::write(path, &buf).map_err(|e| ExportError::io(path, e))
}
