//! Sprite sheet → GIF export

use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Result;
use crate::formats::{
    ensure_output_dir, output_path, stored_delay_ms, write_gif, Clock, NamingScheme, SystemClock,
};
use crate::models::{effective_duration, slice_frames, GridSpec, LoopMode, DEFAULT_DURATION_MS};

/// Everything the convert button hands to the exporter, apart from the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    pub rows: u32,
    pub cols: u32,
    /// `None` or `Some(0)` means "use the default"
    pub duration_ms: Option<u32>,
    pub loop_mode: LoopMode,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 4,
            duration_ms: Some(DEFAULT_DURATION_MS),
            loop_mode: LoopMode::Forever,
        }
    }
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct Export {
    pub path: PathBuf,
    /// 帧序列（行优先），供预览使用
    pub frames: Vec<RgbaImage>,
    /// Requested duration after defaulting
    pub duration_ms: u32,
    /// Per-frame delay as stored in the GIF (whole centiseconds)
    pub frame_delay_ms: u32,
    pub loop_mode: LoopMode,
}

/// Writes sprite sheets as GIFs into one output directory
#[derive(Debug, Clone)]
pub struct SpriteExporter<C: Clock = SystemClock> {
    output_dir: PathBuf,
    naming: NamingScheme,
    clock: C,
}

impl SpriteExporter<SystemClock> {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(output_dir, SystemClock)
    }
}

impl<C: Clock> SpriteExporter<C> {
    pub fn with_clock(output_dir: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            output_dir: output_dir.into(),
            naming: NamingScheme::default(),
            clock,
        }
    }

    pub fn naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 切割精灵图并导出 GIF
    ///
    /// No image is not an error: nothing is written and `Ok(None)` comes back.
    pub fn export(
        &self,
        image: Option<&DynamicImage>,
        request: &ExportRequest,
    ) -> Result<Option<Export>> {
        let Some(image) = image else {
            return Ok(None);
        };

        let duration_ms = effective_duration(request.duration_ms);
        if request.duration_ms != Some(duration_ms) {
            warn!(
                requested = ?request.duration_ms,
                duration_ms,
                "frame duration missing, using default"
            );
        }

        let grid = GridSpec::new(request.rows, request.cols)?;
        let frames = slice_frames(image, grid)?;

        ensure_output_dir(&self.output_dir)?;
        let path = output_path(&self.output_dir, self.clock.unix_secs(), self.naming);

        write_gif(&path, &frames, duration_ms, request.loop_mode)?;

        info!(
            path = %path.display(),
            frames = frames.len(),
            duration_ms,
            "GIF saved"
        );

        Ok(Some(Export {
            path,
            frames,
            duration_ms,
            frame_delay_ms: stored_delay_ms(duration_ms),
            loop_mode: request.loop_mode,
        }))
    }
}

/// One-shot export into [`crate::DEFAULT_OUTPUT_DIR`] using the wall clock.
pub fn process_sprite_sheet(
    image: Option<&DynamicImage>,
    rows: u32,
    cols: u32,
    duration_ms: Option<u32>,
    loop_forever: bool,
) -> Result<Option<PathBuf>> {
    let request = ExportRequest {
        rows,
        cols,
        duration_ms,
        loop_mode: LoopMode::from_flag(loop_forever),
    };

    SpriteExporter::new(crate::formats::DEFAULT_OUTPUT_DIR)
        .export(image, &request)
        .map(|export| export.map(|e| e.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use image::Rgba;
    use pretty_assertions::assert_eq;
    use std::fs::File;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn unix_secs(&self) -> u64 {
            self.0
        }
    }

    fn sheet(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x * 7) as u8, (y * 13) as u8, 90, 255])
        }))
    }

    fn request(rows: u32, cols: u32, duration_ms: Option<u32>, loop_forever: bool) -> ExportRequest {
        ExportRequest {
            rows,
            cols,
            duration_ms,
            loop_mode: LoopMode::from_flag(loop_forever),
        }
    }

    /// (frame count, first delay in 1/100 s, repeat)
    fn read_back(path: &Path) -> (usize, u16, ::gif::Repeat) {
        let mut decoder = ::gif::DecodeOptions::new()
            .read_info(File::open(path).unwrap())
            .unwrap();
        let mut count = 0;
        let mut delay = 0;
        while let Some(frame) = decoder.read_next_frame().unwrap() {
            if count == 0 {
                delay = frame.delay;
            }
            count += 1;
        }
        (count, delay, decoder.repeat())
    }

    #[test]
    fn test_no_image_is_noop() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("outputs").join("gif");
        let exporter = SpriteExporter::with_clock(&out, FixedClock(1));

        let result = exporter.export(None, &ExportRequest::default()).unwrap();

        assert!(result.is_none());
        assert!(!out.exists());
    }

    #[test]
    fn test_process_without_image_returns_nothing() {
        assert_eq!(process_sprite_sheet(None, 1, 4, Some(100), true).unwrap(), None);
    }

    #[test]
    fn test_export_writes_timestamped_gif() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("outputs").join("gif");
        let exporter = SpriteExporter::with_clock(&out, FixedClock(1_700_000_123));

        let export = exporter
            .export(Some(&sheet(64, 32)), &request(2, 4, Some(80), true))
            .unwrap()
            .unwrap();

        assert_eq!(export.path, out.join("sprite_1700000123.gif"));
        assert_eq!(export.frames.len(), 8);
        assert!(export.frames.iter().all(|f| f.dimensions() == (16, 16)));

        let (count, delay, repeat) = read_back(&export.path);
        assert_eq!(count, 8);
        assert_eq!(delay, 8);
        assert_eq!(repeat, ::gif::Repeat::Infinite);
    }

    #[test]
    fn test_missing_or_zero_duration_uses_default() {
        let root = tempfile::tempdir().unwrap();

        for (i, duration) in [None, Some(0)].into_iter().enumerate() {
            let exporter = SpriteExporter::with_clock(root.path(), FixedClock(i as u64));
            let export = exporter
                .export(Some(&sheet(20, 10)), &request(1, 2, duration, true))
                .unwrap()
                .unwrap();

            assert_eq!(export.duration_ms, DEFAULT_DURATION_MS);
            assert_eq!(read_back(&export.path).1, 10);
        }
    }

    #[test]
    fn test_loop_once_plays_single_pass() {
        let root = tempfile::tempdir().unwrap();
        let exporter = SpriteExporter::with_clock(root.path(), FixedClock(5));

        let export = exporter
            .export(Some(&sheet(20, 10)), &request(1, 2, Some(100), false))
            .unwrap()
            .unwrap();

        assert_eq!(export.loop_mode, LoopMode::Once);
        assert_eq!(read_back(&export.path).2, ::gif::Repeat::Finite(0));
    }

    #[test]
    fn test_same_second_exports_collide() {
        let root = tempfile::tempdir().unwrap();
        let exporter = SpriteExporter::with_clock(root.path(), FixedClock(99));

        let first = exporter
            .export(Some(&sheet(40, 10)), &request(1, 4, Some(100), true))
            .unwrap()
            .unwrap();
        let second = exporter
            .export(Some(&sheet(40, 10)), &request(1, 2, Some(100), true))
            .unwrap()
            .unwrap();

        // 同一秒内的第二次导出会覆盖第一次
        assert_eq!(first.path, second.path);
        assert_eq!(read_back(&second.path).0, 2);
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unique_naming_avoids_collision() {
        let root = tempfile::tempdir().unwrap();
        let exporter =
            SpriteExporter::with_clock(root.path(), FixedClock(99)).naming(NamingScheme::Unique);

        let first = exporter
            .export(Some(&sheet(40, 10)), &request(1, 4, None, true))
            .unwrap()
            .unwrap();
        let second = exporter
            .export(Some(&sheet(40, 10)), &request(1, 4, None, true))
            .unwrap()
            .unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(second.path, root.path().join("sprite_99_1.gif"));
    }

    #[test]
    fn test_degenerate_grid_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("gif");
        let exporter = SpriteExporter::with_clock(&out, FixedClock(7));

        let err = exporter
            .export(Some(&sheet(3, 3)), &request(1, 8, Some(100), true))
            .unwrap_err();

        assert!(matches!(err, ExportError::DegenerateFrame { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_oversized_frame_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("gif");
        let exporter =
            SpriteExporter::with_clock(&out, FixedClock(3)).naming(NamingScheme::Unique);
        let wide = DynamicImage::ImageRgba8(RgbaImage::new(70_000, 1));

        for _ in 0..2 {
            let err = exporter
                .export(Some(&wide), &request(1, 1, Some(100), true))
                .unwrap_err();
            assert!(matches!(err, ExportError::FrameTooLarge { width: 70_000, height: 1 }));
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_failed_export_keeps_earlier_gif() {
        let root = tempfile::tempdir().unwrap();
        let exporter = SpriteExporter::with_clock(root.path(), FixedClock(11));

        let good = exporter
            .export(Some(&sheet(40, 10)), &request(1, 4, Some(100), true))
            .unwrap()
            .unwrap();
        let size = std::fs::metadata(&good.path).unwrap().len();

        let wide = DynamicImage::ImageRgba8(RgbaImage::new(70_000, 1));
        assert!(exporter.export(Some(&wide), &request(1, 1, Some(100), true)).is_err());

        assert_eq!(std::fs::metadata(&good.path).unwrap().len(), size);
        assert_eq!(read_back(&good.path).0, 4);
    }

    #[test]
    fn test_frame_delay_matches_file() {
        let root = tempfile::tempdir().unwrap();
        let exporter = SpriteExporter::with_clock(root.path(), FixedClock(12));

        let export = exporter
            .export(Some(&sheet(20, 10)), &request(1, 2, Some(15), true))
            .unwrap()
            .unwrap();

        assert_eq!(export.duration_ms, 15);
        assert_eq!(export.frame_delay_ms, 10);
        assert_eq!(read_back(&export.path).1, 1);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let root = tempfile::tempdir().unwrap();
        let exporter = SpriteExporter::with_clock(root.path(), FixedClock(7));

        let err = exporter
            .export(Some(&sheet(8, 8)), &request(0, 2, Some(100), true))
            .unwrap_err();

        assert!(matches!(err, ExportError::InvalidGrid { rows: 0, cols: 2 }));
    }
}
