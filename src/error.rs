use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a sprite sheet into a GIF
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("grid needs at least one row and one column, got {rows} x {cols}")]
    InvalidGrid { rows: u32, cols: u32 },

    #[error("a {rows} x {cols} grid on a {width} x {height} image leaves empty frames")]
    DegenerateFrame {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },

    #[error("frame size {width} x {height} is larger than a GIF can hold")]
    FrameTooLarge { width: u32, height: u32 },

    #[error("no frames to encode")]
    NoFrames,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
