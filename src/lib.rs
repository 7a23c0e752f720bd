pub mod error;
pub mod export;
pub mod form;
pub mod formats;
pub mod i18n;
pub mod models;
pub mod playback;

/// Shared constants for resource limits
pub mod limits {
    /// GIF stores logical screen and frame sizes as u16
    pub const MAX_GIF_DIMENSION: u32 = u16::MAX as u32;
}

// Re-export commonly used types
pub use error::{ExportError, Result};
pub use export::{process_sprite_sheet, Export, ExportRequest, SpriteExporter};
pub use form::{Bindings, FieldValue, FormField, SpriteForm};
pub use formats::{write_gif, Clock, NamingScheme, SystemClock, DEFAULT_OUTPUT_DIR};
pub use models::{
    effective_duration, slice_frames, sync_duration_from_fps, sync_fps_from_duration, GridSpec,
    LoopMode, DEFAULT_DURATION_MS,
};
pub use playback::Playback;
