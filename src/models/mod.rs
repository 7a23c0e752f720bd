pub mod grid;
pub mod timing;

pub use grid::{slice_frames, FrameSize, GridSpec, Tile};
pub use timing::{
    effective_duration, sync_duration_from_fps, sync_fps_from_duration, LoopMode,
    DEFAULT_DURATION_MS, DEFAULT_FPS,
};
