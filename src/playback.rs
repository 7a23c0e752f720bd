//! Frame stepping for the result preview

use crate::models::LoopMode;

/// Playback position over a fixed number of frames
#[derive(Debug, Clone)]
pub struct Playback {
    pub playing: bool,
    pub current_frame: usize,
    frame_count: usize,
    frame_time: f64,
    loop_mode: LoopMode,
    accumulator: f64,
}

impl Playback {
    /// `duration_ms` is the per-frame delay; zero is treated as 1 ms.
    pub fn new(frame_count: usize, duration_ms: u32, loop_mode: LoopMode) -> Self {
        Self {
            playing: frame_count > 1,
            current_frame: 0,
            frame_count,
            frame_time: duration_ms.max(1) as f64 / 1000.0,
            loop_mode,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[inline]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn toggle(&mut self) {
        if !self.playing && self.is_at_end() {
            self.current_frame = 0;
        }
        self.playing = !self.playing;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.current_frame = 0;
        self.accumulator = 0.0;
    }

    /// Jumps to `frame` and pauses.
    pub fn seek(&mut self, frame: usize) {
        self.playing = false;
        self.accumulator = 0.0;
        self.current_frame = frame.min(self.frame_count.saturating_sub(1));
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current_frame + 1 >= self.frame_count
    }

    /// 推进 `dt` 秒；返回帧号是否变化
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.playing || self.frame_count == 0 {
            self.accumulator = 0.0;
            return false;
        }

        let before = self.current_frame;
        self.accumulator += dt.max(0.0);

        while self.accumulator >= self.frame_time {
            self.accumulator -= self.frame_time;

            if !self.is_at_end() {
                self.current_frame += 1;
                continue;
            }

            match self.loop_mode {
                LoopMode::Forever => self.current_frame = 0,
                LoopMode::Once => {
                    self.playing = false;
                    self.accumulator = 0.0;
                    break;
                }
            }
        }

        self.current_frame != before
    }
}
