use serde::{Deserialize, Serialize};

/// 默认帧间隔 (ms)
pub const DEFAULT_DURATION_MS: u32 = 100;

/// Frame rate matching [`DEFAULT_DURATION_MS`]
pub const DEFAULT_FPS: f64 = 10.0;

/// 循环模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// 无限循环
    #[default]
    Forever,
    /// 只播放一遍
    Once,
}

impl LoopMode {
    #[inline]
    pub fn from_flag(loop_forever: bool) -> Self {
        if loop_forever {
            LoopMode::Forever
        } else {
            LoopMode::Once
        }
    }

    #[inline]
    pub fn is_forever(&self) -> bool {
        matches!(self, LoopMode::Forever)
    }
}

/// Duration actually used at export: absent or zero falls back to the default.
#[inline]
pub fn effective_duration(duration_ms: Option<u32>) -> u32 {
    match duration_ms {
        Some(ms) if ms > 0 => ms,
        _ => DEFAULT_DURATION_MS,
    }
}

/// 根据 FPS 计算帧间隔 (ms)
///
/// Returns `None` when the field should be left alone: no fps, a
/// non-positive fps, or something that isn't a number.
pub fn sync_duration_from_fps(fps: Option<f64>) -> Option<u32> {
    let fps = fps.filter(|f| f.is_finite() && *f > 0.0)?;
    let ms = (1000.0 / fps).round();
    // 帧间隔最小 1ms
    Some((ms as u32).max(1))
}

/// 根据帧间隔 (ms) 计算 FPS，保留两位小数
pub fn sync_fps_from_duration(duration_ms: Option<u32>) -> Option<f64> {
    let ms = duration_ms.filter(|ms| *ms > 0)?;
    let fps = 1000.0 / ms as f64;
    Some((fps * 100.0).round() / 100.0)
}
