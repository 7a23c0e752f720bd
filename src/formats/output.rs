//! Output location and file naming for exported GIFs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ExportError, Result};

/// 默认输出目录 (相对于工作目录)
pub const DEFAULT_OUTPUT_DIR: &str = "outputs/gif";

/// Source of the timestamp used in output file names
pub trait Clock {
    fn unix_secs(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// How an export picks its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingScheme {
    /// `sprite_<secs>.gif`; a second export in the same second overwrites the first
    #[default]
    Timestamp,
    /// Like `Timestamp`, but adds `_1`, `_2`, ... when the file already exists
    Unique,
}

impl NamingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingScheme::Timestamp => "timestamp",
            NamingScheme::Unique => "unique",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "unique" => NamingScheme::Unique,
            _ => NamingScheme::Timestamp,
        }
    }
}

#[inline]
pub fn output_file_name(unix_secs: u64) -> String {
    format!("sprite_{}.gif", unix_secs)
}

/// 确保输出目录存在（递归创建）
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
    }
    Ok(())
}

/// Full path for an export made at `unix_secs`.
pub fn output_path(dir: &Path, unix_secs: u64, scheme: NamingScheme) -> PathBuf {
    let path = dir.join(output_file_name(unix_secs));
    match scheme {
        NamingScheme::Timestamp => path,
        NamingScheme::Unique => {
            if !path.exists() {
                return path;
            }
            (1u32..)
                .map(|n| dir.join(format!("sprite_{}_{}.gif", unix_secs, n)))
                .find(|p| !p.exists())
                .unwrap_or(path)
        }
    }
}
