//! Tracker configuration
//!
//! Supports multiple profiles (debug, release) layered over built-in defaults.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Default gap window for click and double-activation classification, in seconds
pub const DEFAULT_INTERACT_TIME_GAP: f32 = 0.2;

/// Default cap on concurrently tracked touches
pub const DEFAULT_MAX_TOUCHES: usize = 5;

/// Which raw input path the tracker polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mouse,
    Touch,
}

impl Platform {
    /// The platform implied by the compile target
    pub const fn native() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            Self::Touch
        } else {
            Self::Mouse
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::native()
    }
}

/// Gesture timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Maximum seconds between down and up for a click, and between two
    /// activations for a double-click
    pub interact_time_gap: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            interact_time_gap: DEFAULT_INTERACT_TIME_GAP,
        }
    }
}

/// Pointer slot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Touches beyond this many are ignored each tick
    pub max_touches: usize,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            max_touches: DEFAULT_MAX_TOUCHES,
        }
    }
}

/// Scene picking configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitTestConfig {
    /// Direction handed to the scene when casting from a pointer.
    /// Zero means a point query.
    pub cast_direction: [f32; 2],
}

/// Complete tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Mouse or touch input path
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub pointers: PointerConfig,
    #[serde(default)]
    pub hit_test: HitTestConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            platform: Platform::default(),
            gesture: GestureConfig::default(),
            pointers: PointerConfig::default(),
            hit_test: HitTestConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Loads configuration for the given profile
    ///
    /// Sources are layered in this order:
    /// 1. Built-in defaults
    /// 2. config/{profile}.toml (next to the executable, else ./config)
    /// 3. Environment variables with prefix POINTER_ (e.g., POINTER_GESTURE__INTERACT_TIME_GAP=0.3)
    pub fn load(profile: &str) -> Result<Self> {
        match Self::find_config_dir() {
            Some(dir) => Self::load_from_dir(&dir, profile),
            None => Self::build(None, profile),
        }
    }

    /// Loads configuration for the given profile from an explicit directory
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self> {
        Self::build(Some(dir.join(profile)), profile)
    }

    /// Loads configuration using the POINTER_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self> {
        let profile = std::env::var("POINTER_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    fn build(profile_path: Option<PathBuf>, profile: &str) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = profile_path {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }

        // Use __ as separator for nested fields (e.g., POINTER_POINTERS__MAX_TOUCHES)
        builder = builder.add_source(
            Environment::with_prefix("POINTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .set_override("profile", profile)?
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a tracker relies on
    pub fn validate(&self) -> Result<()> {
        let gap = self.gesture.interact_time_gap;
        if !gap.is_finite() || gap <= 0.0 {
            return Err(TrackerError::InvalidTimeGap(gap));
        }
        if self.pointers.max_touches == 0 {
            return Err(TrackerError::InvalidMaxTouches(self.pointers.max_touches));
        }
        Ok(())
    }

    /// Builder method to force a platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Builder method to set the gap window
    pub fn with_interact_time_gap(mut self, gap: f32) -> Self {
        self.gesture.interact_time_gap = gap;
        self
    }

    /// Builder method to set the touch cap
    pub fn with_max_touches(mut self, max_touches: usize) -> Self {
        self.pointers.max_touches = max_touches;
        self
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }
}
