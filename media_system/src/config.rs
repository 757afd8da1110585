/// System configuration
///
/// Plain structs with `Default` values matching the classic setup:
/// a 640x480 window, fixed-capacity resource tables and 32 KiB
/// streaming chunks.

use std::time::Duration;
use glam::{IVec2, UVec2};
use crate::error::{Error, Result};
use crate::utils::slot_allocator::MAX_CAPACITY;

/// Capacity of every resource table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    pub textures: u32,
    pub images: u32,
    pub fonts: u32,
    pub waves: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            textures: 128,
            images: 128,
            fonts: 4,
            waves: 256,
        }
    }
}

/// Streaming worker settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingConfig {
    /// Bytes read from the source for each device buffer, rounded down to
    /// whole sample frames by the worker
    pub read_bytes: usize,
    /// Pause between two device status polls
    pub poll_interval: Duration,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            read_bytes: 32768,
            poll_interval: Duration::from_millis(1),
        }
    }
}

/// Top-level configuration consumed by `System::new`
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Back buffer resolution in pixels
    pub resolution: UVec2,
    /// Start in fullscreen mode (read by the window/device layer)
    pub start_fullscreen: bool,
    pub limits: ResourceLimits,
    pub streaming: StreamingConfig,
    /// Analog stick dead zone per axis, in `(0, 1000)`
    pub joypad_threshold: IVec2,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            resolution: UVec2::new(640, 480),
            start_fullscreen: false,
            limits: ResourceLimits::default(),
            streaming: StreamingConfig::default(),
            joypad_threshold: IVec2::new(50, 50),
        }
    }
}

impl SystemConfig {
    /// Check every value before the subsystems are built
    ///
    /// # Errors
    ///
    /// `InitializationFailed` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.resolution.x == 0 || self.resolution.y == 0 {
            return Err(Error::InitializationFailed(format!(
                "resolution must be non-zero, got {}x{}",
                self.resolution.x, self.resolution.y
            )));
        }

        let limits = [
            ("textures", self.limits.textures),
            ("images", self.limits.images),
            ("fonts", self.limits.fonts),
            ("waves", self.limits.waves),
        ];
        for (name, value) in limits {
            if value == 0 || value > MAX_CAPACITY {
                return Err(Error::InitializationFailed(format!(
                    "{} limit must be in 1..={}, got {}",
                    name, MAX_CAPACITY, value
                )));
            }
        }

        if self.streaming.read_bytes == 0 {
            return Err(Error::InitializationFailed(
                "streaming read size must be non-zero".to_string(),
            ));
        }
        if self.streaming.poll_interval.is_zero() {
            return Err(Error::InitializationFailed(
                "streaming poll interval must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
