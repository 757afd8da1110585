//! Frame rate counter
//!
//! Keeps the instantaneous rate of the last few frames and reports their
//! average, starting from zeroed samples.

use std::collections::VecDeque;
use std::time::Duration;

/// Number of frame rate samples averaged by `FpsCounter`
pub const FPS_SAMPLE_COUNT: usize = 4;

#[derive(Debug, Clone)]
pub struct FpsCounter {
    samples: VecDeque<f64>,
    last_tick: Option<Duration>,
    fps: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            samples: std::iter::repeat(0.0).take(FPS_SAMPLE_COUNT).collect(),
            last_tick: None,
            fps: 0.0,
        }
    }

    /// Record a frame boundary at `now` (time since an arbitrary fixed origin)
    ///
    /// The first tick only sets the reference point. Ticks that do not
    /// advance the clock are ignored.
    pub fn tick(&mut self, now: Duration) {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return;
        };

        let Some(delta) = now.checked_sub(last).filter(|d| !d.is_zero()) else {
            return;
        };
        self.last_tick = Some(now);

        self.samples.pop_front();
        self.samples.push_back(1.0 / delta.as_secs_f64());
        self.fps = self.samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
    }

    /// Average frame rate over the last `FPS_SAMPLE_COUNT` frames
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "fps_counter_tests.rs"]
mod tests;
