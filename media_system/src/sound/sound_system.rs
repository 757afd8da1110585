/// Sound subsystem: one-shot waves and the streaming player
///
/// Waves live in a `ResourceTable`; each is a single playback buffer
/// holding a whole WAV data chunk. Long sources go through the
/// `StreamingPlayer`, which shares the same device.

use std::sync::{Arc, Mutex};
use crate::config::StreamingConfig;
use crate::device::SoundDevice;
use crate::error::{ResourceKind, Result};
use crate::resource::{ResourceDesc, ResourceTable};
use crate::{engine_debug, engine_report};
use super::streaming::{StreamingDesc, StreamingPhase, StreamingPlayer};
use super::wave::Wave;

const LOG_SOURCE: &str = "msys::Sound";

pub struct SoundSystem {
    device: Arc<Mutex<dyn SoundDevice>>,
    waves: ResourceTable<Wave>,
    streaming: StreamingPlayer,
}

impl SoundSystem {
    /// Create the subsystem
    ///
    /// # Arguments
    ///
    /// * `device` - Sound device, shared with the streaming worker
    /// * `wave_capacity` - Maximum number of live waves
    /// * `streaming` - Streaming worker settings
    pub fn new(
        device: Arc<Mutex<dyn SoundDevice>>,
        wave_capacity: u32,
        streaming: StreamingConfig,
    ) -> Result<Self> {
        let waves = ResourceTable::new(ResourceKind::Wave, wave_capacity)?;
        let streaming = StreamingPlayer::new(Arc::clone(&device), streaming);
        engine_debug!(LOG_SOURCE, "Sound system created ({} waves)", wave_capacity);
        Ok(Self { device, waves, streaming })
    }

    // ===== WAVES =====

    /// Load a WAV source into a new wave and return its id
    ///
    /// # Errors
    ///
    /// `IdExceedsLimit` when every wave id is taken, `InvalidSource` for a
    /// missing or malformed source, or the device error. On failure no id
    /// stays allocated.
    pub fn create_wave(&mut self, desc: &ResourceDesc) -> Result<u32> {
        let device = &self.device;
        self.waves
            .create(|_| Wave::load(device, desc))
            .map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Stop and release a wave, freeing its id
    pub fn release_wave(&mut self, id: u32) -> Result<()> {
        let wave = self.waves.release(id).map_err(|err| engine_report!(LOG_SOURCE, err))?;
        drop(wave);
        Ok(())
    }

    /// Play a wave from its current position
    pub fn play_wave(&mut self, id: u32) -> Result<()> {
        self.wave_mut(id)?
            .play()
            .map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Stop a wave and rewind it
    pub fn stop_wave(&mut self, id: u32) -> Result<()> {
        self.wave_mut(id)?
            .stop()
            .map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Borrow a live wave
    pub fn wave(&self, id: u32) -> Result<&Wave> {
        self.waves.get(id).map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Number of live waves
    pub fn wave_count(&self) -> u32 {
        self.waves.len()
    }

    fn wave_mut(&mut self, id: u32) -> Result<&mut Wave> {
        self.waves.get_mut(id).map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    // ===== STREAMING =====

    /// Start streaming a WAV source
    pub fn play_streaming(&mut self, desc: StreamingDesc) -> Result<()> {
        self.streaming.play(desc).map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Halt the streaming session without losing its position
    pub fn pause_streaming(&mut self) -> Result<()> {
        self.streaming.pause().map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Resume a paused streaming session
    pub fn continue_streaming(&mut self) -> Result<()> {
        self.streaming.resume().map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Stop the streaming session and release everything it holds
    ///
    /// Fails with `StreamingInactive`, without logging, when idle.
    pub fn stop_streaming(&mut self) -> Result<()> {
        self.streaming.stop()
    }

    pub fn streaming_phase(&self) -> StreamingPhase {
        self.streaming.phase()
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.is_active()
    }

    // ===== FRAME =====

    /// Per-frame housekeeping: reaps a streaming worker that ended on its own
    pub fn update(&mut self) {
        self.streaming.update();
    }
}

impl Drop for SoundSystem {
    fn drop(&mut self) {
        // Streaming first: the worker still uses the device
        if self.streaming.is_active() {
            let _ = self.streaming.stop();
        }
        self.waves.clear();
    }
}

#[cfg(test)]
#[path = "sound_system_tests.rs"]
mod tests;
