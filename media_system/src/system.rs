/// System: composition root owning the graphics, input and sound subsystems
///
/// The application drives it with one `update` call per frame and reads or
/// mutates the subsystems through the accessors in between.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use crate::config::SystemConfig;
use crate::device::{GraphicsDevice, SoundDevice};
use crate::error::{Error, Result};
use crate::graphic::GraphicSystem;
use crate::input::{InputState, RawInput};
use crate::sound::SoundSystem;
use crate::utils::FpsCounter;
use crate::{engine_debug, engine_error, engine_info, engine_report};

const LOG_SOURCE: &str = "msys::System";

pub struct System {
    // Declaration order is drop order: the streaming worker stops first
    sound: SoundSystem,
    input: InputState,
    graphic: GraphicSystem,
    fps: FpsCounter,
    config: SystemConfig,
    stopped: bool,
}

impl System {
    /// Validate `config` and build every subsystem
    ///
    /// # Arguments
    ///
    /// * `config` - Resolution, table capacities, streaming and joypad settings
    /// * `graphics_device` - Device the graphic subsystem draws with
    /// * `sound_device` - Device shared by waves and the streaming worker
    ///
    /// # Errors
    ///
    /// `InitializationFailed` for an invalid configuration.
    pub fn new(
        config: SystemConfig,
        graphics_device: Box<dyn GraphicsDevice>,
        sound_device: Arc<Mutex<dyn SoundDevice>>,
    ) -> Result<Self> {
        config.validate().map_err(|err| engine_report!(LOG_SOURCE, err))?;

        let graphic = GraphicSystem::new(graphics_device, config.resolution, &config.limits)?;

        let mut input = InputState::new();
        input.set_joypad_threshold(config.joypad_threshold.x, config.joypad_threshold.y);

        let sound = SoundSystem::new(sound_device, config.limits.waves, config.streaming)?;

        engine_info!(
            LOG_SOURCE,
            "System initialized ({}x{}{})",
            config.resolution.x,
            config.resolution.y,
            if config.start_fullscreen { ", fullscreen" } else { "" }
        );

        Ok(Self {
            sound,
            input,
            graphic,
            fps: FpsCounter::new(),
            config,
            stopped: false,
        })
    }

    /// Run one frame of housekeeping
    ///
    /// Presents the frame, takes the input snapshot and reaps a finished
    /// streaming worker. Losing the graphics device stops the system.
    ///
    /// # Arguments
    ///
    /// * `now` - Time since a fixed origin, used for the frame rate
    /// * `raw` - This frame's keyboard and joypad state
    ///
    /// # Returns
    ///
    /// `false` once the system is stopped.
    pub fn update(&mut self, now: Duration, raw: &RawInput) -> bool {
        if self.stopped {
            return false;
        }

        self.fps.tick(now);

        if let Err(Error::DeviceLost(_)) = self.graphic.update() {
            engine_error!(LOG_SOURCE, "Graphics device lost, stopping");
            self.stopped = true;
            return false;
        }

        self.input.update(raw);
        self.sound.update();
        true
    }

    /// Ask the frame loop to end; the next `update` returns `false`
    pub fn stop(&mut self) {
        if !self.stopped {
            engine_debug!(LOG_SOURCE, "Stop requested");
            self.stopped = true;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Average frame rate of the last 4 frames
    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn graphic(&self) -> &GraphicSystem {
        &self.graphic
    }

    pub fn graphic_mut(&mut self) -> &mut GraphicSystem {
        &mut self.graphic
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn sound(&self) -> &SoundSystem {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut SoundSystem {
        &mut self.sound
    }
}

impl Drop for System {
    fn drop(&mut self) {
        engine_debug!(LOG_SOURCE, "System shutting down");
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
