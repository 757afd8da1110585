/*!
# Media System

Runtime services for small 2D games: textured sprites and bitmap fonts,
one-shot and streamed WAV audio, and keyboard / joypad input folded into a
virtual pad.

Hardware is reached only through the device traits (`GraphicsDevice`,
`SoundDevice`); platform backends implement them and hand them to
`System::new`.

## Architecture

- **System**: composition root, drives one frame per `update` call
- **GraphicSystem**: texture, image and font tables, power save, device loss
- **SoundSystem**: wave table and the background streaming worker
- **InputState**: device snapshots mapped onto 14 virtual buttons
- **SlotAllocator**: two-level bitmap handing out the lowest free id

Resources are referred to by small integer ids. Each table has a fixed
capacity and always hands out the lowest free id.
*/

// Internal modules
mod error;
mod engine;
mod config;
mod system;
pub mod log;
pub mod utils;
pub mod device;
pub mod resource;
pub mod graphic;
pub mod sound;
pub mod input;

// Main msys namespace module
pub mod msys {
    // Error types
    pub use crate::error::{Error, ResourceKind, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Composition root and its configuration
    pub use crate::system::System;
    pub use crate::config::{ResourceLimits, StreamingConfig, SystemConfig};

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device traits implemented by platform backends
    pub mod device {
        pub use crate::device::*;
    }

    pub mod graphic {
        pub use crate::graphic::*;
    }

    pub mod sound {
        pub use crate::sound::*;
    }

    pub mod input {
        pub use crate::input::*;
    }

    pub mod resource {
        pub use crate::resource::{ResourceDesc, SampleFormat, WaveContainer, WaveFormat};
    }
}

// Re-export math library at crate root
pub use glam;
