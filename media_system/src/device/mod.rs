/// Device module - platform collaborators consumed by the subsystems
///
/// Backends (Direct3D, DirectSound, test doubles) implement these traits;
/// the subsystems only ever talk to the traits.

pub mod graphics_device;
pub mod sound_device;

pub use graphics_device::*;
pub use sound_device::*;

// Mock devices for tests (no hardware required)
#[cfg(test)]
pub mod mock_graphics_device;
#[cfg(test)]
pub mod mock_sound_device;
