/// SoundDevice trait and playback buffer types

use bitflags::bitflags;
use crate::error::Result;
use crate::resource::WaveFormat;

bitflags! {
    /// Playback status reported by a sound buffer
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BufferStatus: u32 {
        /// The buffer is currently playing
        const PLAYING = 1 << 0;
        /// The buffer restarts at its end
        const LOOPING = 1 << 1;
        /// The device lost the buffer memory (device removed or reset)
        const BUFFER_LOST = 1 << 2;
    }
}

/// Descriptor for creating a playback buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundBufferDesc {
    /// Size in bytes
    pub size: usize,
    /// PCM layout of the bytes written into the buffer
    pub format: WaveFormat,
}

/// Fixed-capacity playback buffer
///
/// Implemented by backend-specific buffer types.
/// The buffer is released when dropped.
pub trait SoundBuffer: Send {
    /// Size in bytes
    fn capacity(&self) -> usize;

    /// Copy `data` into the buffer starting at `offset`
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()>;

    /// Start playing from the current position
    fn play(&mut self) -> Result<()>;

    /// Stop playing, keeping the current position
    fn stop(&mut self) -> Result<()>;

    /// Move the play cursor (bytes from the start of the buffer)
    fn set_position(&mut self, position: usize) -> Result<()>;

    /// Current playback status
    fn status(&self) -> Result<BufferStatus>;
}

/// Sound device trait
///
/// Factory for playback buffers. Shared between the main thread and the
/// streaming worker behind an `Arc<Mutex<dyn SoundDevice>>`.
pub trait SoundDevice: Send {
    /// Create a playback buffer
    fn create_buffer(&mut self, desc: &SoundBufferDesc) -> Result<Box<dyn SoundBuffer>>;
}
