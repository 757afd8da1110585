/// Wave resource: a whole WAV data chunk held in one playback buffer

use std::sync::Mutex;
use crate::device::{BufferStatus, SoundBuffer, SoundBufferDesc, SoundDevice};
use crate::error::{Error, Result};
use crate::utils::lock;
use crate::resource::{ResourceDesc, WaveContainer, WaveFormat};

pub struct Wave {
    format: WaveFormat,
    buffer: Box<dyn SoundBuffer>,
}

impl Wave {
    /// Load the data chunk of `desc` into a buffer sized exactly to it
    pub fn load(device: &Mutex<dyn SoundDevice>, desc: &ResourceDesc) -> Result<Self> {
        let mut container = WaveContainer::open(desc)?;
        let format = container.format();
        let data = container.read_all()?;
        if data.is_empty() {
            return Err(Error::InvalidSource(format!("{}: empty data chunk", desc)));
        }

        let mut buffer = lock(device).create_buffer(&SoundBufferDesc {
            size: data.len(),
            format,
        })?;
        buffer.write(0, &data)?;

        Ok(Self { format, buffer })
    }

    pub fn format(&self) -> WaveFormat {
        self.format
    }

    /// Size of the sample data in bytes
    pub fn data_len(&self) -> usize {
        self.buffer.capacity()
    }

    /// Play from the current position
    pub fn play(&mut self) -> Result<()> {
        self.buffer.play()
    }

    /// Stop and rewind to the start
    pub fn stop(&mut self) -> Result<()> {
        self.buffer.stop()?;
        self.buffer.set_position(0)
    }

    pub fn is_playing(&self) -> Result<bool> {
        Ok(self.buffer.status()?.contains(BufferStatus::PLAYING))
    }
}

impl Drop for Wave {
    fn drop(&mut self) {
        // Halt playback before the buffer is released
        let _ = self.stop();
    }
}
