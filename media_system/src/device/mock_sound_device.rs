/// Mock sound device for unit tests (no audio hardware required)
///
/// Every buffer reports to a shared `MockSoundState` so tests can observe
/// what the streaming worker and the wave table did, and steer playback.

use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use crate::device::{BufferStatus, SoundBuffer, SoundBufferDesc, SoundDevice};
use crate::error::{Error, Result};

// ============================================================================
// Shared state
// ============================================================================

#[derive(Debug, Default)]
pub struct MockSoundState {
    /// Buffers created so far
    pub created: usize,
    /// Buffers dropped so far
    pub released: usize,
    /// Bytes of every write, in order
    pub writes: Vec<Vec<u8>>,
    pub play_calls: usize,
    pub stop_calls: usize,
    /// Fail every create_buffer call
    pub fail_create: bool,
    /// Report BUFFER_LOST from every status query
    pub buffer_lost: bool,
    /// Status polls a playing buffer needs before it finishes.
    /// `None` keeps buffers playing until `drain` is set.
    pub polls_until_done: Option<u32>,
    /// Finish every playing buffer at its next status query
    pub drain: bool,
}

impl MockSoundState {
    pub fn live(&self) -> usize {
        self.created - self.released
    }
}

fn lock(state: &Mutex<MockSoundState>) -> MutexGuard<'_, MockSoundState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Mock Sound Buffer
// ============================================================================

pub struct MockSoundBuffer {
    state: Arc<Mutex<MockSoundState>>,
    data: Vec<u8>,
    position: usize,
    playing: Cell<bool>,
    polls_left: Cell<Option<u32>>,
}

impl MockSoundBuffer {
    pub fn position(&self) -> usize {
        self.position
    }
}

impl SoundBuffer for MockSoundBuffer {
    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let end = offset + data.len();
        if end > self.data.len() {
            return Err(Error::BackendError(format!(
                "write of {} bytes at {} overflows {} byte buffer",
                data.len(), offset, self.data.len()
            )));
        }
        self.data[offset..end].copy_from_slice(data);
        lock(&self.state).writes.push(data.to_vec());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        state.play_calls += 1;
        self.playing.set(true);
        self.polls_left.set(state.polls_until_done);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        lock(&self.state).stop_calls += 1;
        self.playing.set(false);
        Ok(())
    }

    fn set_position(&mut self, position: usize) -> Result<()> {
        self.position = position;
        Ok(())
    }

    fn status(&self) -> Result<BufferStatus> {
        let state = lock(&self.state);
        if state.buffer_lost {
            return Ok(BufferStatus::BUFFER_LOST);
        }
        if self.playing.get() {
            if state.drain {
                self.playing.set(false);
            } else if let Some(left) = self.polls_left.get() {
                if left == 0 {
                    self.playing.set(false);
                } else {
                    self.polls_left.set(Some(left - 1));
                }
            }
        }
        Ok(if self.playing.get() { BufferStatus::PLAYING } else { BufferStatus::empty() })
    }
}

impl Drop for MockSoundBuffer {
    fn drop(&mut self) {
        lock(&self.state).released += 1;
    }
}

// ============================================================================
// Mock Sound Device
// ============================================================================

pub struct MockSoundDevice {
    state: Arc<Mutex<MockSoundState>>,
}

impl MockSoundDevice {
    /// Create a device whose buffers finish after one status poll
    pub fn new() -> Self {
        Self::with_state(MockSoundState {
            polls_until_done: Some(1),
            ..Default::default()
        })
    }

    pub fn with_state(state: MockSoundState) -> Self {
        Self { state: Arc::new(Mutex::new(state)) }
    }

    /// Handle on the shared state, kept by tests after the device is moved
    pub fn state(&self) -> Arc<Mutex<MockSoundState>> {
        Arc::clone(&self.state)
    }
}

impl SoundDevice for MockSoundDevice {
    fn create_buffer(&mut self, desc: &SoundBufferDesc) -> Result<Box<dyn SoundBuffer>> {
        let mut state = lock(&self.state);
        if state.fail_create {
            return Err(Error::BackendError("mock buffer creation failed".to_string()));
        }
        state.created += 1;
        Ok(Box::new(MockSoundBuffer {
            state: Arc::clone(&self.state),
            data: vec![0; desc.size],
            position: 0,
            playing: Cell::new(false),
            polls_left: Cell::new(None),
        }))
    }
}

/// Lock helper for tests
pub fn snapshot<R>(state: &Arc<Mutex<MockSoundState>>, f: impl FnOnce(&mut MockSoundState) -> R) -> R {
    f(&mut lock(state))
}
