//! Streaming audio playback
//!
//! One background worker plays a long WAV source chunk by chunk: it reads
//! at most `read_bytes` (rounded down to whole frames) from the data chunk, copies them into a playback
//! buffer sized exactly to the read, starts it, and only reads the next
//! chunk once the device reports that buffer as no longer playing.
//!
//! The controlling thread and the worker share a `SessionState` behind a
//! single mutex. The controller only flips `paused` / `stop_requested` (and
//! stops or restarts the current buffer); the worker polls the flags once per
//! iteration. Lock order is session, then device.
//!
//! A worker that ends on its own (missing source, end of a non-looping
//! source, device removal) leaves its handle behind until it is reaped by
//! `update()` or the next control call.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use crate::config::StreamingConfig;
use crate::device::{BufferStatus, SoundBuffer, SoundBufferDesc, SoundDevice};
use crate::error::{Error, Result};
use crate::utils::lock;
use crate::resource::{ResourceDesc, WaveContainer, WaveFormat};
use crate::{engine_debug, engine_error, engine_warn};

const LOG_SOURCE: &str = "msys::Streaming";

/// Descriptor for a streaming session
#[derive(Debug, Clone)]
pub struct StreamingDesc {
    /// WAV source, re-opened at every loop
    pub source: ResourceDesc,
    /// Restart from the beginning when the source ends
    pub looping: bool,
}

impl StreamingDesc {
    pub fn new(source: ResourceDesc) -> Self {
        Self { source, looping: false }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

/// Observable state of the streaming player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamingPhase {
    /// No worker
    Idle,
    /// Worker running and submitting chunks
    Streaming,
    /// Worker running, current chunk halted, no new chunk submitted
    Paused,
    /// Worker exited or asked to exit, not joined yet
    Stopping,
}

// ===== SHARED STATE =====

/// State shared by the controller and the worker
#[derive(Default)]
struct SessionState {
    stop_requested: bool,
    paused: bool,
    /// Buffer of the most recently submitted chunk
    current_chunk: Option<Box<dyn SoundBuffer>>,
}


// ===== PLAYER =====

/// Owner of the single streaming session
///
/// `worker` being `Some` is the session's active flag: it is set when the
/// thread is spawned and cleared only after the thread is joined and its
/// last buffer released.
pub struct StreamingPlayer {
    device: Arc<Mutex<dyn SoundDevice>>,
    config: StreamingConfig,
    session: Arc<Mutex<SessionState>>,
    worker: Option<JoinHandle<()>>,
}

impl StreamingPlayer {
    pub fn new(device: Arc<Mutex<dyn SoundDevice>>, config: StreamingConfig) -> Self {
        Self {
            device,
            config,
            session: Arc::new(Mutex::new(SessionState::default())),
            worker: None,
        }
    }

    /// Start streaming `desc` on a new worker thread
    ///
    /// The source is opened by the worker, so a missing or malformed file
    /// does not fail this call: the worker exits and the session goes back
    /// to idle once reaped.
    ///
    /// # Errors
    ///
    /// `StreamingActive` when a session is already running (it is left
    /// untouched), `BackendError` when the thread cannot be spawned.
    pub fn play(&mut self, desc: StreamingDesc) -> Result<()> {
        self.reap_finished();
        if self.worker.is_some() {
            return Err(Error::StreamingActive);
        }

        *lock(&self.session) = SessionState::default();

        let worker = Worker {
            source: desc.source,
            looping: desc.looping,
            config: self.config,
            device: Arc::clone(&self.device),
            session: Arc::clone(&self.session),
        };

        let handle = thread::Builder::new()
            .name("msys-streaming".to_string())
            .spawn(move || worker.run())
            .map_err(|err| crate::engine_err!(LOG_SOURCE, "Cannot spawn streaming worker: {}", err))?;

        self.worker = Some(handle);
        engine_debug!(LOG_SOURCE, "Streaming started (looping: {})", desc.looping);
        Ok(())
    }

    /// Halt the current chunk and keep the worker from submitting more
    ///
    /// The chunk keeps its play position, so `resume` continues mid-chunk.
    ///
    /// # Errors
    ///
    /// `StreamingInactive` when no session runs or nothing is buffered yet.
    pub fn pause(&mut self) -> Result<()> {
        self.reap_finished();
        if self.worker.is_none() {
            return Err(Error::StreamingInactive);
        }

        let mut session = lock(&self.session);
        let chunk = session.current_chunk.as_mut().ok_or(Error::StreamingInactive)?;
        chunk.stop()?;
        session.paused = true;
        Ok(())
    }

    /// Restart the current chunk and let the worker submit again
    ///
    /// # Errors
    ///
    /// `StreamingInactive` when no session runs or nothing is buffered yet.
    pub fn resume(&mut self) -> Result<()> {
        self.reap_finished();
        if self.worker.is_none() {
            return Err(Error::StreamingInactive);
        }

        let mut session = lock(&self.session);
        let chunk = session.current_chunk.as_mut().ok_or(Error::StreamingInactive)?;
        chunk.play()?;
        session.paused = false;
        Ok(())
    }

    /// Stop the session, join the worker and release its last buffer
    ///
    /// Blocks until the worker observes the request, which takes at most
    /// one poll interval plus one chunk read.
    ///
    /// # Errors
    ///
    /// `StreamingInactive` when no session exists (nothing is touched).
    pub fn stop(&mut self) -> Result<()> {
        if self.worker.is_none() {
            return Err(Error::StreamingInactive);
        }

        lock(&self.session).stop_requested = true;
        self.teardown();
        engine_debug!(LOG_SOURCE, "Streaming stopped");
        Ok(())
    }

    /// Reap a worker that ended on its own
    pub fn update(&mut self) {
        self.reap_finished();
    }

    /// Whether a worker exists (running, or ended and not reaped yet)
    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    pub fn phase(&self) -> StreamingPhase {
        let Some(handle) = &self.worker else {
            return StreamingPhase::Idle;
        };
        let session = lock(&self.session);
        if session.stop_requested || handle.is_finished() {
            StreamingPhase::Stopping
        } else if session.paused {
            StreamingPhase::Paused
        } else {
            StreamingPhase::Streaming
        }
    }

    fn reap_finished(&mut self) {
        let finished = self.worker.as_ref().is_some_and(|handle| handle.is_finished());
        if finished {
            self.teardown();
            engine_debug!(LOG_SOURCE, "Finished streaming worker reaped");
        }
    }

    /// Join the worker, release its buffer and reset the shared state
    fn teardown(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                engine_error!(LOG_SOURCE, "Streaming worker panicked");
            }
        }

        let mut session = lock(&self.session);
        if let Some(mut chunk) = session.current_chunk.take() {
            if let Err(err) = chunk.stop() {
                engine_warn!(LOG_SOURCE, "Cannot stop last streaming buffer: {}", err);
            }
        }
        *session = SessionState::default();
    }
}

impl Drop for StreamingPlayer {
    fn drop(&mut self) {
        if self.worker.is_some() {
            let _ = self.stop();
        }
    }
}

// ===== WORKER =====

/// How one pass over the source ended
enum PassEnd {
    EndOfSource,
    StopRequested,
    DeviceRemoved,
    Failed,
}

/// Largest whole number of frames in `read_bytes`, never less than one frame
fn frame_aligned(read_bytes: usize, block_align: u16) -> usize {
    let block_align = (block_align as usize).max(1);
    (read_bytes / block_align).max(1) * block_align
}

/// Everything the worker thread owns
struct Worker {
    source: ResourceDesc,
    looping: bool,
    config: StreamingConfig,
    device: Arc<Mutex<dyn SoundDevice>>,
    session: Arc<Mutex<SessionState>>,
}

impl Worker {
    fn run(self) {
        engine_debug!(LOG_SOURCE, "Worker started for {}", self.source);
        let mut chunk = Vec::new();

        loop {
            let mut container = match WaveContainer::open(&self.source) {
                Ok(container) => container,
                Err(err) => {
                    engine_warn!(LOG_SOURCE, "Streaming source unavailable: {}", err);
                    break;
                }
            };

            match self.stream_pass(&mut container, &mut chunk) {
                PassEnd::EndOfSource => {}
                PassEnd::StopRequested | PassEnd::Failed => break,
                PassEnd::DeviceRemoved => {
                    engine_error!(LOG_SOURCE, "Sound device removed, streaming ends");
                    break;
                }
            }

            if !self.looping || lock(&self.session).stop_requested {
                break;
            }
            // An empty source would otherwise be re-opened without pause
            thread::sleep(self.config.poll_interval);
        }

        engine_debug!(LOG_SOURCE, "Worker finished");
    }

    /// Play the source once, from its first data byte to its last
    fn stream_pass(&self, container: &mut WaveContainer, chunk: &mut Vec<u8>) -> PassEnd {
        let format = container.format();
        let read_len = frame_aligned(self.config.read_bytes, format.block_align());
        chunk.resize(read_len, 0);
        let mut status = BufferStatus::empty();
        // Bytes read but not submitted yet (a pause landed in between)
        let mut pending: Option<usize> = None;

        loop {
            let paused = {
                let session = lock(&self.session);
                if session.stop_requested {
                    return PassEnd::StopRequested;
                }
                session.paused
            };

            if pending.is_none() && !paused && !status.contains(BufferStatus::PLAYING) {
                // Read outside the lock
                match container.read_chunk(chunk) {
                    Ok(0) => return PassEnd::EndOfSource,
                    Ok(read) => pending = Some(read),
                    Err(err) => {
                        engine_warn!(LOG_SOURCE, "Streaming read failed: {}", err);
                        return PassEnd::Failed;
                    }
                }
            }

            let mut session = lock(&self.session);
            if session.stop_requested {
                return PassEnd::StopRequested;
            }

            if let Some(current) = session.current_chunk.as_ref() {
                status = match current.status() {
                    Ok(status) if !status.contains(BufferStatus::BUFFER_LOST) => status,
                    _ => return PassEnd::DeviceRemoved,
                };
            }

            if let Some(read) = pending {
                if !session.paused && !status.contains(BufferStatus::PLAYING) {
                    match self.submit(&chunk[..read], format) {
                        Ok(buffer) => session.current_chunk = Some(buffer),
                        Err(err) => {
                            engine_error!(LOG_SOURCE, "Cannot submit streaming chunk: {}", err);
                            return PassEnd::Failed;
                        }
                    }
                    pending = None;
                    status = BufferStatus::PLAYING;
                }
            }
            drop(session);

            thread::sleep(self.config.poll_interval);
        }
    }

    /// Create a buffer sized to `data`, fill it and start it
    ///
    /// Called with the session lock held.
    fn submit(&self, data: &[u8], format: WaveFormat) -> Result<Box<dyn SoundBuffer>> {
        let mut buffer = lock(&self.device).create_buffer(&SoundBufferDesc {
            size: data.len(),
            format,
        })?;
        buffer.write(0, data)?;
        buffer.play()?;
        Ok(buffer)
    }
}

#[cfg(test)]
#[path = "streaming_tests.rs"]
mod tests;
