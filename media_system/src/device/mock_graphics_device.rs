/// Mock graphics device for unit tests (no GPU required)

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use glam::{UVec2, Vec2, Vec4};
use crate::device::{DeviceBuffer, DeviceTexture, GraphicsDevice, PresentStatus};
use crate::error::{Error, Result};
use crate::resource::ResourceDesc;

// ============================================================================
// Shared state
// ============================================================================

/// One recorded draw_quad call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture_size: UVec2,
    pub vertex_bytes: usize,
    pub translation: Vec2,
    pub color: Vec4,
}

#[derive(Debug)]
pub struct MockGraphicsState {
    pub textures_created: usize,
    pub textures_released: usize,
    pub buffers_created: usize,
    pub buffers_released: usize,
    /// Initial data of every vertex buffer, in creation order
    pub vertex_data: Vec<Vec<u8>>,
    pub clears: Vec<Vec4>,
    pub draws: Vec<DrawCall>,
    pub presents: usize,
    /// Results handed out by present(), `Presented` once empty
    pub present_results: VecDeque<Result<PresentStatus>>,
    /// Size of the next textures
    pub texture_size: UVec2,
    /// Fail every create_texture call
    pub fail_texture: bool,
}

impl Default for MockGraphicsState {
    fn default() -> Self {
        Self {
            textures_created: 0,
            textures_released: 0,
            buffers_created: 0,
            buffers_released: 0,
            vertex_data: Vec::new(),
            clears: Vec::new(),
            draws: Vec::new(),
            presents: 0,
            present_results: VecDeque::new(),
            texture_size: UVec2::new(256, 128),
            fail_texture: false,
        }
    }
}

impl MockGraphicsState {
    pub fn live_textures(&self) -> usize {
        self.textures_created - self.textures_released
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers_created - self.buffers_released
    }
}

fn lock(state: &Mutex<MockGraphicsState>) -> MutexGuard<'_, MockGraphicsState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Mock Texture / Buffer
// ============================================================================

pub struct MockTexture {
    state: Arc<Mutex<MockGraphicsState>>,
    size: UVec2,
}

impl DeviceTexture for MockTexture {
    fn size(&self) -> UVec2 {
        self.size
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        lock(&self.state).textures_released += 1;
    }
}

pub struct MockBuffer {
    state: Arc<Mutex<MockGraphicsState>>,
    size: usize,
}

impl DeviceBuffer for MockBuffer {
    fn size(&self) -> usize {
        self.size
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        lock(&self.state).buffers_released += 1;
    }
}

// ============================================================================
// Mock Graphics Device
// ============================================================================

pub struct MockGraphicsDevice {
    state: Arc<Mutex<MockGraphicsState>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(MockGraphicsState::default())) }
    }

    /// Handle on the shared state, kept by tests after the device is moved
    pub fn state(&self) -> Arc<Mutex<MockGraphicsState>> {
        Arc::clone(&self.state)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: &ResourceDesc) -> Result<Box<dyn DeviceTexture>> {
        let mut state = lock(&self.state);
        if state.fail_texture {
            return Err(Error::InvalidSource(format!("{}: cannot decode image", desc)));
        }
        state.textures_created += 1;
        Ok(Box::new(MockTexture {
            state: Arc::clone(&self.state),
            size: state.texture_size,
        }))
    }

    fn create_vertex_buffer(&mut self, data: &[u8]) -> Result<Box<dyn DeviceBuffer>> {
        let mut state = lock(&self.state);
        state.buffers_created += 1;
        state.vertex_data.push(data.to_vec());
        Ok(Box::new(MockBuffer {
            state: Arc::clone(&self.state),
            size: data.len(),
        }))
    }

    fn clear(&mut self, color: Vec4) -> Result<()> {
        lock(&self.state).clears.push(color);
        Ok(())
    }

    fn draw_quad(
        &mut self,
        texture: &dyn DeviceTexture,
        vertices: &dyn DeviceBuffer,
        translation: Vec2,
        color: Vec4,
    ) -> Result<()> {
        lock(&self.state).draws.push(DrawCall {
            texture_size: texture.size(),
            vertex_bytes: vertices.size(),
            translation,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<PresentStatus> {
        let mut state = lock(&self.state);
        state.presents += 1;
        state.present_results.pop_front().unwrap_or(Ok(PresentStatus::Presented))
    }
}

/// Lock helper for tests
pub fn snapshot<R>(
    state: &Arc<Mutex<MockGraphicsState>>,
    f: impl FnOnce(&mut MockGraphicsState) -> R,
) -> R {
    f(&mut lock(state))
}
