/// GraphicsDevice trait and GPU resource types

use glam::{UVec2, Vec2, Vec4};
use crate::error::Result;
use crate::resource::ResourceDesc;

/// Outcome of presenting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentStatus {
    /// The frame reached the output
    Presented,
    /// The output is hidden (minimized, covered); nothing was shown
    Occluded,
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types.
/// The texture is destroyed when dropped.
pub trait DeviceTexture: Send {
    /// Size in pixels
    fn size(&self) -> UVec2;
}

/// Vertex buffer resource trait
///
/// The buffer is destroyed when dropped.
pub trait DeviceBuffer: Send {
    /// Size in bytes
    fn size(&self) -> usize;
}

/// Graphics device trait
///
/// Creates GPU resources and records the few commands the 2D layer needs.
/// Errors of kind `DeviceLost` mean every resource created so far is gone.
pub trait GraphicsDevice: Send {
    /// Load a texture from an image source
    fn create_texture(&mut self, desc: &ResourceDesc) -> Result<Box<dyn DeviceTexture>>;

    /// Create an immutable vertex buffer initialized with `data`
    fn create_vertex_buffer(&mut self, data: &[u8]) -> Result<Box<dyn DeviceBuffer>>;

    /// Clear the back buffer (normalized RGBA)
    fn clear(&mut self, color: Vec4) -> Result<()>;

    /// Draw one textured quad
    ///
    /// # Arguments
    ///
    /// * `texture` - Texture sampled by the quad
    /// * `vertices` - Four vertices (triangle strip) in clip space
    /// * `translation` - Clip space offset applied to every vertex
    /// * `color` - Normalized RGBA modulation color
    fn draw_quad(
        &mut self,
        texture: &dyn DeviceTexture,
        vertices: &dyn DeviceBuffer,
        translation: Vec2,
        color: Vec4,
    ) -> Result<()>;

    /// Present the back buffer
    fn present(&mut self) -> Result<PresentStatus>;
}
