/// Sprite: a textured quad covering a sub-rectangle of a texture
///
/// Geometry is built once, in clip space, for a fixed back buffer
/// resolution: the quad's top-left corner sits at the clip origin and the
/// draw call moves it with a translation derived from the pixel position.

use bytemuck::{Pod, Zeroable};
use glam::{UVec2, Vec2};
use crate::device::{DeviceBuffer, DeviceTexture, GraphicsDevice};
use crate::error::{Error, Result};
use super::color::Color;

/// Depth of every 2D quad
const QUAD_DEPTH: f32 = 0.5;

/// Vertex layout shared with the device's 2D pipeline
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
}

/// Orientation of the texture on the quad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    #[default]
    Default,
    /// Mirrored left to right
    HInvert,
    /// Mirrored top to bottom
    VInvert,
    Rot90,
    Rot180,
    Rot270,
}

impl ImageMode {
    /// For each quad corner (top-left, top-right, bottom-left,
    /// bottom-right), the texture corner it samples
    pub fn corner_order(self) -> [usize; 4] {
        match self {
            ImageMode::Default => [0, 1, 2, 3],
            ImageMode::HInvert => [1, 0, 3, 2],
            ImageMode::VInvert => [2, 3, 0, 1],
            ImageMode::Rot90 => [2, 0, 3, 1],
            ImageMode::Rot180 => [3, 2, 1, 0],
            ImageMode::Rot270 => [1, 3, 0, 2],
        }
    }
}

/// Pixel rectangle of a texture; zero width or height means the full texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Quad vertices and on-screen pixel size for a texture region
pub fn build_quad(
    resolution: UVec2,
    texture_size: UVec2,
    region: Region,
    scale: f32,
    mode: ImageMode,
) -> Result<([Vertex; 4], UVec2)> {
    if texture_size.x == 0 || texture_size.y == 0 {
        return Err(Error::InvalidResource(format!(
            "texture has no pixels ({}x{})",
            texture_size.x, texture_size.y
        )));
    }

    let w = if region.w == 0 { texture_size.x } else { region.w } as f32;
    let h = if region.h == 0 { texture_size.y } else { region.h } as f32;

    // Pixel extent to clip space (y grows upward)
    let end_x = scale * w * 2.0 / resolution.x as f32;
    let end_y = -(scale * h * 2.0 / resolution.y as f32);
    let positions = [
        [0.0, 0.0, QUAD_DEPTH],
        [end_x, 0.0, QUAD_DEPTH],
        [0.0, end_y, QUAD_DEPTH],
        [end_x, end_y, QUAD_DEPTH],
    ];

    let tex_w = texture_size.x as f32;
    let tex_h = texture_size.y as f32;
    let u0 = region.x as f32 / tex_w;
    let v0 = region.y as f32 / tex_h;
    let u1 = u0 + w / tex_w;
    let v1 = v0 + h / tex_h;
    let corners = [[u0, v0], [u1, v0], [u0, v1], [u1, v1]];

    let order = mode.corner_order();
    let vertices = std::array::from_fn(|i| Vertex {
        position: positions[i],
        texcoord: corners[order[i]],
    });

    let size = UVec2::new((w * scale) as u32, (h * scale) as u32);
    Ok((vertices, size))
}

/// Clip space translation placing a quad's top-left corner at `position` (pixels)
pub fn clip_translation(position: Vec2, resolution: UVec2) -> Vec2 {
    Vec2::new(
        position.x / resolution.x as f32 * 2.0 - 1.0,
        -position.y / resolution.y as f32 * 2.0 + 1.0,
    )
}

pub struct Sprite {
    size: UVec2,
    vertices: Box<dyn DeviceBuffer>,
}

impl Sprite {
    /// Build the quad for `region` and upload it
    pub fn create(
        device: &mut dyn GraphicsDevice,
        resolution: UVec2,
        texture_size: UVec2,
        region: Region,
        scale: f32,
        mode: ImageMode,
    ) -> Result<Self> {
        let (vertices, size) = build_quad(resolution, texture_size, region, scale, mode)?;
        let vertices = device.create_vertex_buffer(bytemuck::cast_slice(&vertices))?;
        Ok(Self { size, vertices })
    }

    /// On-screen size in pixels
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn draw(
        &self,
        device: &mut dyn GraphicsDevice,
        texture: &dyn DeviceTexture,
        resolution: UVec2,
        position: Vec2,
        color: Color,
    ) -> Result<()> {
        device.draw_quad(
            texture,
            self.vertices.as_ref(),
            clip_translation(position, resolution),
            color.to_vec4(),
        )
    }
}

#[cfg(test)]
#[path = "sprite_tests.rs"]
mod tests;
