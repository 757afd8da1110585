/// Image: a sprite over a region of a texture owned by the texture table

use crate::device::{DeviceTexture, GraphicsDevice};
use crate::error::Result;
use glam::UVec2;
use super::sprite::{ImageMode, Region, Sprite};

/// Image creation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDesc {
    /// Texture the image samples
    pub texture_id: u32,
    /// Left edge of the region (pixels)
    pub x: u32,
    /// Top edge of the region (pixels)
    pub y: u32,
    /// Region width, 0 for the full texture width
    pub w: u32,
    /// Region height, 0 for the full texture height
    pub h: u32,
    /// On-screen scale factor
    pub scale: f32,
    pub mode: ImageMode,
}

impl ImageDesc {
    /// Whole texture at scale 1
    pub fn new(texture_id: u32) -> Self {
        Self {
            texture_id,
            x: 0,
            y: 0,
            w: 0,
            h: 0,
            scale: 1.0,
            mode: ImageMode::Default,
        }
    }

    pub fn region(mut self, x: u32, y: u32, w: u32, h: u32) -> Self {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn mode(mut self, mode: ImageMode) -> Self {
        self.mode = mode;
        self
    }
}

pub struct Image {
    texture_id: u32,
    sprite: Sprite,
}

impl Image {
    pub(crate) fn create(
        device: &mut dyn GraphicsDevice,
        resolution: UVec2,
        texture: &dyn DeviceTexture,
        desc: &ImageDesc,
    ) -> Result<Self> {
        let region = Region { x: desc.x, y: desc.y, w: desc.w, h: desc.h };
        let sprite = Sprite::create(device, resolution, texture.size(), region, desc.scale, desc.mode)?;
        Ok(Self { texture_id: desc.texture_id, sprite })
    }

    pub fn texture_id(&self) -> u32 {
        self.texture_id
    }

    /// Scaled size in pixels
    pub fn size(&self) -> UVec2 {
        self.sprite.size()
    }

    pub(crate) fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}
