/// Bitmap fonts
///
/// A font texture is a grid of 16 columns by 4 rows of equally sized glyph
/// cells. Cell `row * 16 + column` holds the glyph for the character at the
/// same position in `FONT_CHARSET`.

use glam::{UVec2, Vec2};
use crate::device::{DeviceTexture, GraphicsDevice};
use crate::error::Result;
use crate::resource::ResourceDesc;
use super::color::Color;
use super::sprite::{ImageMode, Region, Sprite};

pub const GLYPH_COLUMNS: u32 = 16;
pub const GLYPH_ROWS: u32 = 4;
pub const GLYPH_COUNT: usize = (GLYPH_COLUMNS * GLYPH_ROWS) as usize;

/// Characters in glyph order
pub const FONT_CHARSET: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\] ";

/// Glyph index for `c`, 0 for characters outside the charset
///
/// The charset is ASCII, so byte positions are glyph indices. It lists the
/// space twice; the last cell wins.
pub fn glyph_index(c: char) -> usize {
    FONT_CHARSET.rfind(c).unwrap_or(0)
}

/// Font creation parameters
#[derive(Debug, Clone)]
pub struct FontDesc {
    /// Glyph sheet image
    pub source: ResourceDesc,
    pub scale: f32,
    pub mode: ImageMode,
}

impl FontDesc {
    pub fn new(source: ResourceDesc) -> Self {
        Self { source, scale: 1.0, mode: ImageMode::Default }
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

/// Point of the text box placed at the draw position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontAnchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl FontAnchor {
    /// Offset from the anchor point back to the text box's top-left corner
    pub fn offset(self, text_size: Vec2) -> Vec2 {
        let (fx, fy) = match self {
            FontAnchor::TopLeft => (0.0, 0.0),
            FontAnchor::TopCenter => (0.5, 0.0),
            FontAnchor::TopRight => (1.0, 0.0),
            FontAnchor::MiddleLeft => (0.0, 0.5),
            FontAnchor::MiddleCenter => (0.5, 0.5),
            FontAnchor::MiddleRight => (1.0, 0.5),
            FontAnchor::BottomLeft => (0.0, 1.0),
            FontAnchor::BottomCenter => (0.5, 1.0),
            FontAnchor::BottomRight => (1.0, 1.0),
        };
        -Vec2::new(text_size.x * fx, text_size.y * fy)
    }
}

/// Font: its own texture plus one sprite per glyph cell
pub struct Font {
    // Sprites are dropped before the texture they sample
    glyphs: Vec<Sprite>,
    texture: Box<dyn DeviceTexture>,
}

impl Font {
    pub(crate) fn create(
        device: &mut dyn GraphicsDevice,
        resolution: UVec2,
        desc: &FontDesc,
    ) -> Result<Self> {
        let texture = device.create_texture(&desc.source)?;
        let texture_size = texture.size();
        let cell = UVec2::new(texture_size.x / GLYPH_COLUMNS, texture_size.y / GLYPH_ROWS);

        let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
        for row in 0..GLYPH_ROWS {
            for column in 0..GLYPH_COLUMNS {
                let region = Region {
                    x: cell.x * column,
                    y: cell.y * row,
                    w: cell.x,
                    h: cell.y,
                };
                glyphs.push(Sprite::create(
                    device,
                    resolution,
                    texture_size,
                    region,
                    desc.scale,
                    desc.mode,
                )?);
            }
        }

        Ok(Self { glyphs, texture })
    }

    /// Size of one glyph on screen
    pub fn glyph_size(&self) -> UVec2 {
        self.glyphs.first().map(Sprite::size).unwrap_or(UVec2::ZERO)
    }

    /// Size of the box `text` occupies on one line
    pub fn text_size(&self, text: &str) -> UVec2 {
        let glyph = self.glyph_size();
        UVec2::new(glyph.x * text.chars().count() as u32, glyph.y)
    }

    /// Draw `text` with its `anchor` point at `position`
    pub(crate) fn draw_text(
        &self,
        device: &mut dyn GraphicsDevice,
        resolution: UVec2,
        position: Vec2,
        color: Color,
        anchor: FontAnchor,
        text: &str,
    ) -> Result<()> {
        let origin = position + anchor.offset(self.text_size(text).as_vec2());
        let advance = self.glyph_size().x as f32;

        for (k, c) in text.chars().enumerate() {
            let glyph = &self.glyphs[glyph_index(c)];
            let pen = Vec2::new(origin.x + advance * k as f32, origin.y);
            glyph.draw(device, self.texture.as_ref(), resolution, pen, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "font_tests.rs"]
mod tests;
