/// Graphics subsystem: textures, images, fonts and the per-frame present
///
/// All three resource kinds live in id tables. Images borrow a texture
/// from the texture table by id and only check it is still alive when
/// drawn; fonts own their texture.

use glam::{UVec2, Vec2};
use crate::config::ResourceLimits;
use crate::device::{DeviceTexture, GraphicsDevice, PresentStatus};
use crate::error::{Error, ResourceKind, Result};
use crate::resource::{ResourceDesc, ResourceTable};
use crate::{engine_debug, engine_error, engine_report};
use super::color::Color;
use super::font::{Font, FontAnchor, FontDesc};
use super::image::{Image, ImageDesc};

const LOG_SOURCE: &str = "msys::Graphic";

pub struct GraphicSystem {
    // Declaration order is drop order: dependents go before the device
    fonts: ResourceTable<Font>,
    images: ResourceTable<Image>,
    textures: ResourceTable<Box<dyn DeviceTexture>>,
    device: Box<dyn GraphicsDevice>,
    resolution: UVec2,
    power_save: bool,
}

impl GraphicSystem {
    /// Create the subsystem
    ///
    /// # Arguments
    ///
    /// * `device` - Graphics device drawing to the back buffer
    /// * `resolution` - Back buffer size in pixels, used for all quad geometry
    /// * `limits` - Table capacities
    pub fn new(
        device: Box<dyn GraphicsDevice>,
        resolution: UVec2,
        limits: &ResourceLimits,
    ) -> Result<Self> {
        if resolution.x == 0 || resolution.y == 0 {
            return Err(Error::InitializationFailed(format!(
                "resolution {}x{} has no pixels",
                resolution.x, resolution.y
            )));
        }

        let system = Self {
            fonts: ResourceTable::new(ResourceKind::Font, limits.fonts)?,
            images: ResourceTable::new(ResourceKind::Image, limits.images)?,
            textures: ResourceTable::new(ResourceKind::Texture, limits.textures)?,
            device,
            resolution,
            power_save: false,
        };
        engine_debug!(
            LOG_SOURCE,
            "Graphic system created ({}x{}, {} textures, {} images, {} fonts)",
            resolution.x,
            resolution.y,
            limits.textures,
            limits.images,
            limits.fonts
        );
        Ok(system)
    }

    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    /// Whether the output is hidden and drawing is skipped
    pub fn is_power_save(&self) -> bool {
        self.power_save
    }

    // ===== TEXTURES =====

    /// Load a texture and return its id
    pub fn create_texture(&mut self, desc: &ResourceDesc) -> Result<u32> {
        let device = &mut self.device;
        let result = self.textures.create(|_| device.create_texture(desc));
        self.checked(result)
    }

    /// Release a texture
    ///
    /// Images built on it stay allocated but can no longer be drawn.
    pub fn release_texture(&mut self, id: u32) -> Result<()> {
        let result = self.textures.release(id).map(drop);
        self.checked(result)
    }

    /// Texture size in pixels
    pub fn texture_size(&self, id: u32) -> Result<UVec2> {
        self.textures
            .get(id)
            .map(|texture| texture.size())
            .map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    pub fn texture_count(&self) -> u32 {
        self.textures.len()
    }

    // ===== IMAGES =====

    /// Build an image over a region of a live texture and return its id
    ///
    /// # Errors
    ///
    /// `IdExceedsLimit` when every image id is taken, `InvalidId` /
    /// `NullId` (texture) when `desc.texture_id` is not a live texture.
    pub fn create_image(&mut self, desc: &ImageDesc) -> Result<u32> {
        let Self { images, textures, device, resolution, .. } = self;
        let result = images.create(|_| {
            let texture = textures.get(desc.texture_id)?;
            Image::create(&mut **device, *resolution, texture.as_ref(), desc)
        });
        self.checked(result)
    }

    pub fn release_image(&mut self, id: u32) -> Result<()> {
        let result = self.images.release(id).map(drop);
        self.checked(result)
    }

    /// Scaled image size in pixels
    pub fn image_size(&self, id: u32) -> Result<UVec2> {
        self.images
            .get(id)
            .map(Image::size)
            .map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    pub fn image_count(&self) -> u32 {
        self.images.len()
    }

    /// Draw an image with its top-left corner at `position` (pixels)
    ///
    /// Skipped in power save.
    pub fn draw_image(&mut self, id: u32, position: Vec2, color: Color) -> Result<()> {
        if self.power_save {
            return Ok(());
        }
        let result = self.draw_image_unchecked(id, position, color);
        self.checked(result)
    }

    fn draw_image_unchecked(&mut self, id: u32, position: Vec2, color: Color) -> Result<()> {
        let image = self.images.get(id)?;
        let texture = self.textures.get(image.texture_id())?;
        image
            .sprite()
            .draw(self.device.as_mut(), texture.as_ref(), self.resolution, position, color)
    }

    // ===== FONTS =====

    /// Load a font sheet and return its id
    pub fn create_font(&mut self, desc: &FontDesc) -> Result<u32> {
        let Self { fonts, device, resolution, .. } = self;
        let result = fonts.create(|_| Font::create(&mut **device, *resolution, desc));
        self.checked(result)
    }

    pub fn release_font(&mut self, id: u32) -> Result<()> {
        let result = self.fonts.release(id).map(drop);
        self.checked(result)
    }

    /// Size of one glyph in pixels
    pub fn font_size(&self, id: u32) -> Result<UVec2> {
        self.fonts
            .get(id)
            .map(Font::glyph_size)
            .map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    /// Size of the box `text` occupies
    pub fn text_size(&self, id: u32, text: &str) -> Result<UVec2> {
        self.fonts
            .get(id)
            .map(|font| font.text_size(text))
            .map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    pub fn font_count(&self) -> u32 {
        self.fonts.len()
    }

    /// Draw one line of text with its `anchor` point at `position`
    ///
    /// Skipped in power save.
    pub fn draw_text(
        &mut self,
        id: u32,
        position: Vec2,
        color: Color,
        anchor: FontAnchor,
        text: &str,
    ) -> Result<()> {
        if self.power_save {
            return Ok(());
        }
        let result = match self.fonts.get(id) {
            Ok(font) => font.draw_text(self.device.as_mut(), self.resolution, position, color, anchor, text),
            Err(err) => Err(err),
        };
        self.checked(result)
    }

    // ===== FRAME =====

    /// Clear the back buffer
    ///
    /// Skipped in power save.
    pub fn fill_screen(&mut self, color: Color) -> Result<()> {
        if self.power_save {
            return Ok(());
        }
        let result = self.device.clear(color.to_vec4());
        self.checked(result)
    }

    /// Present the frame and track the output's visibility
    ///
    /// # Errors
    ///
    /// `DeviceLost` after every texture, image and font has been released.
    pub fn update(&mut self) -> Result<()> {
        match self.device.present() {
            Ok(PresentStatus::Presented) => {
                if self.power_save {
                    engine_debug!(LOG_SOURCE, "Output visible again, leaving power save");
                    self.power_save = false;
                }
                Ok(())
            }
            Ok(PresentStatus::Occluded) => {
                if !self.power_save {
                    engine_debug!(LOG_SOURCE, "Output occluded, entering power save");
                    self.power_save = true;
                }
                Ok(())
            }
            Err(err) => self.checked(Err(err)),
        }
    }

    /// Report a failure, tearing everything down first when the device is gone
    fn checked<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(Error::DeviceLost(_)) = &result {
            self.release_all();
        }
        result.map_err(|err| engine_report!(LOG_SOURCE, err))
    }

    fn release_all(&mut self) {
        engine_error!(
            LOG_SOURCE,
            "Graphics device lost, releasing {} fonts, {} images, {} textures",
            self.fonts.len(),
            self.images.len(),
            self.textures.len()
        );
        self.fonts.clear();
        self.images.clear();
        self.textures.clear();
    }
}

#[cfg(test)]
#[path = "graphic_system_tests.rs"]
mod tests;
