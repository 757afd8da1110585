//! 2D graphics: textures, images and bitmap fonts

pub mod color;
pub mod sprite;
pub mod image;
pub mod font;
pub mod graphic_system;

pub use color::Color;
pub use sprite::{ImageMode, Vertex};
pub use image::{Image, ImageDesc};
pub use font::{FontAnchor, FontDesc, FONT_CHARSET};
pub use graphic_system::GraphicSystem;
