use std::path::Path;

use anyhow::Result;

use crate::color::Color;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Rect {
        Rect { x, y, w, h }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Flip {
    None,
    Horizontal,
    Vertical,
}

/// Opaque handle for a texture owned by the frontend.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TextureId(usize);

impl TextureId {
    #[inline]
    pub const fn new(index: usize) -> TextureId {
        TextureId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Rendering collaborator the game draws through. The core never touches a
/// graphics library directly; a frontend implements this over whatever it
/// renders with.
///
/// Draw calls are fire-and-forget: a frontend logs and drops failures rather
/// than surfacing them mid-frame. Only `load_image` can fail, at startup.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Loads an image file into a texture kept alive by the frontend.
    fn load_image(&mut self, path: &Path) -> Result<TextureId>;
    /// Draws a loaded texture at (x, y), optionally clipped, rotated around
    /// `center`, and flipped.
    fn draw_texture(
        &mut self,
        texture: TextureId,
        x: i32,
        y: i32,
        clip: Option<Rect>,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    );
    /// Draws `text` scaled into a w x h box whose top-left corner is (x, y).
    fn draw_text(&mut self, text: &str, color: Color, w: u32, h: u32, x: i32, y: i32);
    fn present(&mut self);
}
