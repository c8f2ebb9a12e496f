use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use sdl2::event::Event;
use sdl2::image::{InitFlag, LoadSurface};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::{Point as SdlPoint, Rect as SdlRect};
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::surface::Surface;
use sdl2::ttf::Font;
use sdl2::video::WindowContext;
use typed_builder::TypedBuilder;

use ballgame_common::{App, Canvas, Color, Flip, Key, Point, Rect, TextureId};
pub use ballgame_common;
pub use sdl2;

/// Window and asset settings for the SDL2 frontend.
#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub font_path: PathBuf,
    #[builder(default = 150)]
    pub font_point_size: u16,
    /// Delay appended to every frame; it paces the whole simulation.
    #[builder(default = Duration::from_millis(15))]
    pub frame_delay: Duration,
}

/// `Canvas` implementation over an SDL2 window renderer.
///
/// Textures created through `load_image` stay alive for the whole run; the
/// game refers to them through opaque `TextureId`s. Text is rasterized per
/// call with a single font loaded at startup.
pub struct SdlCanvas<'a> {
    canvas: &'a mut WindowCanvas,
    texture_creator: &'a TextureCreator<WindowContext>,
    font: &'a Font<'a, 'static>,
    textures: Vec<Texture<'a>>,
}

impl Canvas for SdlCanvas<'_> {
    fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(map_color(color));
        self.canvas.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.set_draw_color(map_color(color));
        if let Err(err) = self.canvas.fill_rect(map_rect(rect)) {
            log::warn!("fill_rect failed: {err}");
        }
    }

    fn load_image(&mut self, path: &Path) -> Result<TextureId> {
        let surface = Surface::from_file(path)
            .map_err(|err| anyhow!("unable to load image {}: {err}", path.display()))?;
        let texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .with_context(|| format!("unable to create texture from {}", path.display()))?;
        self.textures.push(texture);
        Ok(TextureId::new(self.textures.len() - 1))
    }

    fn draw_texture(
        &mut self,
        texture: TextureId,
        x: i32,
        y: i32,
        clip: Option<Rect>,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    ) {
        let Some(tex) = self.textures.get(texture.index()) else {
            log::warn!("draw_texture with unknown texture {texture:?}");
            return;
        };
        let query = tex.query();
        let (w, h) = match clip {
            Some(clip) => (clip.w, clip.h),
            None => (query.width, query.height),
        };
        let dst = SdlRect::new(x, y, w, h);
        let (flip_h, flip_v) = match flip {
            Flip::None => (false, false),
            Flip::Horizontal => (true, false),
            Flip::Vertical => (false, true),
        };
        if let Err(err) = self.canvas.copy_ex(
            tex,
            clip.map(map_rect),
            Some(dst),
            angle,
            center.map(map_point),
            flip_h,
            flip_v,
        ) {
            log::warn!("draw_texture failed: {err}");
        }
    }

    fn draw_text(&mut self, text: &str, color: Color, w: u32, h: u32, x: i32, y: i32) {
        let rendered = match self.font.render(text).solid(map_color(color)) {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("text render failed: {err}");
                return;
            }
        };
        let texture = match self.texture_creator.create_texture_from_surface(&rendered) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("text texture failed: {err}");
                return;
            }
        };
        if let Err(err) = self
            .canvas
            .copy(&texture, None, Some(SdlRect::new(x, y, w, h)))
        {
            log::warn!("text draw failed: {err}");
        }
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}

pub struct SdlContext;

impl SdlContext {
    /// Brings up SDL2, SDL_image, and SDL_ttf, then drives `app` through the
    /// poll/update/delay loop until it asks to exit or the window is closed.
    /// Any initialization failure aborts with a diagnostic.
    pub fn run(init: SdlInitInfo, mut app: impl App) -> Result<()> {
        let SdlInitInfo {
            width,
            height,
            title,
            font_path,
            font_point_size,
            frame_delay,
        } = init;

        let sdl_context = sdl2::init().map_err(|err| anyhow!("SDL init failed: {err}"))?;
        let video_subsystem = sdl_context
            .video()
            .map_err(|err| anyhow!("SDL video init failed: {err}"))?;
        let _image_context = sdl2::image::init(InitFlag::PNG)
            .map_err(|err| anyhow!("SDL_image init failed: {err}"))?;
        let ttf_context = sdl2::ttf::init().context("SDL_ttf init failed")?;

        let window = video_subsystem
            .window(&title, width, height)
            .position_centered()
            .build()?;
        let mut canvas = window.into_canvas().accelerated().build()?;
        let texture_creator = canvas.texture_creator();
        let font = ttf_context
            .load_font(&font_path, font_point_size)
            .map_err(|err| anyhow!("unable to load font {}: {err}", font_path.display()))?;

        let mut event_pump = sdl_context
            .event_pump()
            .map_err(|err| anyhow!("SDL event pump failed: {err}"))?;
        let mut sdl_canvas = SdlCanvas {
            canvas: &mut canvas,
            texture_creator: &texture_creator,
            font: &font,
            textures: Vec::new(),
        };

        app.init(&mut sdl_canvas)?;
        loop {
            if app.should_exit() {
                app.exit();
                break;
            }

            for event in event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => {
                        app.exit();
                        return Ok(());
                    }
                    Event::KeyDown {
                        keycode: Some(keycode),
                        ..
                    } => app.handle_key_event(map_keycode(keycode), true),
                    Event::KeyUp {
                        keycode: Some(keycode),
                        ..
                    } => app.handle_key_event(map_keycode(keycode), false),
                    _ => {}
                }
            }

            app.update(&mut sdl_canvas);
            std::thread::sleep(frame_delay);
        }

        Ok(())
    }
}

pub fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::P => Key::P,
        Keycode::H => Key::H,
        Keycode::Escape => Key::Escape,
        _ => Key::None,
    }
}

fn map_color(color: Color) -> SdlColor {
    let (r, g, b, a) = color.rgba();
    SdlColor::RGBA(r, g, b, a)
}

fn map_rect(rect: Rect) -> SdlRect {
    SdlRect::new(rect.x, rect.y, rect.w, rect.h)
}

fn map_point(point: Point) -> SdlPoint {
    SdlPoint::new(point.x, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycode_mapping_covers_game_keys() {
        assert_eq!(map_keycode(Keycode::Left), Key::Left);
        assert_eq!(map_keycode(Keycode::Right), Key::Right);
        assert_eq!(map_keycode(Keycode::Up), Key::Up);
        assert_eq!(map_keycode(Keycode::P), Key::P);
        assert_eq!(map_keycode(Keycode::H), Key::H);
        assert_eq!(map_keycode(Keycode::Escape), Key::Escape);
        assert_eq!(map_keycode(Keycode::Z), Key::None);
    }
}
