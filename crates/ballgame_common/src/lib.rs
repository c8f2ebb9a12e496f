pub mod app;
pub mod canvas;
pub mod color;
pub mod key;

pub use app::App;
pub use canvas::{Canvas, Flip, Point, Rect, TextureId};
pub use color::Color;
pub use key::Key;
