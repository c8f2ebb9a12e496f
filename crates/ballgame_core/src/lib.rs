pub mod app;
pub mod ball;
pub mod block;
pub mod game;
pub mod level;
pub mod paddle;
pub mod state;

pub use app::BallGameApp;
pub use game::Game;
pub use level::{LevelDefinition, LevelStore};
pub use state::{GameState, Phase};

/// Fixed window size; the block grid geometry and the paddle clamp assume it.
pub const SCREEN_WIDTH: u32 = 1024;
pub const SCREEN_HEIGHT: u32 = 768;
