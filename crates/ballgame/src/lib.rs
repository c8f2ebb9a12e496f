use std::path::Path;

use anyhow::{Context, Result};

use ballgame_core::{BallGameApp, Game, LevelStore};
use ballgame_sdl2::ballgame_common::App;
use ballgame_sdl2::{SdlContext, SdlInitInfo};

/// Directory holding the level files, the ball sprite, and the font.
const GAMEDATA_DIR: &str = "gamedata";

pub fn run() -> Result<()> {
    let data_dir = Path::new(GAMEDATA_DIR);
    let levels = LevelStore::load(data_dir).context("failed to load levels")?;
    log::info!("loaded {} levels", levels.len());

    let game = Game::new(levels)?;
    let app = BallGameApp::new(game, data_dir.join("img/ball.bmp"));

    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .title(app.title())
        .font_path(data_dir.join("fonts/DejaVuSans.ttf"))
        .build();
    SdlContext::run(init_info, app)
}
