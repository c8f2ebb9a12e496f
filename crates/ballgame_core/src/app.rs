use std::path::PathBuf;

use anyhow::{Context, Result};

use ballgame_common::{App, Canvas, Color, Flip, Key, Rect, TextureId};

use crate::game::Game;
use crate::paddle::BOTTOM_MARGIN;
use crate::state::Phase;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const TEXT_COLOR: Color = Color::WHITE;
const PADDLE_COLOR: Color = Color::YELLOW;
const CREDIT_LINE: &str = "ballgame v0.1";

/// Frame driver: owns the simulation and turns each tick into canvas calls.
///
/// Implements the shared `App` trait so any frontend can drive the game the
/// same way.
pub struct BallGameApp {
    game: Game,
    ball_image: PathBuf,
    ball_texture: Option<TextureId>,
    should_exit: bool,
}

impl BallGameApp {
    pub fn new(game: Game, ball_image: PathBuf) -> BallGameApp {
        BallGameApp {
            game,
            ball_image,
            ball_texture: None,
            should_exit: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn render_blocks(&self, canvas: &mut dyn Canvas) {
        for block in &self.game.blocks {
            if block.is_live() {
                canvas.fill_rect(block.bounds(), block.color());
            }
        }
    }

    fn render_paddle(&self, canvas: &mut dyn Canvas) {
        let paddle = &self.game.paddle;
        let rect = Rect::new(
            paddle.pos,
            SCREEN_HEIGHT as i32 - paddle.height as i32 - BOTTOM_MARGIN,
            paddle.width,
            paddle.height,
        );
        canvas.fill_rect(rect, PADDLE_COLOR);
    }

    fn render_ball(&self, canvas: &mut dyn Canvas) {
        if let Some(texture) = self.ball_texture {
            canvas.draw_texture(
                texture,
                self.game.ball.x as i32,
                self.game.ball.y as i32,
                None,
                0.0,
                None,
                Flip::None,
            );
        }
    }

    fn render_hud(&self, canvas: &mut dyn Canvas) {
        let state = &self.game.state;
        let ball = &self.game.ball;
        let bottom = SCREEN_HEIGHT as i32;
        let focus = if state.speed_change_x { "x" } else { "y" };
        let lines = [
            (format!("level:    {}", state.current_level), 120, bottom - 150),
            (format!("x-velocity: {}", ball.vx as i32), 120, bottom - 130),
            (format!("y-velocity: {}", ball.vy as i32), 120, bottom - 110),
            (format!("focus: {focus}"), 80, bottom - 90),
            (format!("health: {}", state.health), 80, bottom - 70),
            (format!("points: {}", state.points), 80, bottom - 50),
        ];
        for (text, w, y) in lines {
            canvas.draw_text(&text, TEXT_COLOR, w, 20, 5, y);
        }
    }

    fn render_level_intro(&self, canvas: &mut dyn Canvas) {
        let (w, h) = (300u32, 100u32);
        let x = (SCREEN_WIDTH - w) as i32 / 2;
        let y = (SCREEN_HEIGHT - h) as i32 / 2;
        let text = format!("level {}", self.game.state.current_level);
        canvas.draw_text(&text, TEXT_COLOR, w, h, x, y);
        canvas.draw_text(CREDIT_LINE, TEXT_COLOR, 150, 15, 5, SCREEN_HEIGHT as i32 - 20);
    }

    fn render_run_end(&self, canvas: &mut dyn Canvas, won: bool) {
        let text = if won {
            "Congratulations! You won."
        } else {
            "You lost. Try again."
        };
        let (w, h) = (400u32, 100u32);
        let x = (SCREEN_WIDTH - w) as i32 / 2;
        let y = (SCREEN_HEIGHT - h) as i32 / 2;
        canvas.draw_text(text, TEXT_COLOR, w, h, x, y);
        let points = if won {
            self.game.state.points
        } else {
            self.game.final_points
        };
        canvas.draw_text(&format!("Points: {points}"), TEXT_COLOR, w, h, x, y + 120);
    }

    /// One frame of active play: collisions first, then either the live
    /// scene or the level-cleared transition. While paused the scene is
    /// re-rendered frozen.
    fn playing_frame(&mut self, canvas: &mut dyn Canvas) {
        let paused = self.game.state.pause;
        if !paused {
            self.game.check_blocks_hit();
        }
        if self.game.live_blocks() > 0 {
            self.render_blocks(canvas);
            if self.game.state.hud_visible {
                self.render_hud(canvas);
            }
            if !paused {
                self.game.advance_entities();
            }
            self.render_ball(canvas);
            self.render_paddle(canvas);
        } else {
            self.game.handle_level_cleared();
        }
    }
}

impl App for BallGameApp {
    fn init(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        log::info!("ballgame init");
        let texture = canvas
            .load_image(&self.ball_image)
            .context("failed to load ball image")?;
        self.ball_texture = Some(texture);
        Ok(())
    }

    fn update(&mut self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BLACK);
        match self.game.state.phase {
            Phase::LevelIntro => self.render_level_intro(canvas),
            Phase::Playing => self.playing_frame(canvas),
            Phase::GameWon => self.render_run_end(canvas, true),
            Phase::GameOver => self.render_run_end(canvas, false),
        }
        canvas.present();
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if !is_down {
            return;
        }
        if key == Key::Escape {
            self.should_exit = true;
            return;
        }
        self.game.handle_key(key);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("ballgame exit");
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT
    }

    fn title(&self) -> String {
        "ball game".to_string()
    }
}
