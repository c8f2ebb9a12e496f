use anyhow::{anyhow, Result};

use ballgame_common::Key;

use crate::ball::{Ball, BallStep};
use crate::block::Block;
use crate::level::{LevelDefinition, LevelStore};
use crate::paddle::{Direction, Paddle};
use crate::state::{GameState, Phase, STARTING_HEALTH};

/// The whole simulation: level data, live entities, and session state.
/// Owned by the frame driver and only mutated from the single game tick, so
/// nothing here needs interior mutability or statics.
pub struct Game {
    levels: LevelStore,
    /// Definition of the level currently being played.
    level: LevelDefinition,
    pub blocks: Vec<Block>,
    pub ball: Ball,
    pub paddle: Paddle,
    pub state: GameState,
    /// Score of the run that just ended, shown on the loss screen after the
    /// live counter has been reset.
    pub final_points: i32,
}

impl Game {
    /// Builds the simulation and loads the first level.
    pub fn new(levels: LevelStore) -> Result<Game> {
        let first = levels
            .get(1)
            .ok_or_else(|| anyhow!("level store is empty"))?
            .clone();
        let mut game = Game {
            levels,
            level: first,
            blocks: Vec::new(),
            ball: Ball::default(),
            paddle: Paddle::default(),
            state: GameState::default(),
            final_points: 0,
        };
        game.load_level(1)?;
        game.ball.moving = true;
        Ok(game)
    }

    pub fn levels(&self) -> &LevelStore {
        &self.levels
    }

    /// Currently active level definition.
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// Rebuilds the blocks and resets paddle, ball, and health for the given
    /// 1-based level number.
    pub fn load_level(&mut self, number: u32) -> Result<()> {
        let level = self
            .levels
            .get(number)
            .ok_or_else(|| anyhow!("no such level: {number}"))?
            .clone();
        self.blocks = level.build_blocks();
        self.paddle.width = level.paddle_width_ini;
        self.paddle.reset_centered();
        self.ball.reset_for_level(&level);
        self.state.health = STARTING_HEALTH;
        self.state.current_level = number;
        self.level = level;
        log::info!("loaded level {number}");
        Ok(())
    }

    pub fn live_blocks(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_live()).count()
    }

    /// Resolves at most one ball/block hit per tick. Blocks are scanned in
    /// index order, so on overlapping candidates the lowest row/column wins.
    pub fn check_blocks_hit(&mut self) {
        for block in &mut self.blocks {
            if !block.is_live() {
                continue;
            }
            if block.overlaps_ball(self.ball.x, self.ball.y, self.ball.radius) {
                block.resistance -= 1;
                self.state.points += 1;
                self.ball.vy = -self.ball.vy;
                self.ball.y += self.ball.vy;
                return;
            }
        }
    }

    /// Advances ball and paddle one tick. A lost life that exhausts health
    /// ends the run.
    pub fn advance_entities(&mut self) {
        let step = self
            .ball
            .advance(&mut self.paddle, &mut self.state, &self.level);
        if step == BallStep::LifeLost && self.state.health <= 0 {
            self.end_run();
        }
        self.paddle.advance();
    }

    /// All blocks are gone: bring up the next level's intro banner, or the
    /// win screen after the last level.
    pub fn handle_level_cleared(&mut self) {
        self.state.pause = true;
        if self.state.current_level < self.levels.last_level() {
            let next = self.state.current_level + 1;
            match self.load_level(next) {
                Ok(()) => {
                    self.state.phase = Phase::LevelIntro;
                    log::info!("level cleared, next up: {next}");
                }
                Err(err) => log::error!("failed to load level {next}: {err:#}"),
            }
        } else {
            log::info!("final level cleared, {} points", self.state.points);
            self.state.phase = Phase::GameWon;
        }
    }

    /// Health ran out: snapshot the score for the loss screen, then reset
    /// the session back to level 1 defaults. The run only restarts when the
    /// player asks for it.
    fn end_run(&mut self) {
        self.final_points = self.state.points;
        log::info!("out of health, run over with {} points", self.final_points);
        self.state.hud_visible = false;
        if let Err(err) = self.load_level(1) {
            log::error!("failed to reload level 1: {err:#}");
        }
        self.state.points = 0;
        self.state.health = STARTING_HEALTH;
        self.state.pause = true;
        self.state.phase = Phase::GameOver;
    }

    /// Input routing; called for every key-down the frontend delivers.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::P => self.toggle_pause(),
            Key::H => self.state.hud_visible = !self.state.hud_visible,
            Key::Left => self.paddle.set_direction(Some(Direction::Left)),
            Key::Right => self.paddle.set_direction(Some(Direction::Right)),
            Key::Up => self.state.speed_change_x = !self.state.speed_change_x,
            Key::Escape | Key::None => {}
        }
    }

    /// The pause key doubles as the banner-dismiss and manual-restart key.
    fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::LevelIntro => {
                self.state.phase = Phase::Playing;
                self.state.pause = false;
            }
            Phase::Playing => self.state.pause = !self.state.pause,
            Phase::GameOver => {
                // Level 1 was already reloaded when the run ended.
                self.state.phase = Phase::LevelIntro;
                self.state.pause = true;
            }
            Phase::GameWon => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{GRID_COLS, GRID_ROWS};
    use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

    fn level_with_grid(id: u32, grid: [[u32; GRID_COLS]; GRID_ROWS]) -> LevelDefinition {
        LevelDefinition {
            id,
            rows: 5,
            paddle_width_ini: 200,
            vx_ini: 0.0,
            vy_ini: 5.0,
            v_max: 10.0,
            grid,
        }
    }

    fn single_block_grid(resistance: u32) -> [[u32; GRID_COLS]; GRID_ROWS] {
        let mut grid = [[0u32; GRID_COLS]; GRID_ROWS];
        grid[0][0] = resistance;
        grid
    }

    fn game_with_levels(levels: Vec<LevelDefinition>) -> Game {
        Game::new(LevelStore::from_levels(levels)).unwrap()
    }

    /// Centers the ball on a block so the overlap test passes.
    fn put_ball_on_block(game: &mut Game, index: usize) {
        let block = &game.blocks[index];
        game.ball.x = block.x as f32 + block.width as f32 / 2.0;
        game.ball.y = block.y as f32 + block.height as f32 / 2.0;
    }

    #[test]
    fn new_game_starts_at_level_one_with_blocks_built() {
        let game = game_with_levels(vec![level_with_grid(1, single_block_grid(2))]);
        assert_eq!(game.state.current_level, 1);
        assert_eq!(game.live_blocks(), 1);
        assert_eq!(game.paddle.width, 200);
        assert!(game.ball.moving);
        assert_eq!(game.state.phase, Phase::LevelIntro);
    }

    #[test]
    fn empty_store_is_rejected() {
        assert!(Game::new(LevelStore::from_levels(Vec::new())).is_err());
    }

    #[test]
    fn block_hit_decrements_resistance_and_scores() {
        let mut game = game_with_levels(vec![level_with_grid(1, single_block_grid(1))]);
        game.ball.vy = 5.0;
        put_ball_on_block(&mut game, 0);
        game.check_blocks_hit();
        assert_eq!(game.live_blocks(), 0);
        assert_eq!(game.state.points, 1);
        // The ball rebounds: vy reflected and applied once.
        assert_eq!(game.ball.vy, -5.0);
    }

    #[test]
    fn overlapping_blocks_resolve_lowest_index_first() {
        let mut grid = [[0u32; GRID_COLS]; GRID_ROWS];
        grid[0][3] = 2;
        grid[0][7] = 2;
        let mut game = game_with_levels(vec![level_with_grid(1, grid)]);
        // Force block 7 onto block 3's bounding box.
        game.blocks[7].x = game.blocks[3].x;
        game.blocks[7].y = game.blocks[3].y;
        put_ball_on_block(&mut game, 3);

        game.check_blocks_hit();
        assert_eq!(game.blocks[3].resistance, 1);
        assert_eq!(game.blocks[7].resistance, 2);
        assert_eq!(game.state.points, 1);
    }

    #[test]
    fn one_hit_per_tick_even_with_many_live_blocks() {
        let mut game = game_with_levels(vec![level_with_grid(1, [[1; GRID_COLS]; GRID_ROWS])]);
        put_ball_on_block(&mut game, 0);
        game.check_blocks_hit();
        assert_eq!(game.state.points, 1);
        assert_eq!(game.live_blocks(), GRID_ROWS * GRID_COLS - 1);
    }

    #[test]
    fn clearing_a_mid_level_advances_to_next_intro() {
        let levels = vec![
            level_with_grid(1, single_block_grid(1)),
            level_with_grid(2, single_block_grid(3)),
        ];
        let mut game = game_with_levels(levels);
        game.blocks[0].resistance = 0;

        game.handle_level_cleared();
        assert_eq!(game.state.current_level, 2);
        assert_eq!(game.state.phase, Phase::LevelIntro);
        assert!(game.state.pause);
        assert_eq!(game.live_blocks(), 1);
        assert_eq!(game.blocks[0].resistance, 3);
        assert_eq!(game.state.health, STARTING_HEALTH);
    }

    #[test]
    fn clearing_the_last_level_wins_the_game() {
        let mut game = game_with_levels(vec![level_with_grid(1, single_block_grid(1))]);
        game.state.points = 42;
        game.blocks[0].resistance = 0;

        game.handle_level_cleared();
        assert_eq!(game.state.phase, Phase::GameWon);
        assert!(game.state.pause);
        // Points survive onto the win screen.
        assert_eq!(game.state.points, 42);
    }

    #[test]
    fn three_fall_throughs_end_the_run_and_reset_defaults() {
        let levels = vec![
            level_with_grid(1, single_block_grid(1)),
            level_with_grid(2, single_block_grid(1)),
        ];
        let mut game = game_with_levels(levels);
        game.state.phase = Phase::Playing;
        game.state.pause = false;
        // Park the paddle off to the side so the falling ball misses it.
        game.paddle.pos = 20;

        for fall in 1..=3 {
            game.ball.x = 900.0;
            game.ball.y = SCREEN_HEIGHT as f32 + 1.0;
            game.advance_entities();
            if fall < 3 {
                assert_eq!(game.state.health, STARTING_HEALTH - fall);
                assert_eq!(game.state.points, -10 * fall);
                assert_eq!(game.state.phase, Phase::Playing);
            }
        }

        assert_eq!(game.state.phase, Phase::GameOver);
        assert_eq!(game.final_points, -30);
        assert_eq!(game.state.points, 0);
        assert_eq!(game.state.health, STARTING_HEALTH);
        assert_eq!(game.state.current_level, 1);
        assert!(game.state.pause);
        assert!(!game.state.hud_visible);
    }

    #[test]
    fn pause_key_walks_the_phase_machine() {
        let mut game = game_with_levels(vec![level_with_grid(1, single_block_grid(1))]);
        assert_eq!(game.state.phase, Phase::LevelIntro);

        game.handle_key(Key::P);
        assert_eq!(game.state.phase, Phase::Playing);
        assert!(!game.state.pause);

        game.handle_key(Key::P);
        assert!(game.state.pause);
        game.handle_key(Key::P);
        assert!(!game.state.pause);

        game.state.phase = Phase::GameOver;
        game.handle_key(Key::P);
        assert_eq!(game.state.phase, Phase::LevelIntro);

        game.state.phase = Phase::GameWon;
        game.handle_key(Key::P);
        assert_eq!(game.state.phase, Phase::GameWon);
    }

    #[test]
    fn direction_keys_steer_the_paddle() {
        let mut game = game_with_levels(vec![level_with_grid(1, single_block_grid(1))]);
        game.handle_key(Key::Left);
        assert!(game.paddle.moving);
        assert_eq!(game.paddle.dir, Direction::Left);
        game.handle_key(Key::Right);
        assert_eq!(game.paddle.dir, Direction::Right);
    }

    #[test]
    fn axis_focus_toggles() {
        let mut game = game_with_levels(vec![level_with_grid(1, single_block_grid(1))]);
        assert!(!game.state.speed_change_x);
        game.handle_key(Key::Up);
        assert!(game.state.speed_change_x);
        game.handle_key(Key::Up);
        assert!(!game.state.speed_change_x);
    }

    #[test]
    fn load_level_centers_paddle_with_level_width() {
        let mut narrow = level_with_grid(2, single_block_grid(1));
        narrow.paddle_width_ini = 100;
        let mut game =
            game_with_levels(vec![level_with_grid(1, single_block_grid(1)), narrow]);
        game.load_level(2).unwrap();
        assert_eq!(game.paddle.width, 100);
        assert_eq!(game.paddle.pos, (SCREEN_WIDTH as i32 - 100) / 2);
        assert!(game.load_level(9).is_err());
    }
}
