/// Health a run starts each level with.
pub const STARTING_HEALTH: i32 = 3;

/// Progression of one play session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Banner before a level starts; simulation frozen until dismissed.
    LevelIntro,
    Playing,
    /// Terminal win screen after clearing the last level.
    GameWon,
    /// Loss screen; the pause key restarts from level 1.
    GameOver,
}

/// Mutable session state threaded through the simulation. Owned by the
/// simulation context, never a process-wide static.
#[derive(Debug, Clone)]
pub struct GameState {
    /// May go negative: lost lives cost points.
    pub points: i32,
    pub health: i32,
    /// Paddle bounces adjust |vx| when set, |vy| otherwise.
    pub speed_change_x: bool,
    pub hud_visible: bool,
    /// 1-based level number shown to the player.
    pub current_level: u32,
    /// Freezes the simulation; input is still handled.
    pub pause: bool,
    pub phase: Phase,
}

impl Default for GameState {
    fn default() -> GameState {
        GameState {
            points: 0,
            health: STARTING_HEALTH,
            speed_change_x: false,
            hud_visible: false,
            current_level: 1,
            pause: true,
            phase: Phase::LevelIntro,
        }
    }
}

impl GameState {
    /// 0-based index for the 1-based level number.
    pub fn level_index(&self) -> usize {
        self.current_level.saturating_sub(1) as usize
    }
}
