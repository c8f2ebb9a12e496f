use crate::level::LevelDefinition;
use crate::paddle::Paddle;
use crate::state::GameState;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Ticks a paddle bounce stays on cooldown before the next may trigger.
pub const BOUNCE_HOLD_TICKS: u32 = 30;
/// Distance the right wall sits in from the screen edge.
const WALL_MARGIN: f32 = 10.0;
/// Speed magnitude drop applied instead of a clamp once a component reaches
/// the level cap.
const OVERSHOOT_RESET: f32 = 4.0;

/// What a single ball step produced.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BallStep {
    Flying,
    /// The ball fell past the bottom edge; ball and paddle were reset and
    /// health/points already deducted.
    LifeLost,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub radius: f32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub moving: bool,
    /// Frames counted since the last paddle bounce; 0 means ready to bounce
    /// again.
    pub cooldown: u32,
}

impl Default for Ball {
    fn default() -> Ball {
        Ball {
            radius: 10.0,
            x: SCREEN_WIDTH as f32 / 2.0,
            y: SCREEN_HEIGHT as f32 / 1.75,
            vx: 0.0,
            vy: 5.0,
            moving: false,
            cooldown: 0,
        }
    }
}

impl Ball {
    /// Puts the ball back at its serve position with the level's start
    /// velocity.
    pub fn reset_for_level(&mut self, level: &LevelDefinition) {
        self.x = SCREEN_WIDTH as f32 / 2.0;
        self.y = SCREEN_HEIGHT as f32 / 1.5;
        self.vx = level.vx_ini;
        self.vy = level.vy_ini;
        self.cooldown = 0;
    }

    /// One movement tick. Order matters: cooldown, horizontal walls, x step,
    /// then exactly one of paddle bounce / top reflection / fall-through,
    /// then the single y step for this tick.
    pub fn advance(
        &mut self,
        paddle: &mut Paddle,
        state: &mut GameState,
        level: &LevelDefinition,
    ) -> BallStep {
        if !self.moving {
            return BallStep::Flying;
        }

        if self.cooldown > 0 {
            self.cooldown += 1;
            if self.cooldown >= BOUNCE_HOLD_TICKS {
                self.cooldown = 0;
            }
        }

        if self.x + self.radius >= SCREEN_WIDTH as f32 - WALL_MARGIN {
            self.vx = -self.vx;
        }
        if self.x - self.radius <= 0.0 {
            self.vx = -self.vx;
        }
        self.x += self.vx;

        let (left, right) = paddle.span();
        if self.y + 2.0 * self.radius > paddle.bounce_line()
            && self.x >= left as f32
            && self.x <= right as f32
            && self.cooldown == 0
        {
            self.cooldown = 1;
            if state.speed_change_x {
                self.vx = adjust_magnitude(self.vx, level.v_max);
            } else {
                self.vy = adjust_magnitude(self.vy, level.v_max);
            }
            self.vy = -self.vy;
            self.y += self.vy;
            return BallStep::Flying;
        }

        let mut step = BallStep::Flying;
        if self.y < 0.0 {
            self.vy = -self.vy;
        } else if self.y > SCREEN_HEIGHT as f32 {
            self.reset_for_level(level);
            paddle.reset_centered();
            state.health -= 1;
            state.points -= 10;
            step = BallStep::LifeLost;
        }
        self.y += self.vy;
        step
    }
}

/// Paddle bounces push the adjusted component 1 faster each bounce,
/// sign-preserving, until its magnitude reaches the level cap, where it
/// drops back by 4 instead.
fn adjust_magnitude(v: f32, v_max: f32) -> f32 {
    if v.abs() < v_max {
        v + v.signum()
    } else {
        v - OVERSHOOT_RESET * v.signum()
    }
}
