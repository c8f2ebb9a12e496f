use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Margin the paddle keeps from the left and right screen edges.
pub const EDGE_MARGIN: i32 = 10;
/// Gap between the bottom of the screen and the drawn paddle.
pub const BOTTOM_MARGIN: i32 = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

/// Player paddle. `pos` is the x of the left edge.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub width: u32,
    pub height: u32,
    pub pos: i32,
    pub dir: Direction,
    pub moving: bool,
    /// Horizontal change per tick while moving.
    pub speed: i32,
}

impl Default for Paddle {
    fn default() -> Paddle {
        let width = 200;
        Paddle {
            width,
            height: 20,
            pos: centered(width),
            dir: Direction::Left,
            moving: false,
            speed: 10,
        }
    }
}

fn centered(width: u32) -> i32 {
    (SCREEN_WIDTH as i32 - width as i32) / 2
}

impl Paddle {
    /// Steering input. `None` stops the paddle but keeps its last direction.
    pub fn set_direction(&mut self, dir: Option<Direction>) {
        match dir {
            Some(dir) => {
                self.dir = dir;
                self.moving = true;
            }
            None => self.moving = false,
        }
    }

    /// Moves one tick's worth in the current direction. A step that would
    /// cross within `EDGE_MARGIN` of either screen edge is skipped outright,
    /// not clamped.
    pub fn advance(&mut self) {
        if !self.moving {
            return;
        }
        let next = match self.dir {
            Direction::Left => self.pos - self.speed,
            Direction::Right => self.pos + self.speed,
        };
        if next >= EDGE_MARGIN && next + self.width as i32 <= SCREEN_WIDTH as i32 - EDGE_MARGIN {
            self.pos = next;
        }
    }

    /// Recenters and stops the paddle, as after a lost life or level load.
    pub fn reset_centered(&mut self) {
        self.pos = centered(self.width);
        self.moving = false;
    }

    /// Horizontal span the ball center must be inside to bounce.
    pub fn span(&self) -> (i32, i32) {
        (self.pos, self.pos + self.width as i32)
    }

    /// Top of the band in which the ball bounces off the paddle.
    pub fn bounce_line(&self) -> f32 {
        (SCREEN_HEIGHT as i32 - 15 - self.height as i32) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_edge_margins() {
        let mut paddle = Paddle::default();
        let right_limit = SCREEN_WIDTH as i32 - paddle.width as i32 - EDGE_MARGIN;

        paddle.set_direction(Some(Direction::Left));
        for _ in 0..200 {
            paddle.advance();
            assert!(paddle.pos >= EDGE_MARGIN && paddle.pos <= right_limit);
        }
        let at_left_edge = paddle.pos;
        paddle.advance();
        assert_eq!(paddle.pos, at_left_edge);

        paddle.set_direction(Some(Direction::Right));
        for _ in 0..200 {
            paddle.advance();
            assert!(paddle.pos >= EDGE_MARGIN && paddle.pos <= right_limit);
        }
        let at_right_edge = paddle.pos;
        paddle.advance();
        assert_eq!(paddle.pos, at_right_edge);
    }

    #[test]
    fn blocked_step_is_skipped_not_clamped() {
        let mut paddle = Paddle::default();
        paddle.pos = EDGE_MARGIN + 4;
        paddle.set_direction(Some(Direction::Left));
        paddle.advance();
        // A full step would land at 4, inside the margin, so nothing moves.
        assert_eq!(paddle.pos, EDGE_MARGIN + 4);
    }

    #[test]
    fn stop_keeps_last_direction() {
        let mut paddle = Paddle::default();
        paddle.set_direction(Some(Direction::Right));
        paddle.set_direction(None);
        assert!(!paddle.moving);
        assert_eq!(paddle.dir, Direction::Right);
    }

    #[test]
    fn stationary_paddle_does_not_drift() {
        let mut paddle = Paddle::default();
        let start = paddle.pos;
        paddle.advance();
        assert_eq!(paddle.pos, start);
    }
}
