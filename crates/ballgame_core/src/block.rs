use ballgame_common::{Color, Rect};

/// One breakable block. Resistance counts the hits left before it is
/// destroyed; a block at zero is inert, neither rendered nor collidable.
#[derive(Debug, Clone)]
pub struct Block {
    pub width: u32,
    pub height: u32,
    /// Top-left corner.
    pub x: i32,
    pub y: i32,
    pub resistance_start: u32,
    pub resistance: u32,
}

impl Block {
    pub fn new(width: u32, height: u32, x: i32, y: i32, resistance: u32) -> Block {
        Block {
            width,
            height,
            x,
            y,
            resistance_start: resistance,
            resistance,
        }
    }

    pub fn is_live(&self) -> bool {
        self.resistance > 0
    }

    /// Overlap test against the ball treated as an axis-aligned square of
    /// side 2*radius. Vertical edges are touch-inclusive, horizontal edges
    /// strict.
    pub fn overlaps_ball(&self, ball_x: f32, ball_y: f32, radius: f32) -> bool {
        ball_y - radius <= (self.y + self.height as i32) as f32
            && ball_y + radius >= self.y as f32
            && ball_x - radius < (self.x + self.width as i32) as f32
            && ball_x + radius > self.x as f32
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Render color keyed off the remaining resistance, green through red.
    pub fn color(&self) -> Color {
        match self.resistance {
            2 => Color::new_rgb(51, 153, 102),
            3 => Color::new_rgb(0, 153, 255),
            4 => Color::new_rgb(51, 51, 255),
            5 => Color::new_rgb(204, 51, 25),
            _ => Color::GREEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_resistance_is_inert() {
        let block = Block::new(90, 30, 40, 60, 0);
        assert!(!block.is_live());
        assert!(Block::new(90, 30, 40, 60, 1).is_live());
    }

    #[test]
    fn ball_square_overlap_edges() {
        let block = Block::new(90, 30, 100, 100, 1);
        // Ball bottom edge exactly touching the block top counts.
        assert!(block.overlaps_ball(145.0, 90.0, 10.0));
        // Ball right edge exactly touching the block left does not (strict x).
        assert!(!block.overlaps_ball(90.0, 115.0, 10.0));
        assert!(block.overlaps_ball(91.0, 115.0, 10.0));
        // Well away.
        assert!(!block.overlaps_ball(500.0, 500.0, 10.0));
    }
}
