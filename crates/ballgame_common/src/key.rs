/// Keys the game reacts to, already mapped away from any concrete
/// windowing library's keycode type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    /// Steer the paddle left.
    Left,
    /// Steer the paddle right.
    Right,
    /// Toggle which velocity axis paddle bounces adjust.
    Up,
    /// Pause toggle; also dismisses banners and restarts after a loss.
    P,
    /// HUD visibility toggle.
    H,
    Escape,
    None,
}
