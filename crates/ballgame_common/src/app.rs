use anyhow::Result;

use crate::canvas::Canvas;
use crate::key::Key;

/// Contract between a game and the frontend that drives it.
///
/// The frontend calls `init` once with a live canvas, then loops: deliver
/// input through `handle_key_event`, run one frame through `update`, and
/// check `should_exit`. `update` owns the whole frame, including the final
/// present.
pub trait App {
    fn init(&mut self, canvas: &mut dyn Canvas) -> Result<()>;
    fn update(&mut self, canvas: &mut dyn Canvas);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn title(&self) -> String;
}
