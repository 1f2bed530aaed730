//! Scene (draw stream) types.
//!
//! The editor records one frame of curve draws into a [`DrawList`]; the
//! renderer replays it in insertion order. Control points of every command
//! live in one shared arena so a warmed list does not allocate.

mod cmd;
mod list;

pub use cmd::{CurveCmd, DrawCmd, Topology};
pub use list::DrawList;
