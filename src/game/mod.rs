// Game module - lifecycle and frame-loop support
//
// This module contains:
// - manager.rs: GameManager, the single lifecycle owner
// - input.rs: key state polled once per frame
// - scheduler.rs: run-once-after-delay tasks driven by the frame loop

pub mod input;
pub mod manager;
pub mod scheduler;

pub use input::{InputState, Key, KeySet};
pub use manager::{GameControl, GameManager};
pub use scheduler::Scheduler;
