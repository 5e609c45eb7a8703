mod engine;
mod model;

pub use engine::TimerEngine;
pub use model::{Timer, TimerStatus};
