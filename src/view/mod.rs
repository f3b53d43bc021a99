pub mod clock;
pub mod projection;

pub use clock::{ClockFace, Ticker};
pub use projection::{filtered_tasks, progress_percent, BoardView, Summary};
