pub mod filter;
pub mod outcome;
pub mod task;

pub use filter::*;
pub use outcome::*;
pub use task::*;
