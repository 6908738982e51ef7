pub mod memory;
pub mod time;

pub use memory::{InMemoryLedger, StaticAttributes};
pub use time::{FixedTimeSource, SystemTimeSource};
