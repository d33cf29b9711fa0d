//! Platform abstraction layer
//!
//! Hosts feed variable frame times in and get fixed engine ticks out.

pub mod time;

pub use time::FixedStepClock;
