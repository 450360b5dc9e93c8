//! Infrastructure layer
//!
//! Hardware drivers, the storage and network glue around them, and the
//! embassy tasks that keep the radio and the portal servers running.

pub mod drivers;
pub mod tasks;
pub mod types;
