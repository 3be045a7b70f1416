//! Periodic status expiry for events whose slot has passed.

mod sweeper;

pub use sweeper::ExpirySweeper;
