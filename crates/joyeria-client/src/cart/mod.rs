//! Cart synchronization.

mod client;

pub use client::{CartClient, IdStrategy, OrderOutcome, DEFAULT_ADD_QUANTITY};
