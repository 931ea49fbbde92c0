//! Feedback module
//!
//! The two event producers that watch the state and decide what happens
//! next.
//!
//! # Overview
//!
//! - `FetchFeedback` - runs the page fetcher when the state turns loading,
//!   cancelling superseded fetches
//! - `TriggerFeedback` - lets load-more signals through only while idle

mod fetch;
mod trigger;

pub use fetch::{FetchFeedback, FetchOutcome};
pub use trigger::TriggerFeedback;

#[cfg(test)]
mod tests;
