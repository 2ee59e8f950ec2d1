//! # Hive Gateway
//!
//! HTTP surface of the Hive Nervous System: agents POST pulses to `/pulse`,
//! the gateway folds them into the sector window store, assesses the sector,
//! records a billing usage unit off the response path, and answers with the
//! caller's receipt.
//!
//! Collaborator handles (window store, usage recorder) are constructed once
//! in `main` and shared through [`state::AppState`]; handlers never reach
//! for globals.

pub mod config;
pub mod routes;
pub mod state;
