//! # Hive Common
//!
//! Shared types, errors, and tuning constants for the Hive Nervous System.
//!
//! ## Core Types
//!
//! - [`Signal`]: a pulse reported by an agent (agent id, state label, sector)
//! - [`HiveStatus`]: coarse CALM/PANIC classification of a sector
//! - [`PulseReceipt`]: response body returned for every accepted pulse
//!
//! ## Window Tuning
//!
//! Sector windows are bounded, time-expiring lists of recent state labels.
//! The bounds live here so the store and the aggregator agree on them:
//! capacity 100, whole-key TTL 600 seconds, assessment over the newest 51
//! entries, PANIC above 5 matches.

pub mod error;
pub mod signal;

pub use error::{HiveError, Result};
pub use signal::{HiveStatus, PulseReceipt, Signal};

/// Hive version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum entries retained per sector window
pub const WINDOW_CAPACITY: usize = 100;

/// Whole-key expiry for a sector window, reset on every qualifying write
pub const WINDOW_TTL_SECS: u64 = 600;

/// Number of newest entries considered when assessing a sector (indices 0-50)
pub const ASSESSMENT_SPAN: usize = 51;

/// A sector is PANIC when its pain level exceeds this
pub const PANIC_THRESHOLD: usize = 5;

/// The distinguished state label that is written to sector windows
pub const PAIN_STATE: &str = "PAIN";

/// Sector assigned to signals that do not name one
pub const DEFAULT_SECTOR: &str = "general";
