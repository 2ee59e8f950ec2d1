//! # Hive Window
//!
//! Sector window storage and aggregation for the Hive Nervous System.
//!
//! A sector window is a bounded, time-expiring list of recent state labels,
//! newest first. Windows live in Redis under `hive:{sector}`; every
//! qualifying write prepends, re-truncates to capacity, and resets the
//! whole-key TTL, so sectors with ongoing pain stay alive while quiet ones
//! vanish after ten minutes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 WindowStore                  │
//! │  ┌──────────────────┐  ┌──────────────────┐  │
//! │  │ RedisWindowStore │  │ MemoryWindowStore│  │
//! │  │ (LPUSH/LTRIM/    │  │ (DashMap, tests  │  │
//! │  │  EXPIRE/LRANGE)  │  │  and local runs) │  │
//! │  └──────────────────┘  └──────────────────┘  │
//! └──────────────────────┬───────────────────────┘
//!                        │ recent(sector, span)
//!                ┌───────┴────────┐
//!                │   aggregate    │
//!                │ (pure: count + │
//!                │   threshold)   │
//!                └────────────────┘
//! ```

pub mod aggregate;
pub mod store;

pub use aggregate::{assess, SectorAssessment};
pub use store::{window_key, MemoryWindowStore, RedisWindowStore, WindowStore};
