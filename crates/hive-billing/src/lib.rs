//! # Hive Billing
//!
//! Usage recording seam for the Hive Nervous System.
//!
//! The contract with the external billing collaborator is "record one usage
//! unit, attributable to credential X", fire-and-forget. The provider-side
//! request shape is deliberately unspecified, so this crate exposes the
//! [`UsageRecorder`] trait as the seam and ships a trace-only Stripe stub
//! plus an in-memory recorder for tests.

pub mod recorder;

pub use recorder::{MemoryUsageRecorder, StripeUsageRecorder, UsageEvent, UsageRecorder};
