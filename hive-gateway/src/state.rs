//! Process-wide request state
//!
//! Two long-lived collaborator handles, constructed once at startup and
//! cloned into every request task.

use std::sync::Arc;

use hive_billing::UsageRecorder;
use hive_window::WindowStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Sector window store
    pub window: Arc<dyn WindowStore>,
    /// Billing usage recorder
    pub billing: Arc<dyn UsageRecorder>,
}

impl AppState {
    pub fn new(window: Arc<dyn WindowStore>, billing: Arc<dyn UsageRecorder>) -> Self {
        Self { window, billing }
    }
}
