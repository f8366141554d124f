//! Result types for verification operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a successful code request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResult {
    /// Address the code was sent to
    pub email: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}
