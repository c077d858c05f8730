//! Print host contract

use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::QueueEntry;

/// Outcome of a "print all" job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintReceipt {
    /// Number of queue entries handed to the host
    pub printed: usize,
    /// Where the job went (sheet path or printer address)
    pub destination: String,
}

/// Destination that receives the print queue
#[allow(async_fn_in_trait)]
pub trait PrintHost {
    /// Print exactly `entries`, in order
    async fn print(&self, entries: &[QueueEntry]) -> AppResult<PrintReceipt>;

    /// Short description for logs and the front end
    fn describe(&self) -> String;
}
