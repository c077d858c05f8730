//! Configured print destination

use super::network::EscPosHost;
use super::sheet::HtmlSheetHost;
use super::types::{PrintHost, PrintReceipt};
use crate::core::Config;
use shared::error::AppResult;
use shared::models::QueueEntry;

/// Print host chosen from configuration
///
/// A configured printer address selects the label printer; otherwise the
/// queue is written as an HTML sheet.
pub enum PrintTarget {
    Sheet(HtmlSheetHost),
    LabelPrinter(EscPosHost),
}

impl PrintTarget {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        match config.printer_addr.as_deref() {
            Some(addr) => Ok(Self::LabelPrinter(EscPosHost::from_addr(addr)?)),
            None => Ok(Self::Sheet(HtmlSheetHost::new(config.print_path()))),
        }
    }

    /// Whether print jobs can reach the destination right now
    ///
    /// The HTML sheet only needs the local file system.
    pub async fn is_online(&self) -> bool {
        match self {
            Self::Sheet(_) => true,
            Self::LabelPrinter(host) => host.is_online().await,
        }
    }
}

impl PrintHost for PrintTarget {
    async fn print(&self, entries: &[QueueEntry]) -> AppResult<PrintReceipt> {
        match self {
            Self::Sheet(host) => host.print(entries).await,
            Self::LabelPrinter(host) => host.print(entries).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Sheet(host) => host.describe(),
            Self::LabelPrinter(host) => host.describe(),
        }
    }
}
