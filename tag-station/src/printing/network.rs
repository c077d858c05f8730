//! Network label printer host
//!
//! Sends the whole queue as one ESC/POS job to a TCP 9100 printer.

use super::renderer::TagLabelRenderer;
use super::types::{PrintHost, PrintReceipt};
use crate::utils::print_error;
use shared::error::AppResult;
use shared::models::QueueEntry;
use tag_printer::{NetworkPrinter, Printer};
use tracing::{info, instrument};

pub struct EscPosHost {
    printer: NetworkPrinter,
    renderer: TagLabelRenderer,
}

impl EscPosHost {
    pub fn new(printer: NetworkPrinter) -> Self {
        Self {
            printer,
            renderer: TagLabelRenderer::default(),
        }
    }

    /// Host for `host[:port]` (port defaults to 9100)
    pub fn from_addr(addr: &str) -> AppResult<Self> {
        Ok(Self::new(NetworkPrinter::from_addr(addr).map_err(print_error)?))
    }

    pub async fn is_online(&self) -> bool {
        self.printer.is_online().await
    }
}

impl PrintHost for EscPosHost {
    #[instrument(skip(self, entries), fields(addr = %self.printer.addr(), count = entries.len()))]
    async fn print(&self, entries: &[QueueEntry]) -> AppResult<PrintReceipt> {
        let data = self.renderer.render(entries)?;
        self.printer.print(&data).await.map_err(print_error)?;

        info!(bytes = data.len(), "Queue sent to label printer");
        Ok(PrintReceipt {
            printed: entries.len(),
            destination: self.printer.addr().to_string(),
        })
    }

    fn describe(&self) -> String {
        format!("label printer at {}", self.printer.addr())
    }
}
