//! Queue Printing Module
//!
//! "Print all" hands the queue to a [`PrintHost`]:
//! - HTML sheet: the queue's SVG graphics on a printable page
//! - Label printer: ESC/POS labels sent to a network printer

pub mod network;
pub mod renderer;
pub mod sheet;
pub mod target;
pub mod types;

pub use network::EscPosHost;
pub use renderer::TagLabelRenderer;
pub use sheet::{HtmlSheetHost, render_sheet, sheet_file_name};
pub use target::PrintTarget;
pub use types::{PrintHost, PrintReceipt};
