//! Session: selection form, preview surface and print queue

pub mod form;
pub mod payload;
pub mod queue;

pub use form::{Preview, SessionForm};
pub use payload::{TagPayload, branch_code, display_label, type_code};
pub use queue::PrintQueue;
