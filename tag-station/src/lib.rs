//! Tag Station - asset tag generator for branch equipment
//!
//! Builds `BRANCH|TYPE|Brand` Code 128 tags from three dropdowns, keeps the
//! dropdown options in a redb file, queues generated tags and prints them.
//!
//! # Module layout
//!
//! ```text
//! tag-station/src/
//! ├── core/       # configuration
//! ├── options/    # option catalog store (redb)
//! ├── session/    # selection form, payload codes, print queue
//! ├── printing/   # print hosts (HTML sheet, ESC/POS network printer)
//! ├── export.rs   # PNG/JPEG export
//! ├── prompt.rs   # operator dialogs
//! ├── station.rs  # facade tying the above together
//! ├── repl.rs     # interactive command loop
//! ├── terminal.rs # raw-mode line editing
//! └── utils/      # logging, error mapping
//! ```

pub mod core;
pub mod export;
pub mod options;
pub mod printing;
pub mod prompt;
pub mod repl;
pub mod session;
pub mod station;
pub mod terminal;
pub mod utils;

pub use core::Config;
pub use export::ImageExporter;
pub use options::{CatalogStorage, MemoryCatalogStorage, OptionsStore, RedbCatalogStorage};
pub use printing::{EscPosHost, HtmlSheetHost, PrintHost, PrintReceipt, PrintTarget};
pub use prompt::{ScriptedPrompt, TerminalPrompt, UserPrompt};
pub use station::TagStation;
pub use terminal::{LineEditor, LineSource, TerminalLines};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Start logging as `config` asks
pub fn setup_environment(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
 _____             ____  _        _   _
|_   _|_ _  __ _  / ___|| |_ __ _| |_(_) ___  _ __
  | |/ _` |/ _` | \___ \| __/ _` | __| |/ _ \| '_ \
  | | (_| | (_| |  ___) | || (_| | |_| | (_) | | | |
  |_|\__,_|\__, | |____/ \__\__,_|\__|_|\___/|_| |_|
           |___/
    "#
    );
}
