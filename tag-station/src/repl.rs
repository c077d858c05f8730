//! Interactive command loop
//!
//! Each line is parsed as a clap multicall command. Validation failures are
//! shown as alerts and the loop keeps going; only `quit` (or end of input)
//! stops it.

use crate::printing::PrintHost;
use crate::session::TagPayload;
use crate::station::TagStation;
use crate::terminal::LineSource;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use shared::error::{AppError, AppResult};
use shared::models::{Category, SelectionField};
use std::io::Write;
use tag_printer::RasterFormat;
use tracing::{debug, error, warn};

const PROMPT: &str = "> ";

/// One line typed at the prompt
#[derive(Debug, Parser)]
#[command(name = "tag-station", multicall = true)]
#[command(help_template = "Commands:\n{subcommands}")]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the dropdowns and the current selection
    #[command(visible_alias = "ls")]
    List,
    /// Select a branch (no value clears it)
    Branch {
        #[arg(allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Select a type (no value clears it and the brand)
    Type {
        #[arg(allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Select a brand of the selected type (no value clears it)
    Brand {
        #[arg(allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Add an option: branches, types or brands
    Add { category: Category },
    /// Remove the selected option of a category
    #[command(visible_alias = "rm")]
    Remove { category: Category },
    /// Clear the form
    Reset,
    /// Render the selection and queue it
    #[command(visible_alias = "gen")]
    Generate,
    /// List queued tags
    Queue,
    /// Remove one queued tag
    Drop { id: u64 },
    /// Empty the queue
    Clear,
    /// Save the preview as an image
    Export {
        #[arg(default_value = "png")]
        format: RasterFormat,
    },
    /// Print the preview as a data URL
    Url {
        #[arg(default_value = "png")]
        format: RasterFormat,
    },
    /// Decode a scanned tag value
    Scan {
        #[arg(required = true, allow_hyphen_values = true)]
        payload: Vec<String>,
    },
    /// Print every queued tag
    Print,
    /// Leave
    #[command(visible_alias = "exit")]
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, clap::Error> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        CommandLine::try_parse_from(words).map(|l| Some(l.command))
    }
}

/// Command overview shown at startup and by `help`
pub fn help() -> String {
    CommandLine::command().render_help().to_string()
}

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn joined(words: Vec<String>) -> Option<String> {
    (!words.is_empty()).then(|| words.join(" "))
}

fn show_lists<H: PrintHost>(station: &TagStation<H>, out: &mut impl Write) -> AppResult<()> {
    for field in SelectionField::ALL {
        let selected = station.selection().get(field);
        let entries = station.entries(field.category());
        let rendered: Vec<String> = entries
            .iter()
            .map(|e| {
                if Some(e.as_str()) == selected {
                    format!("[{}]", e)
                } else {
                    e.clone()
                }
            })
            .collect();
        writeln!(out, "{:<6} {}", field.label(), rendered.join(", "))?;
    }
    writeln!(out, "State: {:?}", station.selection_state())?;
    Ok(())
}

fn show_queue<H: PrintHost>(station: &TagStation<H>, out: &mut impl Write) -> AppResult<()> {
    if station.queue().is_empty() {
        writeln!(out, "Queue is empty")?;
        return Ok(());
    }
    for entry in station.queue() {
        writeln!(out, "{:>15}  {:<24} {}", entry.id, entry.payload, entry.label)?;
    }
    Ok(())
}

fn select<H: PrintHost>(
    station: &mut TagStation<H>,
    field: SelectionField,
    value: Vec<String>,
    out: &mut impl Write,
) -> AppResult<()> {
    station.select_field(field, joined(value).as_deref())?;
    show_lists(station, out)
}

fn show_payload(raw: &str, out: &mut impl Write) -> AppResult<()> {
    let payload = TagPayload::parse(raw)?;
    writeln!(
        out,
        "Branch {}\nType   {}\nBrand  {}",
        payload.branch_name().unwrap_or(payload.branch_code.as_str()),
        payload.type_name().unwrap_or(payload.type_code.as_str()),
        payload.brand
    )?;
    Ok(())
}

/// Run one command against the station
pub async fn execute<H: PrintHost>(
    station: &mut TagStation<H>,
    command: Command,
    out: &mut impl Write,
) -> AppResult<Flow> {
    match command {
        Command::List => show_lists(station, out)?,
        Command::Branch { value } => select(station, SelectionField::Branch, value, out)?,
        Command::Type { value } => select(station, SelectionField::Type, value, out)?,
        Command::Brand { value } => select(station, SelectionField::Brand, value, out)?,
        Command::Add { category } => {
            if let Some(value) = station.add_entry(category)? {
                writeln!(out, "Added {} \"{}\"", category.singular(), value)?;
            }
        }
        Command::Remove { category } => {
            if station.remove_entry(category)? {
                writeln!(out, "Removed {}", category.singular())?;
            }
        }
        Command::Reset => {
            station.reset_selection();
            writeln!(out, "Form cleared")?;
        }
        Command::Generate => {
            let entry = station.generate()?;
            writeln!(out, "Queued #{}: {} ({})", entry.id, entry.label, entry.payload)?;
        }
        Command::Queue => show_queue(station, out)?,
        Command::Drop { id } => {
            if station.remove_queue_entry(id) {
                writeln!(out, "Dropped #{}", id)?;
            } else {
                writeln!(out, "No queued tag #{}", id)?;
            }
        }
        Command::Clear => {
            if station.clear_queue() {
                writeln!(out, "Queue cleared")?;
            }
        }
        Command::Export { format } => {
            let path = station.export_image(format).await?;
            writeln!(out, "Saved {}", path.display())?;
        }
        Command::Url { format } => {
            let url = station.export_data_url(format).await?;
            writeln!(out, "{}", url)?;
        }
        Command::Scan { payload } => show_payload(&payload.join(" "), out)?,
        Command::Print => {
            let receipt = station.print_all().await?;
            writeln!(
                out,
                "Sent {} tag(s) to {}",
                receipt.printed, receipt.destination
            )?;
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Show a failed command to the operator
///
/// Validation failures are alerts; anything else is also logged.
pub fn report_error(err: &AppError, out: &mut impl Write) -> AppResult<()> {
    if err.is_validation() {
        warn!(code = %err.code, "{}", err.message);
        writeln!(out, "Alert: {}", err.message)?;
    } else {
        error!(code = %err.code, "{}", err.message);
        writeln!(out, "Error: {}", err.message)?;
    }
    Ok(())
}

/// Show clap's usage error or requested help text
fn report_usage(err: &clap::Error, out: &mut impl Write) -> AppResult<()> {
    if !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        debug!(kind = ?err.kind(), "Rejected command line");
    }
    write!(out, "{}", err)?;
    Ok(())
}

/// Drive the station from `lines` until `quit` or end of input
pub async fn run<H: PrintHost>(
    station: &mut TagStation<H>,
    lines: &mut impl LineSource,
    out: &mut impl Write,
) -> AppResult<()> {
    while let Some(line) = lines.next_line(PROMPT) {
        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match execute(station, command, out).await {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => report_error(&e, out)?,
            },
            Err(e) => report_usage(&e, out)?,
        }
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    fn rejected(line: &str) -> ErrorKind {
        Command::parse(line).unwrap_err().kind()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            parsed("branch  Cebu"),
            Command::Branch {
                value: vec!["Cebu".into()]
            }
        );
        assert_eq!(
            parsed("brand Cooler Master"),
            Command::Brand {
                value: vec!["Cooler".into(), "Master".into()]
            }
        );
        assert_eq!(parsed("type"), Command::Type { value: vec![] });
        assert_eq!(
            parsed("add brands"),
            Command::Add {
                category: Category::Brands
            }
        );
        assert_eq!(
            parsed("rm type"),
            Command::Remove {
                category: Category::Types
            }
        );
        assert_eq!(parsed("drop 42"), Command::Drop { id: 42 });
        assert_eq!(
            parsed("export"),
            Command::Export {
                format: RasterFormat::Png
            }
        );
        assert_eq!(
            parsed("url jpg"),
            Command::Url {
                format: RasterFormat::Jpeg
            }
        );
        assert_eq!(parsed("gen"), Command::Generate);
        assert_eq!(parsed("exit"), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(rejected("fly"), ErrorKind::InvalidSubcommand);
        assert_eq!(rejected("drop x"), ErrorKind::ValueValidation);
        assert_eq!(rejected("add"), ErrorKind::MissingRequiredArgument);
        assert_eq!(rejected("scan"), ErrorKind::MissingRequiredArgument);
        assert_eq!(rejected("export gif"), ErrorKind::ValueValidation);
        assert_eq!(rejected("add colors"), ErrorKind::ValueValidation);
        assert_eq!(rejected("help"), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_help_lists_every_command() {
        let text = help();
        let names = [
            "list", "branch", "add", "remove", "generate", "drop", "export", "url", "scan",
            "print", "quit",
        ];
        for name in names {
            assert!(text.contains(name), "help is missing {}", name);
        }
    }

    #[test]
    fn test_show_payload() {
        let mut out = Vec::new();
        show_payload("CB|RM|Kingston", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Branch Cebu"));
        assert!(text.contains("Type   Ram"));
        assert!(text.contains("Brand  Kingston"));

        let mut out = Vec::new();
        show_payload("ZZ|QQ|Acme Co", &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Branch ZZ"));

        assert!(show_payload("CB|RM", &mut Vec::new()).is_err());
    }

    #[test]
    fn test_report_error() {
        let mut out = Vec::new();
        report_error(&AppError::required_field("Please fill all fields!"), &mut out).unwrap();
        report_error(&AppError::storage("disk gone"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Alert: Please fill all fields!"));
        assert!(text.contains("Error: disk gone"));
    }
}
