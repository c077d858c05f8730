//! Tag payload and caption formatting
//!
//! The barcode carries `{branchCode}|{typeCode}|{brand}` so a scanner
//! reads a short, stable value; the caption spells the names out.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::PAYLOAD_SEPARATOR as SEPARATOR;
use std::fmt;

const BRANCH_CODES: &[(&str, &str)] = &[
    ("Pasay", "PS"),
    ("Cebu", "CB"),
    ("Munoz", "MZ"),
    ("Fairview", "FV"),
];

const TYPE_CODES: &[(&str, &str)] = &[
    ("Monitor", "MN"),
    ("Keyboard", "KB"),
    ("Mouse", "MS"),
    ("Ram", "RM"),
    ("Heatsink", "HS"),
];

/// Known code, or the first two characters upper-cased
///
/// The separator never makes it into a code, so names loaded from an older
/// catalog still give a payload that splits back into three fields.
fn short_code(table: &[(&str, &str)], name: &str) -> String {
    table
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| {
            name.chars()
                .filter(|c| *c != SEPARATOR)
                .take(2)
                .collect::<String>()
                .to_uppercase()
        })
}

fn full_name(table: &[(&'static str, &str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(_, c)| *c == code).map(|(n, _)| *n)
}

pub fn branch_code(branch: &str) -> String {
    short_code(BRANCH_CODES, branch)
}

pub fn type_code(device_type: &str) -> String {
    short_code(TYPE_CODES, device_type)
}

/// Human-readable caption printed under the bars
pub fn display_label(branch: &str, device_type: &str, brand: &str) -> String {
    format!("{} - {} - {}", branch, device_type, brand)
}

/// Structured barcode data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPayload {
    pub branch_code: String,
    pub type_code: String,
    pub brand: String,
}

impl TagPayload {
    pub fn new(branch: &str, device_type: &str, brand: &str) -> Self {
        Self {
            branch_code: branch_code(branch),
            type_code: type_code(device_type),
            brand: brand.to_string(),
        }
    }

    /// Split a scanned value back into its fields
    ///
    /// The brand is everything after the second separator.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let mut parts = raw.splitn(3, SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(b), Some(t), Some(brand)) if !b.is_empty() && !t.is_empty() && !brand.is_empty() => {
                Ok(Self {
                    branch_code: b.to_string(),
                    type_code: t.to_string(),
                    brand: brand.to_string(),
                })
            }
            _ => Err(AppError::with_message(
                ErrorCode::InvalidPayload,
                format!("Invalid tag payload: {}", raw),
            )),
        }
    }

    /// Branch name for a built-in code
    pub fn branch_name(&self) -> Option<&'static str> {
        full_name(BRANCH_CODES, &self.branch_code)
    }

    /// Type name for a built-in code
    pub fn type_name(&self) -> Option<&'static str> {
        full_name(TYPE_CODES, &self.type_code)
    }
}

impl fmt::Display for TagPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.branch_code,
            self.type_code,
            self.brand,
            sep = SEPARATOR
        )
    }
}
