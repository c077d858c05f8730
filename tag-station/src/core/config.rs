use std::path::PathBuf;

/// Station configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./tag-station-data | Working directory |
/// | DATA_FILE | {WORK_DIR}/tag-station.redb | Option catalog database |
/// | EXPORT_DIR | {WORK_DIR}/exports | Exported tag images |
/// | PRINT_DIR | {WORK_DIR}/print | Printable queue sheets |
/// | PRINTER_ADDR | (none) | Network label printer, `host[:port]` |
/// | LOG_LEVEL | info | Max log level |
/// | LOG_DIR | (none) | Daily rolling log files |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/tags PRINTER_ADDR=192.168.1.60 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory, parent of every default path
    pub work_dir: String,
    /// redb file holding the option catalog
    pub data_file: String,
    /// Where `Tag-<ts>.<ext>` images are written
    pub export_dir: String,
    /// Where `Queue-<ts>.html` sheets are written
    pub print_dir: String,
    /// Network printer address; the HTML sheet is used when unset
    pub printer_addr: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./tag-station-data".into());
        Self {
            data_file: std::env::var("DATA_FILE")
                .unwrap_or_else(|_| join(&work_dir, "tag-station.redb")),
            export_dir: std::env::var("EXPORT_DIR").unwrap_or_else(|_| join(&work_dir, "exports")),
            print_dir: std::env::var("PRINT_DIR").unwrap_or_else(|_| join(&work_dir, "print")),
            printer_addr: std::env::var("PRINTER_ADDR")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            work_dir,
        }
    }

    /// Configuration rooted at `work_dir` with default paths, ignoring the environment
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let work_dir = work_dir.into();
        Self {
            data_file: join(&work_dir, "tag-station.redb"),
            export_dir: join(&work_dir, "exports"),
            print_dir: join(&work_dir, "print"),
            printer_addr: None,
            log_level: "info".into(),
            log_dir: None,
            work_dir,
        }
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }

    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(&self.export_dir)
    }

    pub fn print_path(&self) -> PathBuf {
        PathBuf::from(&self.print_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn join(dir: &str, name: &str) -> String {
    PathBuf::from(dir).join(name).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides_derives_paths() {
        let config = Config::with_overrides("/tmp/tags");
        assert_eq!(config.data_path(), PathBuf::from("/tmp/tags/tag-station.redb"));
        assert_eq!(config.export_path(), PathBuf::from("/tmp/tags/exports"));
        assert_eq!(config.print_path(), PathBuf::from("/tmp/tags/print"));
        assert!(config.printer_addr.is_none());
        assert_eq!(config.log_level, "info");
    }
}
