use chrono::{DateTime, FixedOffset, Local};
use std::path::{Path, PathBuf};

/// Working tree root; defaults to the current directory
pub const ROOT_ENV: &str = "BITLET_DIR";
/// Fixed timestamp for new commits, RFC 2822 or `%Y-%m-%d %H:%M:%S %z`
pub const COMMIT_DATE_ENV: &str = "BITLET_COMMIT_DATE";
/// Log filter directive, e.g. `debug` or `bitlet=trace`
pub const LOG_ENV: &str = "BITLET_LOG";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: PathBuf,
    commit_date: Option<DateTime<FixedOffset>>,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Config {
            root: root.into(),
            commit_date: None,
        }
    }

    pub fn load_from_env() -> anyhow::Result<Self> {
        let root = match std::env::var(ROOT_ENV).ok() {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir()?,
        };

        Ok(Self::from_vars(root, std::env::var(COMMIT_DATE_ENV).ok()))
    }

    /// An unparseable date is ignored and commits fall back to the current time
    pub fn from_vars(root: PathBuf, commit_date: Option<String>) -> Self {
        let commit_date = commit_date.and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, COMMIT_DATE_FORMAT))
                .ok()
        });

        Config { root, commit_date }
    }

    pub fn with_commit_date(mut self, commit_date: DateTime<FixedOffset>) -> Self {
        self.commit_date = Some(commit_date);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Timestamp for the next commit
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| Local::now().fixed_offset())
    }
}
