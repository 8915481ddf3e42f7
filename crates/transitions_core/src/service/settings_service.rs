//! User settings service.
//!
//! # Responsibility
//! - Round-trip the daily reset time with shape validation on write.
//!
//! # Invariants
//! - Stored reset times always match `HH:MM` (24-hour clock).
//! - Reads never fail on an absent value; they fall back to the default.

use crate::repo::settings_repo::SettingsRepository;
use crate::repo::{RepoError, RepoResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const RESET_TIME_KEY: &str = "daily_reset_time";
const DEFAULT_RESET_TIME: &str = "00:00";

static RESET_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid reset time regex"));

/// Service error for settings use-cases.
#[derive(Debug)]
pub enum SettingsServiceError {
    /// Input does not match the `HH:MM` 24-hour shape.
    InvalidResetTime(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for SettingsServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidResetTime(value) => {
                write!(f, "invalid reset time `{value}`; expected HH:MM (24-hour)")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SettingsServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidResetTime(_) => None,
        }
    }
}

impl From<RepoError> for SettingsServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for persisted user settings.
pub struct SettingsService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the daily reset time, defaulting to midnight when the
    /// user never set one.
    pub fn reset_time(&self) -> RepoResult<String> {
        Ok(self
            .repo
            .get_value(RESET_TIME_KEY)?
            .unwrap_or_else(|| DEFAULT_RESET_TIME.to_string()))
    }

    /// Validates and stores a new daily reset time; returns the
    /// normalized (trimmed) value that was persisted.
    pub fn update_reset_time(&self, value: &str) -> Result<String, SettingsServiceError> {
        let trimmed = value.trim();
        if !RESET_TIME_RE.is_match(trimmed) {
            return Err(SettingsServiceError::InvalidResetTime(value.to_string()));
        }
        self.repo.put_value(RESET_TIME_KEY, trimmed)?;
        Ok(trimmed.to_string())
    }
}
