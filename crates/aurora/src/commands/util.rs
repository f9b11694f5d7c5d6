//! Shared helpers for command handlers.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use aurora_core::BookingType;

use crate::cli::{GlobalOpts, TargetKind};
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Parse a `YYYY-MM-DD` flag value.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD ({e})"),
    })
}

/// Parse an optional date flag.
pub fn parse_opt_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, CliError> {
    value.map(|v| parse_date(field, v)).transpose()
}

pub fn booking_type(kind: TargetKind) -> BookingType {
    match kind {
        TargetKind::Package => BookingType::Package,
        TargetKind::Destination => BookingType::Destination,
    }
}

/// Run `fut` behind a spinner on stderr. The spinner is hidden in quiet mode.
pub async fn with_spinner<F, T>(message: &str, global: &GlobalOpts, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = if global.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    };
    spinner.set_message(message.to_owned());
    let result = fut.await;
    spinner.finish_and_clear();
    result
}
