//! Schedule CLI commands (status, check)

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use super::output::Output;
use crate::domain::lifecycle::{
    format_remaining, parse_timestamp, time_until, time_until_expiry, validate_dates, Remaining,
};
use crate::domain::{Clock, FixedClock, PublishStatus, ScheduleDates, SystemClock};

#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Show the derived publish status of an article
    ///
    /// Examples:
    ///   newstrack schedule status --published-at 2025-03-01T08:00:00Z
    ///   newstrack schedule status --scheduled-for 2025-04-01 --expire-at 2025-05-01
    Status(DateArgs),

    /// Check schedule dates, failing on errors and listing warnings
    Check(DateArgs),
}

/// The three lifecycle dates as stored in the document
#[derive(Args)]
pub struct DateArgs {
    /// When the article was (or will be) published
    #[arg(long)]
    pub published_at: Option<String>,

    /// When the article is scheduled to go out
    #[arg(long)]
    pub scheduled_for: Option<String>,

    /// When the article stops being visible
    #[arg(long)]
    pub expire_at: Option<String>,

    /// Evaluate at this instant instead of the current time
    #[arg(long)]
    pub now: Option<String>,
}

impl DateArgs {
    fn now(&self) -> Result<DateTime<Utc>> {
        match self.now.as_deref() {
            Some(raw) => {
                let instant =
                    parse_timestamp(raw).ok_or_else(|| anyhow!("Invalid --now value: '{}'", raw))?;
                Ok(FixedClock(instant).now())
            }
            None => Ok(SystemClock.now()),
        }
    }
}

pub fn run(cmd: ScheduleCommands, output: &Output) -> Result<()> {
    match cmd {
        ScheduleCommands::Status(args) => status(output, &args),
        ScheduleCommands::Check(args) => check(output, &args),
    }
}

fn status(output: &Output, args: &DateArgs) -> Result<()> {
    let now = args.now()?;
    output.verbose_ctx("status", &format!("Evaluating at {}", now.to_rfc3339()));

    let dates = ScheduleDates::parse(
        args.published_at.as_deref(),
        args.scheduled_for.as_deref(),
        args.expire_at.as_deref(),
    )
    .context("Cannot derive status")?;

    let info = dates.info(now);
    let priority = dates.priority(now);
    let publishes_in = match info.status {
        PublishStatus::Scheduled => Some(Remaining::Finite(time_until(dates.scheduled_for, now))),
        _ => None,
    };
    let expires_in = time_until_expiry(dates.expire_at, now);
    let warnings = validate_dates(
        args.published_at.as_deref(),
        args.scheduled_for.as_deref(),
        args.expire_at.as_deref(),
        now,
    )
    .warnings;

    if output.is_json() {
        output.data(&serde_json::json!({
            "status": info.status,
            "label": info.status.label(),
            "color": info.status.color(),
            "is_expired": info.is_expired,
            "can_be_published": info.can_be_published,
            "is_visible": info.is_visible(),
            "priority": priority,
            "publishes_in": publishes_in.map(format_remaining),
            "expires_in": format_remaining(expires_in),
            "warnings": warnings,
        }));
    } else {
        output.field(
            "Status",
            &format!("{} ({})", info.status.label(), info.status.label_fa()),
        );
        output.field("Visible", yes_no(info.is_visible()));
        output.field("Expired", yes_no(info.is_expired));
        output.field("Can publish", yes_no(info.can_be_published));
        output.field("Priority", &priority.to_string());
        if let Some(remaining) = publishes_in {
            output.field("Publishes in", &format_remaining(remaining));
        }
        output.field("Expires in", &format_remaining(expires_in));
        for warning in &warnings {
            eprintln!("Warning: {}", warning);
        }
    }

    Ok(())
}

fn check(output: &Output, args: &DateArgs) -> Result<()> {
    let now = args.now()?;
    let result = validate_dates(
        args.published_at.as_deref(),
        args.scheduled_for.as_deref(),
        args.expire_at.as_deref(),
        now,
    );
    output.verbose_ctx(
        "check",
        &format!(
            "{} errors, {} warnings",
            result.errors.len(),
            result.warnings.len()
        ),
    );

    if output.is_json() {
        output.data(&result);
    } else {
        for error in &result.errors {
            println!("error: {}", error);
        }
        for warning in &result.warnings {
            println!("warning: {}", warning);
        }
        if result.is_valid {
            output.success("Schedule dates are valid");
        }
    }

    if !result.is_valid {
        bail!("Schedule dates are invalid ({} errors)", result.errors.len());
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
