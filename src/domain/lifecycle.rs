//! Publish lifecycle of an article
//!
//! Status is derived, never stored. Given three optional instants and the
//! current time:
//!
//! | Condition                                   | Status      |
//! |---------------------------------------------|-------------|
//! | `published_at <= now`                       | `published` |
//! | otherwise `scheduled_for > now`             | `scheduled` |
//! | anything else (incl. nothing set)           | `draft`     |
//!
//! Every function takes `now` explicitly. Use a [`Clock`] at the edges.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Invalid {field} date: '{input}'")]
    DateParse { field: &'static str, input: String },

    #[error("Invalid publish status: '{0}'")]
    InvalidStatus(String),
}

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Publish status of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Draft,
    Scheduled,
    Published,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Scheduled => "scheduled",
            PublishStatus::Published => "published",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "Draft",
            PublishStatus::Scheduled => "Scheduled",
            PublishStatus::Published => "Published",
        }
    }

    /// Label shown in the Persian edition of the studio
    pub fn label_fa(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "پیش‌نویس",
            PublishStatus::Scheduled => "برنامه‌ریزی شده",
            PublishStatus::Published => "منتشر شده",
        }
    }

    /// Badge color (hex)
    pub fn color(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "#6b7280",
            PublishStatus::Scheduled => "#f59e0b",
            PublishStatus::Published => "#10b981",
        }
    }

    fn base_priority(&self) -> u8 {
        match self {
            PublishStatus::Published => 1,
            PublishStatus::Scheduled => 2,
            PublishStatus::Draft => 3,
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishStatus {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PublishStatus::Draft),
            "scheduled" => Ok(PublishStatus::Scheduled),
            "published" => Ok(PublishStatus::Published),
            _ => Err(LifecycleError::InvalidStatus(s.to_string())),
        }
    }
}

/// Time left until some instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Finite(Duration),
    Unbounded,
}

impl Remaining {
    /// True for finite durations no longer than `limit`
    pub fn is_within(&self, limit: Duration) -> bool {
        match self {
            Remaining::Finite(d) => *d <= limit,
            Remaining::Unbounded => false,
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_remaining(*self))
    }
}

/// Parses an ISO-8601 timestamp
///
/// Accepts RFC 3339, a local date-time without offset (taken as UTC), or a
/// bare date (midnight UTC).
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Empty strings count as unset, like an empty document field
fn supplied(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_field(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, LifecycleError> {
    match supplied(raw) {
        None => Ok(None),
        Some(s) => parse_timestamp(s).map(Some).ok_or_else(|| LifecycleError::DateParse {
            field,
            input: s.to_string(),
        }),
    }
}

/// Derives the publish status
pub fn classify(
    published_at: Option<DateTime<Utc>>,
    scheduled_for: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> PublishStatus {
    if published_at.is_some_and(|p| p <= now) {
        return PublishStatus::Published;
    }
    if scheduled_for.is_some_and(|s| s > now) {
        return PublishStatus::Scheduled;
    }
    PublishStatus::Draft
}

pub fn is_expired(expire_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expire_at.is_some_and(|e| e <= now)
}

/// Whether an editor may publish the article right now
pub fn can_publish(
    status: PublishStatus,
    scheduled_for: Option<DateTime<Utc>>,
    expire_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if is_expired(expire_at, now) {
        return false;
    }
    match status {
        PublishStatus::Scheduled => scheduled_for.is_some_and(|s| s <= now),
        PublishStatus::Draft => true,
        PublishStatus::Published => false,
    }
}

/// Whether the public site should show the article
pub fn is_visible(
    status: PublishStatus,
    expire_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    status == PublishStatus::Published && !is_expired(expire_at, now)
}

/// Time until `target`; zero when unset or already passed
pub fn time_until(target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
    match target {
        Some(t) if t > now => t - now,
        _ => Duration::zero(),
    }
}

/// Time until expiry; an article without an expiry never runs out
pub fn time_until_expiry(expire_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Remaining {
    match expire_at {
        None => Remaining::Unbounded,
        Some(_) => Remaining::Finite(time_until(expire_at, now)),
    }
}

/// Sort key for editorial queues, lower is more urgent
pub fn priority(
    status: PublishStatus,
    scheduled_for: Option<DateTime<Utc>>,
    expire_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> u8 {
    let mut priority = status.base_priority();

    if status == PublishStatus::Scheduled && scheduled_for.is_some() {
        let until = time_until(scheduled_for, now);
        if until <= Duration::hours(1) {
            priority = 0;
        } else if until <= Duration::hours(24) {
            priority = 1;
        }
    }

    if time_until_expiry(expire_at, now).is_within(Duration::hours(24)) {
        priority = priority.saturating_sub(1);
    }

    priority
}

/// Renders the largest applicable pair of units, e.g. `2d 3h` or `45s`
pub fn format_remaining(remaining: Remaining) -> String {
    let duration = match remaining {
        Remaining::Unbounded => return "unbounded".to_string(),
        Remaining::Finite(d) if d <= Duration::zero() => return "now".to_string(),
        Remaining::Finite(d) => d,
    };

    let seconds = duration.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

/// Outcome of checking a set of schedule dates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Checks raw schedule dates from a document
///
/// Never fails: parse problems and ordering problems become errors,
/// suspicious but legal combinations become warnings.
pub fn validate_dates(
    published_at: Option<&str>,
    scheduled_for: Option<&str>,
    expire_at: Option<&str>,
    now: DateTime<Utc>,
) -> DateValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut parse = |field: &'static str, label: &str, raw: Option<&str>| {
        match parse_field(field, raw) {
            Ok(parsed) => parsed,
            Err(_) => {
                errors.push(format!("{} date is not a valid date", label));
                None
            }
        }
    };
    let publish = parse("published_at", "Publish", published_at);
    let schedule = parse("scheduled_for", "Schedule", scheduled_for);
    let expire = parse("expire_at", "Expiry", expire_at);

    if supplied(published_at).is_some() && supplied(scheduled_for).is_some() {
        warnings.push("Both a publish date and a schedule date are set".to_string());
    }
    if schedule.is_some_and(|s| s <= now) {
        warnings.push("Schedule date is in the past".to_string());
    }
    if expire.is_some_and(|e| e <= now) {
        warnings.push("Expiry date is in the past".to_string());
    }

    if let Some(expire) = expire {
        if publish.is_some_and(|p| p >= expire) {
            errors.push("Publish date must be before the expiry date".to_string());
        }
        if schedule.is_some_and(|s| s >= expire) {
            errors.push("Schedule date must be before the expiry date".to_string());
        }
    }

    DateValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// The three lifecycle timestamps of a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<DateTime<Utc>>,
}

impl ScheduleDates {
    /// Parses raw document fields, failing on the first unparseable one
    pub fn parse(
        published_at: Option<&str>,
        scheduled_for: Option<&str>,
        expire_at: Option<&str>,
    ) -> Result<Self, LifecycleError> {
        Ok(Self {
            published_at: parse_field("published_at", published_at)?,
            scheduled_for: parse_field("scheduled_for", scheduled_for)?,
            expire_at: parse_field("expire_at", expire_at)?,
        })
    }

    pub fn status(&self, now: DateTime<Utc>) -> PublishStatus {
        classify(self.published_at, self.scheduled_for, now)
    }

    pub fn priority(&self, now: DateTime<Utc>) -> u8 {
        priority(self.status(now), self.scheduled_for, self.expire_at, now)
    }

    /// Snapshot of the lifecycle at `now`
    pub fn info(&self, now: DateTime<Utc>) -> ScheduleInfo {
        let status = self.status(now);
        ScheduleInfo {
            status,
            published_at: self.published_at,
            scheduled_for: self.scheduled_for,
            expire_at: self.expire_at,
            is_expired: is_expired(self.expire_at, now),
            can_be_published: can_publish(status, self.scheduled_for, self.expire_at, now),
        }
    }
}

/// Lifecycle snapshot, recomputed on every read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleInfo {
    pub status: PublishStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
    pub can_be_published: bool,
}

impl ScheduleInfo {
    pub fn is_visible(&self) -> bool {
        self.status == PublishStatus::Published && !self.is_expired
    }
}
