//! Article tracking IDs
//!
//! ID Format:
//! - Default: 12 ASCII digits, never starting with `0` (e.g., `482913075561`)
//! - With options: `{prefix}{digits}{suffix}`, total length `length`
//! - Display form: groups of 4 joined by a separator (e.g., `4829-1307-5561`)
//!
//! Digits are drawn from a non-cryptographic RNG. Collisions are possible;
//! [`generate_guaranteed_unique`] is the only path that checks for them, and
//! the document store's uniqueness constraint remains the real guarantee.

use chrono::{DateTime, Utc};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;
use thiserror::Error;

/// Length of a default tracking ID
pub const DEFAULT_LENGTH: usize = 12;

/// Default attempt budget for [`generate_guaranteed_unique`]
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Default separator used by [`format`] and [`unformat`]
pub const DEFAULT_SEPARATOR: &str = "-";

/// Longest total ID length [`TrackingIdOptions`] accepts
pub const MAX_LENGTH: usize = 64;

const GROUP_SIZE: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackingIdError {
    #[error("Invalid tracking ID configuration: {0}")]
    Config(String),

    #[error("Could not generate a unique tracking ID after {0} attempts")]
    ExhaustedAttempts(u32),

    #[error("Invalid tracking ID: expected 12 digits not starting with 0, got '{0}'")]
    Validation(String),
}

/// Shape of a tracking ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingIdOptions {
    pub prefix: String,
    pub suffix: String,
    pub length: usize,
}

impl Default for TrackingIdOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            length: DEFAULT_LENGTH,
        }
    }
}

impl TrackingIdOptions {
    /// Options with a fixed prefix and the default length
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Number of random digits between prefix and suffix
    ///
    /// Fails when `length` exceeds [`MAX_LENGTH`] or when prefix and suffix
    /// leave no room for at least one digit.
    pub fn body_length(&self) -> Result<usize, TrackingIdError> {
        if self.length > MAX_LENGTH {
            return Err(TrackingIdError::Config(format!(
                "length {} exceeds the maximum of {}",
                self.length, MAX_LENGTH
            )));
        }
        let fixed = self.prefix.chars().count() + self.suffix.chars().count();
        match self.length.checked_sub(fixed) {
            Some(body) if body > 0 => Ok(body),
            _ => Err(TrackingIdError::Config(format!(
                "length {} leaves no room for digits after prefix '{}' and suffix '{}'",
                self.length, self.prefix, self.suffix
            ))),
        }
    }

    /// Number of distinct IDs these options can produce, if it fits in a `u128`
    fn capacity(&self) -> Result<Option<u128>, TrackingIdError> {
        let body = self.body_length()?;
        let exp = u32::try_from(body - 1).ok();
        Ok(exp
            .and_then(|e| 10u128.checked_pow(e))
            .and_then(|n| n.checked_mul(9)))
    }
}

/// News categories with their own ID prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    #[default]
    Regular,
    Urgent,
    Important,
    Archive,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 4] = [
        NewsCategory::Regular,
        NewsCategory::Urgent,
        NewsCategory::Important,
        NewsCategory::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Regular => "regular",
            NewsCategory::Urgent => "urgent",
            NewsCategory::Important => "important",
            NewsCategory::Archive => "archive",
        }
    }

    /// Leading digit reserved for this category
    pub fn prefix(&self) -> &'static str {
        match self {
            NewsCategory::Regular => "",
            NewsCategory::Urgent => "9",
            NewsCategory::Important => "8",
            NewsCategory::Archive => "7",
        }
    }

    pub fn options(&self) -> TrackingIdOptions {
        TrackingIdOptions::with_prefix(self.prefix())
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(NewsCategory::Regular),
            "urgent" => Ok(NewsCategory::Urgent),
            "important" => Ok(NewsCategory::Important),
            "archive" => Ok(NewsCategory::Archive),
            other => Err(format!(
                "unknown category '{}', expected one of: regular, urgent, important, archive",
                other
            )),
        }
    }
}

/// A tracking ID produced by a generator or parsed from a document field
///
/// Parsing applies the default 12-digit rules; use [`TrackingId::parse_with`]
/// for IDs built with custom options. Deserializing takes the stored string
/// as is, since the options it was generated with are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    /// Parses an ID against explicit options
    pub fn parse_with(s: &str, options: &TrackingIdOptions) -> Result<Self, TrackingIdError> {
        if validate(s, options) {
            Ok(Self(s.to_string()))
        } else {
            Err(TrackingIdError::Validation(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form, e.g. `1234-5678-9012`
    pub fn formatted(&self) -> String {
        format(&self.0, DEFAULT_SEPARATOR)
    }

    /// Public article URL under `base_url`
    pub fn article_url(&self, base_url: &str) -> Result<String, TrackingIdError> {
        to_article_url(&self.0, base_url)
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TrackingId {
    type Err = TrackingIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &TrackingIdOptions::default())
    }
}

impl TryFrom<String> for TrackingId {
    type Error = TrackingIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackingId> for String {
    fn from(id: TrackingId) -> Self {
        id.0
    }
}

impl AsRef<str> for TrackingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TrackingId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Membership check against IDs that are already taken
///
/// Implemented for in-memory collections; a store-backed lookup can
/// implement it directly or go through [`Lookup`].
pub trait ExistingIds {
    fn contains(&self, id: &str) -> bool;
}

impl<T, S> ExistingIds for HashSet<T, S>
where
    T: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn contains(&self, id: &str) -> bool {
        HashSet::contains(self, id)
    }
}

impl<T> ExistingIds for BTreeSet<T>
where
    T: Borrow<str> + Ord,
{
    fn contains(&self, id: &str) -> bool {
        BTreeSet::contains(self, id)
    }
}

impl<T: AsRef<str>> ExistingIds for [T] {
    fn contains(&self, id: &str) -> bool {
        self.iter().any(|existing| existing.as_ref() == id)
    }
}

impl<T: AsRef<str>> ExistingIds for Vec<T> {
    fn contains(&self, id: &str) -> bool {
        ExistingIds::contains(self.as_slice(), id)
    }
}

/// Adapts a closure into an [`ExistingIds`] lookup
pub struct Lookup<F>(pub F);

impl<F: Fn(&str) -> bool> ExistingIds for Lookup<F> {
    fn contains(&self, id: &str) -> bool {
        (self.0)(id)
    }
}

/// Something that hands out candidate tracking IDs
pub trait IdSource {
    fn next_id(&mut self) -> Result<TrackingId, TrackingIdError>;
}

/// Random tracking ID generator
pub struct Generator<R = ThreadRng> {
    rng: R,
    options: TrackingIdOptions,
}

impl Generator<ThreadRng> {
    /// Generator backed by the thread-local RNG
    pub fn new(options: TrackingIdOptions) -> Self {
        Self::with_rng(rand::rng(), options)
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(rng: R, options: TrackingIdOptions) -> Self {
        Self { rng, options }
    }

    pub fn options(&self) -> &TrackingIdOptions {
        &self.options
    }

    /// Generates one ID: first digit 1-9, the rest 0-9
    pub fn generate(&mut self) -> Result<TrackingId, TrackingIdError> {
        let body_len = self.options.body_length()?;

        let mut id =
            String::with_capacity(self.options.prefix.len() + body_len + self.options.suffix.len());
        id.push_str(&self.options.prefix);
        id.push(digit(self.rng.random_range(1..=9)));
        for _ in 1..body_len {
            id.push(digit(self.rng.random_range(0..=9)));
        }
        id.push_str(&self.options.suffix);

        Ok(TrackingId(id))
    }

    /// Generates `count` distinct IDs, retrying on duplicates
    ///
    /// Fails up front if the options cannot produce that many distinct IDs.
    pub fn generate_many(&mut self, count: usize) -> Result<HashSet<TrackingId>, TrackingIdError> {
        if let Some(capacity) = self.options.capacity()? {
            if count as u128 > capacity {
                return Err(TrackingIdError::Config(format!(
                    "cannot produce {} distinct IDs; only {} exist for this configuration",
                    count, capacity
                )));
            }
        }

        let mut ids = HashSet::with_capacity(count);
        while ids.len() < count {
            ids.insert(self.generate()?);
        }
        Ok(ids)
    }
}

impl<R: Rng> IdSource for Generator<R> {
    fn next_id(&mut self) -> Result<TrackingId, TrackingIdError> {
        self.generate()
    }
}

fn digit(n: u32) -> char {
    char::from_digit(n, 10).unwrap_or('0')
}

/// Generates a tracking ID with the given options
pub fn generate(options: &TrackingIdOptions) -> Result<TrackingId, TrackingIdError> {
    Generator::new(options.clone()).generate()
}

/// Generates `count` distinct tracking IDs
pub fn generate_many(
    count: usize,
    options: &TrackingIdOptions,
) -> Result<HashSet<TrackingId>, TrackingIdError> {
    Generator::new(options.clone()).generate_many(count)
}

/// Generates an ID not present in `existing`, giving up after `max_attempts` draws
pub fn generate_guaranteed_unique<E>(
    existing: &E,
    max_attempts: u32,
    options: &TrackingIdOptions,
) -> Result<TrackingId, TrackingIdError>
where
    E: ExistingIds + ?Sized,
{
    unique_from(&mut Generator::new(options.clone()), existing, max_attempts)
}

/// Draws from `source` until a candidate is not in `existing`
pub fn unique_from<S, E>(
    source: &mut S,
    existing: &E,
    max_attempts: u32,
) -> Result<TrackingId, TrackingIdError>
where
    S: IdSource + ?Sized,
    E: ExistingIds + ?Sized,
{
    for _ in 0..max_attempts {
        let candidate = source.next_id()?;
        if is_unique(candidate.as_str(), existing) {
            return Ok(candidate);
        }
    }
    Err(TrackingIdError::ExhaustedAttempts(max_attempts))
}

/// Returns true if `id` is not in `existing`
pub fn is_unique<E: ExistingIds + ?Sized>(id: &str, existing: &E) -> bool {
    !existing.contains(id)
}

/// Time-seeded ID: last 8 digits of the Unix millisecond clock plus 4 random digits
///
/// A time part starting with `0` gets a random leading digit so the result
/// still validates with default options.
pub fn generate_time_based(now: DateTime<Utc>) -> TrackingId {
    generate_time_based_with(&mut rand::rng(), now)
}

fn generate_time_based_with<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> TrackingId {
    let millis = now.timestamp_millis().rem_euclid(100_000_000);
    let mut id = format!("{:08}", millis);
    if id.starts_with('0') {
        id.replace_range(0..1, &rng.random_range(1..=9u32).to_string());
    }
    id.push_str(&rng.random_range(1000..=9999u32).to_string());
    TrackingId(id)
}

/// Checks an ID against the given options. Never fails, only answers.
pub fn validate(id: &str, options: &TrackingIdOptions) -> bool {
    if id.chars().count() != options.length {
        return false;
    }

    let Some(rest) = id.strip_prefix(options.prefix.as_str()) else {
        return false;
    };
    let Some(numeric) = rest.strip_suffix(options.suffix.as_str()) else {
        return false;
    };

    !numeric.is_empty()
        && numeric.bytes().all(|b| b.is_ascii_digit())
        && !numeric.starts_with('0')
}

/// Splits an ID into groups of 4 joined by `separator`
pub fn format(id: &str, separator: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    chars
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Removes every occurrence of `separator`
pub fn unformat(formatted: &str, separator: &str) -> String {
    if separator.is_empty() {
        return formatted.to_string();
    }
    formatted.replace(separator, "")
}

/// Builds `{base_url}/{id}`, dropping one trailing slash from the base
pub fn to_article_url(id: &str, base_url: &str) -> Result<String, TrackingIdError> {
    if !validate(id, &TrackingIdOptions::default()) {
        return Err(TrackingIdError::Validation(id.to_string()));
    }
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    Ok(format!("{}/{}", base, id))
}

/// Everything a form needs to show about a freshly generated ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingIdInfo {
    pub id: TrackingId,
    pub formatted: String,
    pub is_valid: bool,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl TrackingIdInfo {
    pub fn new(id: TrackingId, options: &TrackingIdOptions, generated_at: DateTime<Utc>) -> Self {
        Self {
            formatted: id.formatted(),
            is_valid: validate(id.as_str(), options),
            generated_at,
            prefix: Some(options.prefix.clone()).filter(|p| !p.is_empty()),
            suffix: Some(options.suffix.clone()).filter(|s| !s.is_empty()),
            id,
        }
    }
}

/// Generates an ID and bundles it with its display form
pub fn tracking_id_info(
    options: &TrackingIdOptions,
    now: DateTime<Utc>,
) -> Result<TrackingIdInfo, TrackingIdError> {
    Ok(TrackingIdInfo::new(generate(options)?, options, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Always hands out the same ID and counts how often it was asked
    struct FixedSource {
        id: TrackingId,
        calls: u32,
    }

    impl IdSource for FixedSource {
        fn next_id(&mut self) -> Result<TrackingId, TrackingIdError> {
            self.calls += 1;
            Ok(self.id.clone())
        }
    }

    fn seeded(options: TrackingIdOptions) -> Generator<StdRng> {
        Generator::with_rng(StdRng::seed_from_u64(7), options)
    }

    #[test]
    fn generated_id_has_default_shape() {
        let id = generate(&TrackingIdOptions::default()).unwrap();
        let s = id.as_str();

        assert_eq!(s.len(), 12);
        assert!(s.bytes().all(|b| b.is_ascii_digit()));
        assert!(!s.starts_with('0'));
    }

    #[test]
    fn generated_body_never_starts_with_zero() {
        let options = TrackingIdOptions::default();
        let mut generator = seeded(options.clone());

        for _ in 0..10_000 {
            let id = generator.generate().unwrap();
            assert!(!id.as_str().starts_with('0'), "leading zero in {}", id);
            assert!(validate(id.as_str(), &options));
        }
    }

    #[test]
    fn generated_body_after_prefix_never_starts_with_zero() {
        let options = TrackingIdOptions {
            prefix: "AB".to_string(),
            suffix: "Z".to_string(),
            length: 6,
        };
        let mut generator = seeded(options.clone());

        for _ in 0..10_000 {
            let id = generator.generate().unwrap();
            assert_ne!(&id.as_str()[2..3], "0");
            assert!(validate(id.as_str(), &options));
        }
    }

    #[test]
    fn generate_rejects_options_without_room_for_digits() {
        let options = TrackingIdOptions {
            prefix: "NEWS".to_string(),
            suffix: "-FA".to_string(),
            length: 7,
        };

        assert!(matches!(generate(&options), Err(TrackingIdError::Config(_))));

        let shorter = TrackingIdOptions {
            length: 3,
            ..options
        };
        assert!(matches!(generate(&shorter), Err(TrackingIdError::Config(_))));
    }

    #[test]
    fn generate_rejects_oversized_length() {
        for length in [MAX_LENGTH + 1, 100_000_000_000_000, usize::MAX] {
            let options = TrackingIdOptions {
                length,
                ..TrackingIdOptions::default()
            };

            assert!(matches!(generate(&options), Err(TrackingIdError::Config(_))));
            assert!(matches!(
                generate_many(2, &options),
                Err(TrackingIdError::Config(_))
            ));
        }

        let longest = TrackingIdOptions {
            length: MAX_LENGTH,
            ..TrackingIdOptions::default()
        };
        assert_eq!(generate(&longest).unwrap().as_str().len(), MAX_LENGTH);
    }

    #[test]
    fn category_presets_use_their_prefix() {
        for category in NewsCategory::ALL {
            let options = category.options();
            let id = generate(&options).unwrap();

            assert_eq!(options.length, 12);
            assert!(id.as_str().starts_with(category.prefix()));
            assert!(validate(id.as_str(), &options));
        }
        assert_eq!(NewsCategory::Urgent.prefix(), "9");
        assert_eq!(NewsCategory::Important.prefix(), "8");
        assert_eq!(NewsCategory::Archive.prefix(), "7");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("URGENT".parse::<NewsCategory>(), Ok(NewsCategory::Urgent));
        assert!("breaking".parse::<NewsCategory>().is_err());
    }

    #[test]
    fn generate_many_returns_requested_count() {
        let ids = seeded(TrackingIdOptions::default()).generate_many(50).unwrap();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn generate_many_fills_a_tiny_id_space() {
        let options = TrackingIdOptions {
            length: 1,
            ..TrackingIdOptions::default()
        };
        let ids = seeded(options.clone()).generate_many(9).unwrap();

        assert_eq!(ids.len(), 9);
        assert!(!ids.iter().any(|id| id.as_str() == "0"));
        assert!(matches!(
            seeded(options).generate_many(10),
            Err(TrackingIdError::Config(_))
        ));
    }

    #[test]
    fn guaranteed_unique_skips_existing_ids() {
        let existing: HashSet<String> = ["123456789012".to_string()].into_iter().collect();

        for _ in 0..100 {
            let id = generate_guaranteed_unique(
                &existing,
                DEFAULT_MAX_ATTEMPTS,
                &TrackingIdOptions::default(),
            )
            .unwrap();
            assert_ne!(id.as_str(), "123456789012");
        }
    }

    #[test]
    fn guaranteed_unique_gives_up_after_max_attempts() {
        let taken: TrackingId = "123456789012".parse().unwrap();
        let existing = vec![taken.clone()];
        let mut source = FixedSource { id: taken, calls: 0 };

        let result = unique_from(&mut source, &existing, 100);

        assert_eq!(result, Err(TrackingIdError::ExhaustedAttempts(100)));
        assert_eq!(source.calls, 100);
    }

    #[test]
    fn guaranteed_unique_accepts_store_lookup() {
        let existing = Lookup(|id: &str| id.starts_with('1'));
        let mut source = FixedSource {
            id: "223456789012".parse().unwrap(),
            calls: 0,
        };

        let id = unique_from(&mut source, &existing, 3).unwrap();
        assert_eq!(id.as_str(), "223456789012");
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn is_unique_checks_membership() {
        let existing = ["111111111111", "222222222222"];
        assert!(!is_unique("111111111111", &existing[..]));
        assert!(is_unique("333333333333", &existing[..]));
    }

    #[test]
    fn validate_accepts_well_formed_ids() {
        let defaults = TrackingIdOptions::default();
        assert!(validate("123456789012", &defaults));
        assert!(validate("900000000000", &defaults));
    }

    #[test]
    fn validate_rejects_malformed_ids() {
        let defaults = TrackingIdOptions::default();
        assert!(!validate("", &defaults));
        assert!(!validate("12345678901", &defaults)); // too short
        assert!(!validate("1234567890123", &defaults)); // too long
        assert!(!validate("023456789012", &defaults)); // leading zero
        assert!(!validate("12345678901a", &defaults)); // non-digit
        assert!(!validate("1234-5678-90", &defaults));
        assert!(!validate("١٢٣٤٥٦٧٨٩٠١٢", &defaults)); // Arabic-Indic digits
    }

    #[test]
    fn validate_honors_prefix_and_suffix() {
        let options = TrackingIdOptions {
            prefix: "N".to_string(),
            suffix: "X".to_string(),
            length: 6,
        };

        assert!(validate("N1234X", &options));
        assert!(!validate("M1234X", &options)); // wrong prefix
        assert!(!validate("N1234Y", &options)); // wrong suffix
        assert!(!validate("N0234X", &options)); // body starts with 0
        assert!(!validate("N12a4X", &options));
    }

    #[test]
    fn validate_rejects_overlapping_prefix_and_suffix() {
        let options = TrackingIdOptions {
            prefix: "9".to_string(),
            suffix: "9".to_string(),
            length: 1,
        };
        assert!(!validate("9", &options));
    }

    #[test]
    fn format_groups_by_four() {
        assert_eq!(format("123456789012", "-"), "1234-5678-9012");
        assert_eq!(format("123456789012", " "), "1234 5678 9012");
        assert_eq!(format("1234567", "-"), "1234-567");
        assert_eq!(format("", "-"), "");
    }

    #[test]
    fn unformat_strips_separator() {
        assert_eq!(unformat("1234-5678-9012", "-"), "123456789012");
        assert_eq!(unformat("1234 5678 9012", " "), "123456789012");
        assert_eq!(unformat("1234.5678.9012", "."), "123456789012");
        assert_eq!(unformat("1234-5678", ""), "1234-5678");
    }

    #[test]
    fn article_url_strips_trailing_slash() {
        assert_eq!(
            to_article_url("123456789012", "https://example.com/").unwrap(),
            "https://example.com/123456789012"
        );
        assert_eq!(
            to_article_url("123456789012", "https://example.com").unwrap(),
            "https://example.com/123456789012"
        );
    }

    #[test]
    fn article_url_rejects_invalid_id() {
        assert_eq!(
            to_article_url("012345678901", "https://example.com"),
            Err(TrackingIdError::Validation("012345678901".to_string()))
        );
        assert!(to_article_url("12345", "https://example.com").is_err());
    }

    #[test]
    fn tracking_id_parses_and_displays() {
        let id: TrackingId = "123456789012".parse().unwrap();
        assert_eq!(id.to_string(), "123456789012");
        assert_eq!(id.formatted(), "1234-5678-9012");
        assert!("12345".parse::<TrackingId>().is_err());
    }

    #[test]
    fn tracking_id_parse_agrees_with_validate() {
        let defaults = TrackingIdOptions::default();
        for raw in [" 123456789012", "123456789012 ", "\t123456789012\n"] {
            assert!(!validate(raw, &defaults));
            assert!(raw.parse::<TrackingId>().is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn tracking_id_parse_with_custom_options() {
        let options = TrackingIdOptions {
            prefix: "FA".to_string(),
            suffix: String::new(),
            length: 8,
        };
        assert!(TrackingId::parse_with("FA123456", &options).is_ok());
        assert!("FA123456".parse::<TrackingId>().is_err());
    }

    #[test]
    fn serde_roundtrip_tracking_id() {
        let original: TrackingId = "987654321098".parse().unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"987654321098\"");

        let parsed: TrackingId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn serde_roundtrip_keeps_custom_ids() {
        let options = TrackingIdOptions::with_prefix("AB");
        let original = seeded(options.clone()).generate().unwrap();

        let json = serde_json::to_string(&original).unwrap();
        let parsed: TrackingId = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, original);
        assert!(validate(parsed.as_str(), &options));
        assert!(original.as_str().parse::<TrackingId>().is_err());
    }

    #[test]
    fn time_based_id_uses_clock_digits() {
        let now = Utc.timestamp_millis_opt(1_700_012_345_678).unwrap();
        let id = generate_time_based(now);

        assert_eq!(&id.as_str()[..8], "12345678");
        assert!(validate(id.as_str(), &TrackingIdOptions::default()));
    }

    #[test]
    fn time_based_id_never_starts_with_zero() {
        let now = Utc.timestamp_millis_opt(1_700_001_234_567).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let id = generate_time_based_with(&mut rng, now);
            assert!(!id.as_str().starts_with('0'));
            assert_eq!(&id.as_str()[1..8], "1234567");
            assert!(validate(id.as_str(), &TrackingIdOptions::default()));
        }
    }

    #[test]
    fn tracking_id_info_reports_options() {
        let now = Utc::now();
        let info = tracking_id_info(&NewsCategory::Urgent.options(), now).unwrap();

        assert!(info.is_valid);
        assert!(info.id.as_str().starts_with('9'));
        assert_eq!(info.formatted, format(info.id.as_str(), "-"));
        assert_eq!(info.prefix.as_deref(), Some("9"));
        assert_eq!(info.suffix, None);
        assert_eq!(info.generated_at, now);
    }

    fn options_strategy() -> impl Strategy<Value = TrackingIdOptions> {
        ("[A-Z]{0,3}", "[a-z]{0,3}", 1usize..=16).prop_map(|(prefix, suffix, body)| {
            let length = prefix.len() + suffix.len() + body;
            TrackingIdOptions {
                prefix,
                suffix,
                length,
            }
        })
    }

    proptest! {
        #[test]
        fn generated_ids_validate(options in options_strategy(), seed in any::<u64>()) {
            let mut generator = Generator::with_rng(StdRng::seed_from_u64(seed), options.clone());
            let id = generator.generate().unwrap();
            prop_assert!(validate(id.as_str(), &options));
        }

        #[test]
        fn generated_ids_survive_serde(options in options_strategy(), seed in any::<u64>()) {
            let mut generator = Generator::with_rng(StdRng::seed_from_u64(seed), options);
            let id = generator.generate().unwrap();
            let json = serde_json::to_string(&id).unwrap();
            prop_assert_eq!(serde_json::from_str::<TrackingId>(&json).unwrap(), id);
        }

        #[test]
        fn format_is_stable_through_unformat(id in "[1-9][0-9]{11}") {
            let formatted = format(&id, "-");
            prop_assert_eq!(format(&unformat(&formatted, "-"), "-"), formatted.clone());
            prop_assert_eq!(formatted.split('-').count(), 3);
        }
    }
}
