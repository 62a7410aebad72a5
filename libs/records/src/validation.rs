//! Input validation helpers
//!
//! Pure functions used by the services to enforce input rules on loosely
//! typed JSON payloads. Each helper fails with the error kind the transport
//! layer maps to a status code.

use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

// Liberal, human-friendly formats; not country-specific.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+\d][\d\s().-]{6,}$").expect("phone pattern is valid"));
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s-]{3,12}$").expect("zip pattern is valid"));

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Closed set of canonical spellings for an enumerated field.
pub trait EnumField: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Canonical spellings, sorted.
    fn allowed() -> Vec<&'static str> {
        let mut allowed: Vec<&'static str> = Self::VARIANTS.iter().map(|v| v.as_str()).collect();
        allowed.sort_unstable();
        allowed
    }
}

/// Something that can be validated into a positive integer identity.
///
/// Implemented for plain integers, raw strings (path segments, query values)
/// and JSON values (payload fields).
pub trait IdInput {
    fn to_id(&self, field: &str) -> Result<i64>;
}

impl IdInput for i64 {
    fn to_id(&self, field: &str) -> Result<i64> {
        ensure_positive(*self, field)
    }
}

impl IdInput for i32 {
    fn to_id(&self, field: &str) -> Result<i64> {
        ensure_positive(i64::from(*self), field)
    }
}

impl IdInput for &str {
    fn to_id(&self, field: &str) -> Result<i64> {
        let parsed = self
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::invalid_id(format!("{field} must be an integer")))?;
        ensure_positive(parsed, field)
    }
}

impl IdInput for String {
    fn to_id(&self, field: &str) -> Result<i64> {
        self.as_str().to_id(field)
    }
}

impl IdInput for Value {
    fn to_id(&self, field: &str) -> Result<i64> {
        validate_int_id(Some(self), field)
    }
}

impl IdInput for &Value {
    fn to_id(&self, field: &str) -> Result<i64> {
        validate_int_id(Some(*self), field)
    }
}

fn ensure_positive(value: i64, field: &str) -> Result<i64> {
    if value <= 0 {
        return Err(Error::invalid_id(format!("{field} must be > 0")));
    }
    Ok(value)
}

/// Validate and coerce an identity value into a positive integer.
///
/// Booleans are rejected even though JSON tooling in other ecosystems treats
/// them as integers.
pub fn validate_int_id(value: Option<&Value>, field: &str) -> Result<i64> {
    let not_integer = || Error::invalid_id(format!("{field} must be an integer"));

    let parsed = match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i,
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    f as i64
                }
                _ => return Err(not_integer()),
            },
        },
        Some(Value::String(s)) => return s.as_str().to_id(field),
        _ => return Err(not_integer()),
    };

    ensure_positive(parsed, field)
}

/// Fail with DuplicateID if `candidate` is among `existing`.
pub fn validate_unique_id(
    existing: impl IntoIterator<Item = i64>,
    candidate: i64,
    field: &str,
) -> Result<()> {
    if existing.into_iter().any(|id| id == candidate) {
        return Err(
            Error::duplicate_id(format!("{field} already exists: {candidate}"))
                .with_details(json!({ field: candidate })),
        );
    }
    Ok(())
}

/// True when the payload value counts as "provided" for a required field.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Fail with InvalidInput listing every missing or blank field.
pub fn required_fields(payload: &Map<String, Value>, fields: &[&str]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| !is_present(payload.get(*f)))
        .collect();

    if !missing.is_empty() {
        return Err(Error::invalid_input("Missing required fields")
            .with_details(json!({ "missing": missing })));
    }
    Ok(())
}

fn normalize_enum_text(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Match a loosely formatted value against an enumerated field.
///
/// Matching ignores case, treats underscores and dashes as spaces and
/// collapses whitespace. Absent and non-string values never match.
pub fn canonicalize<E: EnumField>(value: Option<&Value>, field: &str) -> Result<E> {
    if let Some(Value::String(raw)) = value {
        let wanted = normalize_enum_text(raw);
        if let Some(variant) = E::VARIANTS
            .iter()
            .find(|v| normalize_enum_text(v.as_str()) == wanted)
        {
            return Ok(*variant);
        }
    }

    let allowed = E::allowed();
    Err(
        Error::invalid_input(format!("Invalid {field}. Allowed: {allowed:?}")).with_details(
            json!({ field: value.cloned().unwrap_or(Value::Null), "allowed": allowed }),
        ),
    )
}

/// Read an optional text field. Numbers are accepted in their decimal form.
pub fn text_field(payload: &Map<String, Value>, field: &str) -> Result<Option<String>> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::invalid_input(format!("{field} must be a string"))
            .with_details(json!({ field: other }))),
    }
}

/// Read a text field that must be present and non-blank.
pub fn required_text(payload: &Map<String, Value>, field: &str) -> Result<String> {
    match text_field(payload, field)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(Error::invalid_input("Missing required fields")
            .with_details(json!({ "missing": [field] }))),
    }
}

/// Read an optional text field, mapping blank strings to `None`.
pub fn optional_text(payload: &Map<String, Value>, field: &str) -> Result<Option<String>> {
    Ok(text_field(payload, field)?.filter(|s| !s.trim().is_empty()))
}

pub fn validate_phone(phone: &str) -> Result<()> {
    if !PHONE_RE.is_match(phone.trim()) {
        return Err(Error::invalid_input("Invalid phone number format")
            .with_details(json!({ "phone_number": phone })));
    }
    Ok(())
}

pub fn validate_zip(zip_code: &str) -> Result<()> {
    if !ZIP_RE.is_match(zip_code.trim()) {
        return Err(Error::invalid_input("Invalid zip/postal code format")
            .with_details(json!({ "zip_code": zip_code })));
    }
    Ok(())
}

/// Parse a flight date.
///
/// Accepts `YYYY-MM-DD` (midnight) or a date-time with `T` or space as
/// separator, optional fractional seconds and an optional trailing `Z`.
/// RFC 3339 offsets are accepted; the wall-clock value as written is kept.
pub fn parse_date(value: &str) -> Result<NaiveDateTime> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err(Error::invalid_input("Date/time is required"));
    }

    let invalid = || {
        Error::invalid_input(format!("Invalid date/time: {raw}"))
            .with_details(json!({ "date": value }))
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    let without_utc = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .unwrap_or(raw);
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(without_utc, format) {
            return Ok(parsed);
        }
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.naive_local());
    }

    Err(invalid())
}

/// True when the date portion of `value` is on or after `today`.
pub fn is_on_or_after(value: NaiveDateTime, today: NaiveDate) -> bool {
    value.date() >= today
}

/// Compare the date portion against the current local calendar date.
pub fn is_today_or_future(value: NaiveDateTime) -> bool {
    is_on_or_after(value, Local::now().date_naive())
}

/// Fail with ImmutableID if `patch` carries `field` with a value other than `current`.
pub fn forbid_identity_change(current: i64, patch: &Map<String, Value>, field: &str) -> Result<()> {
    if let Some(value) = patch.get(field) {
        let requested = validate_int_id(Some(value), field)?;
        if requested != current {
            return Err(
                Error::immutable_id(format!("{field} in body must match path and cannot change"))
                    .with_details(json!({ field: current, "requested": requested })),
            );
        }
    }
    Ok(())
}

/// Require the payload to be a JSON object.
pub fn as_object(payload: &Value) -> Result<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| Error::invalid_input("Request body must be a JSON object"))
}
