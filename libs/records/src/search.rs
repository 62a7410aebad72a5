//! Filtering, sorting and pagination shared by the list/search operations

use crate::repository::Record;
use serde::Serialize;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;
pub const DEFAULT_SORT: &str = "id";

/// Paginated result window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Total number of matches before windowing.
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
    pub sort: String,
}

/// Unpaginated result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Requested window and ordering. Missing values take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

impl PageRequest {
    /// Effective `(limit, offset)`: limit clamped into `0..=MAX_LIMIT`,
    /// negative offsets treated as zero.
    pub fn window(&self) -> (usize, usize) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit as usize, offset as usize)
    }
}

/// Allow-listed sort key; anything else falls back to `id`.
pub fn resolve_sort(requested: Option<&str>, allowed: &[&'static str]) -> &'static str {
    let Some(requested) = requested.map(|s| s.trim().to_lowercase()) else {
        return DEFAULT_SORT;
    };
    allowed
        .iter()
        .copied()
        .find(|key| *key == requested)
        .unwrap_or(DEFAULT_SORT)
}

/// Stable sort by the record's projection of `key`.
pub fn sort_records<R: Record>(records: &mut [R], key: &str) {
    records.sort_by_cached_key(|r| r.sort_value(key));
}

/// Sort `records` and cut the requested window. `limit == 0` keeps
/// everything from `offset`.
pub fn paginate<R: Record>(mut records: Vec<R>, request: &PageRequest, allowed: &[&'static str]) -> Page<R> {
    let sort = resolve_sort(request.sort.as_deref(), allowed);
    sort_records(&mut records, sort);

    let (limit, offset) = request.window();
    let count = records.len();
    let data: Vec<R> = if limit == 0 {
        records.into_iter().skip(offset).collect()
    } else {
        records.into_iter().skip(offset).take(limit).collect()
    };

    Page {
        data,
        count,
        limit,
        offset,
        sort: sort.to_string(),
    }
}

/// Normalize a free-text or filter value: trimmed, lowercase, `None` when blank.
pub fn normalize_term(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Case-insensitive substring match of `needle` (already lowercase) in any of `fields`.
pub fn matches_query<R: Record>(record: &R, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| {
        record
            .field_text(field)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Case-insensitive equality of `field` with `expected` (already lowercase).
pub fn matches_exact<R: Record>(record: &R, field: &str, expected: &str) -> bool {
    record
        .field_text(field)
        .is_some_and(|text| text.trim().to_lowercase() == expected)
}
