//! Shared pieces of the list endpoints: sort direction, whitelisted sort
//! columns and `LIKE` pattern escaping for free-text search.
//!
//! Column names and directions are the only values pushed into SQL text
//! unbound, so both come from closed sets.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("asc") => Ok(SortOrder::Asc),
            Some("desc") => Ok(SortOrder::Desc),
            Some(other) => Err(AppError::Validation(format!(
                "invalid order '{other}': expected 'asc' or 'desc'"
            ))),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolves a user-supplied sort column against `allowed`, returning the
/// whitelisted spelling so the caller never pushes the raw input.
pub fn sort_column(
    raw: Option<&str>,
    allowed: &'static [&'static str],
) -> Result<Option<&'static str>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    allowed
        .iter()
        .find(|c| c.eq_ignore_ascii_case(raw))
        .copied()
        .map(Some)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "invalid sort_by '{raw}': expected one of {}",
                allowed.join(", ")
            ))
        })
}

/// Escape clause appended after every bound `LIKE` pattern. `!` behaves the
/// same with and without `NO_BACKSLASH_ESCAPES`.
pub const LIKE_ESCAPE: &str = " ESCAPE '!'";

/// `%term%` with `!`, `%` and `_` escaped for [`LIKE_ESCAPE`].
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '!' | '%' | '_') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Trims an optional query value, treating blank as absent.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
