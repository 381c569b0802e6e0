//! Query-string extraction with errors in the `AppError` envelope.

use axum::extract::FromRequestParts;
use serde::{de, Deserialize, Deserializer};

use crate::errors::AppError;

/// `Query<T>` whose rejection is an `AppError::Validation`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ValidQuery<T>(pub T);

/// Accepts the boolean spellings existing clients send:
/// `true/false`, `1/0`, `yes/no`, `on/off`, `t/f`, `y/n`, any case.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(Some(true)),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(Some(false)),
        _ => Err(de::Error::custom(format!("invalid boolean '{raw}'"))),
    }
}
