//! `serde` helpers for string-valued XML leaves.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Deserialise an optional XML leaf by parsing its trimmed text with
/// [`FromStr`].
///
/// Missing and empty leaves yield `None`. Use together with
/// `#[serde(default)]` so absent members also map to `None`.
///
/// # Errors
///
/// Returns a custom deserialisation error when the text does not parse.
///
/// # Examples
///
/// ```
/// use grid_compose::mapper::opt_parsed;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Limits {
///     #[serde(default, deserialize_with = "opt_parsed")]
///     size: Option<u32>,
/// }
///
/// let limits: Limits = serde_json::from_value(json!({"size": " 42 "}))?;
/// assert_eq!(limits.size, Some(42));
/// # Ok::<_, serde_json::Error>(())
/// ```
pub fn opt_parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|err| D::Error::custom(format!("invalid value '{trimmed}': {err}")))
}
