//! Identifier type shared by backend resources. The backend emits numeric ids
//! for some collections and string ids (including `_id`) for others; the client
//! treats both as opaque text.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for ResourceId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trims an id and percent-encodes it as a single path segment, so ids
/// carrying `/`, `?` or `#` cannot change the request path.
pub(crate) fn required_segment(value: &str, label: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{label} is required.")));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(AppError::Validation(format!("{label} is invalid.")));
    }

    let mut url = Url::parse("http://segment.invalid/")
        .map_err(|err| AppError::Validation(format!("{label} is invalid: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| AppError::Validation(format!("{label} is invalid.")))?
        .pop_if_empty()
        .push(trimmed);

    Ok(url.path().trim_start_matches('/').to_string())
}

/// Collections arrive either bare or wrapped under a named key.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Exhibitions { exhibitions: Vec<T> },
    Users { users: Vec<T> },
    Data { data: Vec<T> },
}

impl<T> Listing<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items)
            | Self::Exhibitions { exhibitions: items }
            | Self::Users { users: items }
            | Self::Data { data: items } => items,
        }
    }
}

/// Single resources arrive either bare or wrapped under `data` or a
/// resource-named key.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Single<T> {
    Data { data: T },
    User { user: T },
    Ticket { ticket: T },
    Bare(T),
}

impl<T> Single<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Data { data: inner }
            | Self::User { user: inner }
            | Self::Ticket { ticket: inner }
            | Self::Bare(inner) => inner,
        }
    }
}
