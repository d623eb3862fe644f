use serde::Deserialize;

use crate::prelude::*;

/// Growatt response body.
///
/// Some endpoints wrap the payload into `{"result": …, "obj": …}`, others return it bare.
/// The wrapped form is tried first, because a bare object with all-optional fields would
/// otherwise match anything.
#[must_use]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped {
        /// Vendor result code, `1` on success.
        result: i32,

        obj: Option<T>,
    },

    Bare(T),
}

impl<T> Envelope<T> {
    /// Get the payload, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Wrapped { obj, .. } => obj,
            Self::Bare(payload) => Some(payload),
        }
    }

    /// Get the payload, failing when the wrapped response does not have one.
    pub fn into_result(self, path: &str) -> Result<T> {
        match self {
            Self::Wrapped { obj: Some(payload), .. } | Self::Bare(payload) => Ok(payload),
            Self::Wrapped { result, obj: None } => {
                warn!(path, result, "no payload in the response");
                Err(Error::Api { path: path.to_owned(), code: result })
            }
        }
    }
}
