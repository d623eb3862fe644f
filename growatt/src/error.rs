use reqwest::StatusCode;

/// Everything that can go wrong while talking to Growatt or deriving a snapshot.
///
/// Fetch failures (`Transport`, `Status`, `Parse`, `Api`) are raised by the client before any
/// derivation happens. `InvalidInput` is reserved for the snapshot derivation itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build the HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to call `{path}`")]
    Transport {
        path: String,

        #[source]
        source: reqwest::Error,
    },

    #[error("`{path}` failed with {status}")]
    Status { path: String, status: StatusCode },

    #[error("failed to deserialize `{path}` response")]
    Parse {
        path: String,

        #[source]
        source: serde_json::Error,
    },

    #[error("Growatt error {code} from `{path}`: the response has no payload")]
    Api { path: String, code: i32 },

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl Error {
    /// Whether the error originates from fetching or parsing a response, as opposed to
    /// being handed an invalid input.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        !matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
