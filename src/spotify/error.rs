use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpotifyError {
    /// The token endpoint answered with a non-2xx status.
    #[error("Spotify token request rejected with {status}: {body}")]
    AuthRejected { status: StatusCode, body: String },

    /// The token endpoint could not be reached.
    #[error("Spotify token endpoint unreachable: {0}")]
    AuthUnreachable(#[source] reqwest::Error),

    /// The token endpoint granted a lifetime that cannot be represented.
    #[error("Spotify token has an unusable lifetime of {expires_in} seconds")]
    InvalidToken { expires_in: i64 },

    /// An API endpoint answered with a non-2xx status.
    #[error("Spotify rejected the request with {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    /// Connection, TLS or timeout failure before any response arrived.
    #[error("Spotify API unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// A 2xx response whose body could not be read or decoded.
    #[error("malformed Spotify response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl SpotifyError {
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            SpotifyError::AuthRejected { .. }
                | SpotifyError::AuthUnreachable(_)
                | SpotifyError::InvalidToken { .. }
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SpotifyError::AuthRejected { status, .. } | SpotifyError::Rejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
