use thiserror::Error;

/// Errors returned by the Square API client.
#[derive(Debug, Error)]
pub enum SquareError {
    /// No access token was configured; raised before any network I/O.
    #[error("Server is missing SQUARE_ACCESS_TOKEN configuration")]
    MissingAccessToken,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Square answered with a non-2xx status.
    ///
    /// `details` holds the `detail` of each entry in the response's `errors`
    /// list, or `None` when the error body could not be parsed.
    #[error("Square API request {method} {path} failed with status {status}")]
    RequestFailed {
        method: String,
        path: String,
        status: u16,
        details: Option<Vec<String>>,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination limit reached for catalog search: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("invalid Square base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
