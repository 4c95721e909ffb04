use thiserror::Error;

/// Failure of a single backend or search call.
///
/// Every variant renders the same way (a dismissible notification); the
/// split exists so callers and tests can tell where a failure came from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request could not be sent or its response could not be parsed.
    #[error("{0}")]
    Network(String),
    /// Non-2xx response.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Login rejected.
    #[error("{0}")]
    Auth(String),
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// User-facing texts for one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fallback {
    /// Shown for a non-2xx response without a `message` in its body.
    pub rejected: &'static str,
    /// Shown when the server could not be reached or answered garbage.
    pub unreachable: &'static str,
}

pub const LOGIN: Fallback = Fallback {
    rejected: "Invalid username or password",
    unreachable: "Failed to connect to server",
};

pub const LIST_MOVIES: Fallback = Fallback {
    rejected: "Failed to fetch stats",
    unreachable: "Unable to connect to server. Please try again.",
};

pub const CREATE_ENTRY: Fallback = Fallback {
    rejected: "Failed to add content",
    unreachable: "Error connecting to server. Please try again.",
};

pub const LINK_ENTRY: Fallback = Fallback {
    rejected: "Failed to add download link",
    unreachable: "Server error while adding content",
};

pub const SEARCH: Fallback = Fallback {
    rejected: "Search request failed",
    unreachable: "Error connecting to TMDB",
};

pub const LIST_FEATURED: Fallback = Fallback {
    rejected: "Failed to fetch Movies of the Week",
    unreachable: "Server error while fetching",
};

pub const CREATE_FEATURED: Fallback = Fallback {
    rejected: "Failed to add Movie of the Week",
    unreachable: "Server error while adding content",
};

pub const DELETE_FEATURED: Fallback = Fallback {
    rejected: "Failed to remove Movie of the Week",
    unreachable: "Server error while deleting",
};

pub const CREATE_ADMIN: Fallback = Fallback {
    rejected: "Failed to create admin",
    unreachable: "Error connecting to server",
};
