//! Error types for the dashboard core.

use thiserror::Error;

/// Errors raised while turning a status report into markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The feed reported a status other than `up` or `down`.
    ///
    /// The host gets no marker. This is a data-contract violation on the
    /// producer's side and is never mapped onto either icon.
    #[error("host {host:?} reported invalid status {status:?} (expected \"up\" or \"down\")")]
    InvalidStatus { host: String, status: String },
}
