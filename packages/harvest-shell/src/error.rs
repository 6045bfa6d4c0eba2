use thiserror::Error;

use crate::providers::ProviderError;
use crate::routes::RouteTableError;
use crate::session::{Phase, SessionError};

/// Shell errors
///
/// Guards never produce these; loading, redirect and not-found are outcomes,
/// not failures.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Redirect loop: gave up at {path} after {hops} hops")]
    RedirectLoop { path: String, hops: usize },

    #[error("Redirect target {path} does not admit {phase:?} sessions")]
    UnreachableTarget { path: String, phase: Phase },

    #[error("No session scope is mounted")]
    SessionUnavailable,

    #[error("Invalid route table: {0}")]
    RouteTable(#[from] RouteTableError),

    #[error("Provider stack error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

pub type Result<T> = std::result::Result<T, ShellError>;
