//! Session context and credential persistence

mod context;
mod storage;

pub use context::*;
pub use storage::*;
