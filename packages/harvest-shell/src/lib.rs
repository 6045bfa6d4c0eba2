//! # Harvest Shell
//!
//! The session-gated routing core of the Harvest client. It decides, for
//! every navigation, whether the requested screen renders, waits behind a
//! loading placeholder, or is replaced by a redirect, while the session
//! itself is still resolving asynchronously.
//!
//! ## Architecture
//!
//! ```text
//! CredentialStore ─► SessionSource ─► SessionCell (watch)
//!                                         │
//!                                         ▼ subscribe()
//! URL ─► Location ─► RouteTable.resolve() ─► Guard.evaluate(phase)
//!                                         │
//!                         ┌───────────────┼────────────────┐
//!                         ▼               ▼                ▼
//!                      Loading     Redirect { to }   Render(RenderTree)
//!                                         │
//!                                         └─► re-resolve (Navigator)
//! ```
//!
//! ## Key Invariants
//!
//! 1. **Resolving never redirects** - both guards show the placeholder
//! 2. **Guards are pure** - same phase, same decision
//! 3. **Evaluation is total** - every location and snapshot has one outcome
//! 4. **Session before router** - a navigator only exists inside a mounted
//!    provider stack that contains the session scope

pub mod config;
pub mod error;
pub mod guard;
pub mod providers;
pub mod routes;
pub mod session;
pub mod shell;

pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use guard::{Guard, GuardDecision, RedirectTargets};
pub use providers::{
    MountedStack, PassiveScope, Provider, ProviderError, ProviderStack, Scope, SessionProvider,
};
pub use routes::{
    Location, NodeKind, RouteMatch, RouteNode, RoutePath, RouteTable, RouteTableError, Screen,
};
pub use session::{
    CredentialStore, MemoryCredentials, Phase, SessionCell, SessionError, SessionSnapshot,
    SessionSource, SessionSubscription, User,
};
pub use shell::{check_targets, evaluate, Navigator, Outcome, RenderTree};
