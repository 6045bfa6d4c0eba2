//! Stateful navigation over the mount point.
//!
//! # Guard instances
//!
//! The guarded subtree currently on screen owns one live session
//! subscription. Mounting a different subtree (for example after a redirect
//! from `/` to `/auth`) drops the previous instance, which unsubscribes it,
//! so a transition that lands later cannot reach discarded state.
//!
//! # Redirects
//!
//! Redirects replace the current location instead of pushing a history
//! entry, and are followed before anything is committed: content from a
//! branch that redirected is never the committed outcome. A navigation that
//! fails leaves location, outcome, history and the mounted instance as they
//! were.

use std::collections::VecDeque;

use tracing::{debug, info};

use super::{evaluate, Outcome};
use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use crate::guard::{Guard, RedirectTargets};
use crate::routes::{Location, RouteTable};
use crate::session::{SessionCell, SessionSnapshot, SessionSubscription};

/// The live evaluation of one guarded subtree.
#[derive(Debug)]
struct GuardInstance {
    anchor: String,
    guard: Guard,
    subscription: SessionSubscription,
}

/// End of a redirect chain, not yet committed.
struct Settled {
    location: Location,
    outcome: Outcome,
    guard: Guard,
    anchor: Option<String>,
    intended: Option<Location>,
}

pub struct Navigator {
    table: RouteTable,
    targets: RedirectTargets,
    config: ShellConfig,
    cell: SessionCell,
    location: Location,
    history: VecDeque<Location>,
    outcome: Outcome,
    instance: Option<GuardInstance>,
    intended: Option<Location>,
    started: bool,
}

impl Navigator {
    pub fn new(config: ShellConfig, table: RouteTable, cell: SessionCell) -> Self {
        Self {
            targets: RedirectTargets::from_config(&config),
            table,
            config,
            cell,
            location: Location::root(),
            history: VecDeque::new(),
            outcome: Outcome::Loading,
            instance: None,
            intended: None,
            started: false,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Previously committed locations, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Location> {
        self.history.iter()
    }

    /// Guard of the mounted subtree, if it is guarded.
    pub fn active_guard(&self) -> Option<Guard> {
        self.instance.as_ref().map(|instance| instance.guard)
    }

    /// Whether the mounted guard has seen a transition not yet evaluated.
    pub fn has_pending_transition(&self) -> bool {
        self.instance
            .as_ref()
            .is_some_and(|instance| instance.subscription.has_changed())
    }

    pub fn session(&self) -> &SessionCell {
        &self.cell
    }

    /// Navigate to `path`, following any redirects.
    pub fn navigate(&mut self, path: &str) -> Result<Outcome> {
        let previous = self.started.then(|| self.location.clone());
        let outcome = self.settle(Location::parse(path))?;

        if let Some(previous) = previous {
            self.history.push_back(previous);
            while self.history.len() > self.config.history_limit {
                self.history.pop_front();
            }
        }
        Ok(outcome)
    }

    /// Return to the previous location; `None` when history is empty.
    pub fn back(&mut self) -> Result<Option<Outcome>> {
        let Some(previous) = self.history.back().cloned() else {
            return Ok(None);
        };
        let outcome = self.settle(previous)?;
        self.history.pop_back();
        Ok(Some(outcome))
    }

    /// Re-evaluate the current location against the latest snapshot.
    pub fn refresh(&mut self) -> Result<Outcome> {
        self.settle(self.location.clone())
    }

    /// Wait for the mounted guard to observe a session transition, then
    /// re-evaluate.
    ///
    /// Returns `None` when nothing mounted depends on the session, or once
    /// the session cell is gone.
    pub async fn next(&mut self) -> Option<Result<Outcome>> {
        let instance = self.instance.as_mut()?;
        instance.subscription.changed().await?;
        Some(self.refresh())
    }

    /// Follow redirects from `start`, then commit the result.
    fn settle(&mut self, start: Location) -> Result<Outcome> {
        let snapshot = self.cell.snapshot();
        let settled = self.follow(start, &snapshot)?;

        self.mount(settled.guard, settled.anchor, &snapshot);
        debug!(location = %settled.location, outcome = ?settled.outcome, "outcome committed");
        self.location = settled.location;
        self.intended = settled.intended;
        self.outcome = settled.outcome.clone();
        self.started = true;
        Ok(settled.outcome)
    }

    fn follow(&self, start: Location, snapshot: &SessionSnapshot) -> Result<Settled> {
        let mut location = start;
        let mut intended = self.intended.clone();
        let mut hops = 0;

        loop {
            let (guard, anchor) = match self.table.resolve(&location) {
                Some(matched) => (matched.guard(), matched.guard_anchor()),
                None => (Guard::None, None),
            };

            match evaluate(&self.table, &location, snapshot, &self.targets) {
                Outcome::Redirect { to } => {
                    hops += 1;
                    if hops > self.config.max_redirects {
                        return Err(ShellError::RedirectLoop { path: to, hops });
                    }

                    let to = self.redirect_target(guard, &location, &mut intended, to);
                    info!(from = %location, to = %to, "redirect");
                    location = Location::parse(&to);
                }
                outcome => {
                    return Ok(Settled {
                        location,
                        outcome,
                        guard,
                        anchor,
                        intended,
                    })
                }
            }
        }
    }

    fn redirect_target(
        &self,
        guard: Guard,
        from: &Location,
        intended: &mut Option<Location>,
        to: String,
    ) -> String {
        if !self.config.remember_destination {
            return to;
        }

        match guard {
            Guard::RequireAuthenticated => {
                *intended = Some(from.clone());
                to
            }
            Guard::RequireAnonymous => intended
                .take()
                .map(|intended| intended.path())
                .unwrap_or(to),
            Guard::None => to,
        }
    }

    /// Mount the instance for `anchor`; `evaluated` is the snapshot the
    /// committed outcome was computed from.
    fn mount(&mut self, guard: Guard, anchor: Option<String>, evaluated: &SessionSnapshot) {
        let Some(anchor) = anchor else {
            if let Some(previous) = self.instance.take() {
                debug!(anchor = %previous.anchor, "guard instance torn down");
            }
            return;
        };

        let keep = self
            .instance
            .as_ref()
            .is_some_and(|current| current.anchor == anchor);

        if !keep {
            if let Some(previous) = &self.instance {
                debug!(anchor = %previous.anchor, "guard instance torn down");
            }
            debug!(%anchor, ?guard, "guard instance mounted");
            self.instance = Some(GuardInstance {
                anchor,
                guard,
                subscription: self.cell.subscribe(),
            });
        }

        // Evaluated transitions count as seen; anything newer stays pending
        if let Some(instance) = self.instance.as_mut() {
            if instance.subscription.mark_seen() != *evaluated {
                instance.subscription.mark_changed();
            }
        }
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("location", &self.location)
            .field("outcome", &self.outcome)
            .field("active_guard", &self.active_guard())
            .field("history_len", &self.history.len())
            .finish()
    }
}
