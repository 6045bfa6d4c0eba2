//! Provider scopes, nested in the order the core stack declares.
//!
//! ```text
//! App → ShellScopes → ScopeLayer(0) → … → ScopeLayer(n) → Router
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use harvest_shell::{
    Location, MountedStack, Navigator, Outcome, ProviderStack, RouteTable, Scope, SessionSource,
    ShellConfig,
};

use crate::auth::{credential_store, SessionScope};
use crate::state::{
    AnalyticsState, InventoryState, LocationState, MatchingState, QueryCache, ThemeState,
};

/// What the session gate shows for the current route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateView {
    Loading,
    /// Replace the current route with this path
    Redirect(String),
    Render,
    /// Navigation could not settle (redirect loop)
    Failed(String),
}

/// The mounted core: provider stack, session source and the navigator that
/// every route passes through.
#[derive(Clone)]
pub struct ShellRoot {
    stack: Rc<MountedStack>,
    source: SessionSource,
    navigator: Rc<RefCell<Navigator>>,
}

impl ShellRoot {
    pub fn mount(config: &ShellConfig) -> harvest_shell::Result<Self> {
        let source = SessionSource::new(credential_store());
        let stack = ProviderStack::standard(source.clone()).mount()?;
        let navigator = stack.navigator(config.clone(), RouteTable::standard())?;
        tracing::info!(order = ?stack.order(), "provider stack mounted");

        Ok(Self {
            stack: Rc::new(stack),
            source,
            navigator: Rc::new(RefCell::new(navigator)),
        })
    }

    pub fn session(&self) -> &SessionSource {
        &self.source
    }

    /// Scopes, outer to inner.
    pub fn order(&self) -> Vec<Scope> {
        self.stack.order()
    }

    /// Commit the router's `path` to the navigator and decide what to show.
    ///
    /// A path the navigator already sits on is re-evaluated against the
    /// latest session; any other path is a navigation, which records history
    /// and may remember the destination for after sign-in.
    pub fn gate(&self, path: &str) -> GateView {
        let mut navigator = self.navigator.borrow_mut();
        let requested = Location::parse(path);

        let result = if *navigator.location() == requested {
            navigator.refresh()
        } else {
            navigator.navigate(path)
        };

        match result {
            Ok(Outcome::Loading) => GateView::Loading,
            Ok(Outcome::Redirect { to }) => GateView::Redirect(to),
            Ok(Outcome::Render(_)) if *navigator.location() != requested => {
                GateView::Redirect(navigator.location().path())
            }
            Ok(Outcome::Render(_)) => GateView::Render,
            Err(e) => {
                tracing::warn!(%path, error = %e, "Navigation failed");
                GateView::Failed(e.to_string())
            }
        }
    }
}

impl PartialEq for ShellRoot {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.stack, &other.stack)
    }
}

/// Makes the mounted core available below and starts the scope nesting.
#[component]
pub fn ShellScopes(root: ShellRoot, children: Element) -> Element {
    use_context_provider(|| root.clone());

    rsx! {
        ScopeLayer { depth: 0, {children} }
    }
}

/// Provides the scope at `depth`, then nests the next one inside it.
#[component]
fn ScopeLayer(depth: usize, children: Element) -> Element {
    let root = use_context::<ShellRoot>();
    let Some(scope) = root.order().get(depth).copied() else {
        return children;
    };

    let inner = rsx! {
        ScopeLayer { depth: depth + 1, {children} }
    };

    match scope {
        Scope::QueryCache => rsx! { QueryCacheScope { {inner} } },
        Scope::Theme => rsx! { ThemeScope { {inner} } },
        Scope::Location => rsx! { LocationScope { {inner} } },
        Scope::Inventory => rsx! { InventoryScope { {inner} } },
        Scope::Analytics => rsx! { AnalyticsScope { {inner} } },
        Scope::Matching => rsx! { MatchingScope { {inner} } },
        Scope::Session => rsx! { SessionScope { {inner} } },
    }
}

#[component]
fn QueryCacheScope(children: Element) -> Element {
    use_context_provider(QueryCache::new);
    children
}

#[component]
fn ThemeScope(children: Element) -> Element {
    let theme = use_context_provider(ThemeState::new);

    rsx! {
        div { class: theme.class(), {children} }
    }
}

#[component]
fn LocationScope(children: Element) -> Element {
    use_context_provider(LocationState::new);
    children
}

#[component]
fn InventoryScope(children: Element) -> Element {
    use_context_provider(InventoryState::new);
    children
}

#[component]
fn AnalyticsScope(children: Element) -> Element {
    use_context_provider(AnalyticsState::new);
    children
}

#[component]
fn MatchingScope(children: Element) -> Element {
    use_context_provider(MatchingState::new);
    children
}
