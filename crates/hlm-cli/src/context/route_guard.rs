use hlm_core::access::{Route, RouteDecision, authorize_route};
use hlm_core::identity::Actor;

/// What the dispatcher should do with a command after the route check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    /// Not permitted: show this route instead.
    FallBack(Route),
}

/// Apply the route guard for `route`.
///
/// Anonymous callers get an error pointing at `hlm auth sign-in`. Signed-in
/// callers without access are sent to the fallback route with a warning.
pub fn guard(actor: Option<&Actor>, route: Route) -> anyhow::Result<GuardOutcome> {
    match authorize_route(actor, route) {
        RouteDecision::Allow => Ok(GuardOutcome::Proceed),
        RouteDecision::SignIn => {
            anyhow::bail!("{} requires a session, run `hlm auth sign-in`", route.title())
        }
        RouteDecision::Redirect(fallback) => {
            tracing::warn!(
                route = %route,
                fallback = %fallback,
                role = actor.map_or("anonymous", |actor| actor.role.as_str()),
                "not permitted for this role; showing {} instead",
                fallback.title()
            );
            Ok(GuardOutcome::FallBack(fallback))
        }
    }
}
