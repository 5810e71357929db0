//! Route guarding as a pure function of the session and the requested route.
//! This is a UX guard; the backend remains the authority on every operation.

use crate::{
    features::users::{Role, User},
    navigation::Route,
};

/// Capability check shared by route guards and views. An empty `required`
/// list admits any authenticated user; no user is never admitted.
#[must_use]
pub fn has_role(user: Option<&User>, required: &[Role]) -> bool {
    user.is_some_and(|user| required.is_empty() || required.contains(&user.role))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session check has not settled; render a loading state.
    Pending,
    Allow,
    Redirect(Route),
    /// Authenticated, but the role is not admitted to the route.
    Deny { required: &'static [Role] },
}

#[must_use]
pub fn guard(user: Option<&User>, loading: bool, route: &Route) -> GuardDecision {
    if loading {
        return GuardDecision::Pending;
    }

    match user {
        None if route.is_public() => GuardDecision::Allow,
        None => GuardDecision::Redirect(Route::Login),
        Some(user) if route.is_public_only() => {
            GuardDecision::Redirect(Route::landing_for(user.role))
        }
        Some(user) if !has_role(Some(user), route.required_roles()) => GuardDecision::Deny {
            required: route.required_roles(),
        },
        Some(_) => GuardDecision::Allow,
    }
}
