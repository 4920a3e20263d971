use super::*;
use crate::session::SessionStatus;

#[test]
fn known_paths_roundtrip() {
    for route in [
        AppRoute::Landing,
        AppRoute::Login,
        AppRoute::SignUp,
        AppRoute::Report,
        AppRoute::Dashboard,
        AppRoute::Feed,
    ] {
        assert_eq!(AppRoute::from_path(route.to_path()), route);
    }
}

#[test]
fn unknown_paths_fall_back_to_not_found() {
    assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/dashboard/extra"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
}

#[test]
fn only_dashboard_and_feed_require_auth() {
    assert!(AppRoute::Dashboard.requires_auth());
    assert!(AppRoute::Feed.requires_auth());
    for route in [
        AppRoute::Landing,
        AppRoute::Login,
        AppRoute::SignUp,
        AppRoute::Report,
        AppRoute::NotFound,
    ] {
        assert!(!route.requires_auth(), "{route} should be public");
    }
}

#[test]
fn guard_waits_while_session_is_initializing() {
    assert_eq!(
        evaluate_guard(AppRoute::Dashboard, SessionStatus::Initializing),
        GuardDecision::Wait
    );
    // Public routes render even before the session store has been read
    assert_eq!(
        evaluate_guard(AppRoute::Landing, SessionStatus::Initializing),
        GuardDecision::Render
    );
}

#[test]
fn guard_redirects_unauthenticated_visitors_and_captures_the_target() {
    assert_eq!(
        evaluate_guard(AppRoute::Dashboard, SessionStatus::Unauthenticated),
        GuardDecision::RedirectToLogin {
            from: AppRoute::Dashboard
        }
    );
    assert_eq!(
        evaluate_guard(AppRoute::Feed, SessionStatus::Unauthenticated),
        GuardDecision::RedirectToLogin {
            from: AppRoute::Feed
        }
    );
}

#[test]
fn guard_renders_for_authenticated_sessions() {
    assert_eq!(
        evaluate_guard(AppRoute::Dashboard, SessionStatus::Authenticated),
        GuardDecision::Render
    );
    assert_eq!(
        evaluate_guard(AppRoute::Login, SessionStatus::Authenticated),
        GuardDecision::Render
    );
}

#[test]
fn guard_is_idempotent_for_unchanged_inputs() {
    for status in [
        SessionStatus::Initializing,
        SessionStatus::Unauthenticated,
        SessionStatus::Authenticated,
    ] {
        for route in [AppRoute::Landing, AppRoute::Dashboard, AppRoute::Feed] {
            assert_eq!(
                evaluate_guard(route, status),
                evaluate_guard(route, status)
            );
        }
    }
}

#[test]
fn public_routes_never_redirect() {
    for status in [
        SessionStatus::Initializing,
        SessionStatus::Unauthenticated,
        SessionStatus::Authenticated,
    ] {
        assert_eq!(
            evaluate_guard(AppRoute::Report, status),
            GuardDecision::Render
        );
    }
}
