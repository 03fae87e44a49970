use navgate::{
    CurrentUser, NavigationAttempt, Navigator, NavigatorConfig, RouteTable, SessionHandle,
    StaticSession,
};
use std::{sync::Arc, time::Duration};

fn navigator(session: StaticSession) -> Navigator<StaticSession> {
    Navigator::new(
        RouteTable::builtin().unwrap(),
        session,
        &NavigatorConfig::default(),
    )
    .unwrap()
}

fn signed_in() -> StaticSession {
    StaticSession::signed_in(CurrentUser::new("user-1"))
}

fn declared_paths(guarded: bool) -> Vec<String> {
    RouteTable::builtin()
        .unwrap()
        .iter()
        .filter(|r| !r.pattern().is_catch_all() && r.meta().requires_auth == guarded)
        .map(|r| r.path().to_string())
        .collect()
}

#[tokio::test]
async fn guarded_routes_redirect_when_signed_out() {
    let navigator = navigator(StaticSession::signed_out());
    let guarded = declared_paths(true);
    assert_eq!(
        guarded,
        [
            "/overview",
            "/assessment",
            "/assessmentwindow",
            "/trends",
            "/dashboard",
            "/profile",
            "/settings",
        ]
    );

    for path in guarded {
        let resolution = navigator.navigate(&NavigationAttempt::new(&path)).await;
        assert_eq!(resolution.path, "/login", "{path}");
        assert_eq!(resolution.name, "Login", "{path}");
        assert_eq!(resolution.redirected_from.as_deref(), Some(path.as_str()));
    }
}

#[tokio::test]
async fn guarded_routes_render_when_signed_in() {
    let navigator = navigator(signed_in());

    for path in declared_paths(true) {
        let resolution = navigator.navigate(&NavigationAttempt::new(&path)).await;
        assert_eq!(resolution.path, path);
        assert!(resolution.requires_auth, "{path}");
        assert!(!resolution.is_redirect(), "{path}");
    }
}

#[tokio::test]
async fn public_routes_ignore_the_session() {
    let signed_out = navigator(StaticSession::signed_out());
    let signed_in = navigator(signed_in());

    for path in declared_paths(false) {
        let attempt = NavigationAttempt::new(&path);
        let anonymous = signed_out.navigate(&attempt).await;
        let known = signed_in.navigate(&attempt).await;

        assert_eq!(anonymous, known, "{path}");
        assert_eq!(anonymous.path, path);
        assert!(!anonymous.is_redirect(), "{path}");
    }
}

#[tokio::test]
async fn unmatched_paths_render_not_found() {
    for session in [StaticSession::signed_out(), signed_in()] {
        let navigator = navigator(session);
        for path in ["/unknown-path", "/dashboard/extra", "/a/b/c", "/pricing.html"] {
            let resolution = navigator.navigate(&NavigationAttempt::new(path)).await;
            assert!(resolution.not_found, "{path}");
            assert_eq!(resolution.name, "not-found");
            assert_eq!(resolution.component, "NotFoundView");
            assert!(!resolution.is_redirect());
        }
    }
}

#[tokio::test]
async fn dashboard_signed_out_redirects_to_login() {
    let resolution = navigator(StaticSession::signed_out())
        .navigate(&NavigationAttempt::new("/dashboard"))
        .await;

    assert_eq!(resolution.path, "/login");
    assert_eq!(resolution.component, "Login");
}

#[tokio::test]
async fn dashboard_signed_in_renders_dashboard() {
    let resolution = navigator(signed_in())
        .navigate(&NavigationAttempt::new("/dashboard"))
        .await;

    assert_eq!(resolution.name, "Dashboard");
    assert_eq!(resolution.component, "DashboardOverview");
    assert_eq!(resolution.redirected_from, None);
}

#[tokio::test]
async fn pricing_signed_out_renders_pricing() {
    let resolution = navigator(StaticSession::signed_out())
        .navigate(&NavigationAttempt::new("/pricing"))
        .await;

    assert_eq!(resolution.name, "Pricing");
    assert_eq!(resolution.component, "PricingView");
}

#[tokio::test]
async fn unknown_path_renders_not_found() {
    let resolution = navigator(StaticSession::signed_out())
        .navigate(&NavigationAttempt::new("/unknown-path"))
        .await;

    assert!(resolution.not_found);
    assert_eq!(resolution.params.get("catchAll").map(String::as_str), Some("unknown-path"));
}

#[tokio::test]
async fn path_normalization() {
    let navigator = navigator(signed_in());

    for path in [
        "/Dashboard",
        "/dashboard/",
        "//dashboard",
        "/dashboard?tab=kpi",
        "/dashboard#top",
    ] {
        let resolution = navigator.navigate(&NavigationAttempt::new(path)).await;
        assert_eq!(resolution.name, "Dashboard", "{path}");
    }
}

#[tokio::test]
async fn base_path_is_honored() {
    let config = NavigatorConfig {
        base_path: "/app".to_string(),
        ..NavigatorConfig::default()
    };
    let navigator = Navigator::new(
        RouteTable::builtin().unwrap(),
        StaticSession::signed_out(),
        &config,
    )
    .unwrap();

    let resolution = navigator
        .navigate(&NavigationAttempt::new("/app/settings"))
        .await;
    assert_eq!(resolution.path, "/login");
    assert_eq!(navigator.href(&resolution.path), "/app/login");
}

#[tokio::test]
async fn restoring_session_delays_navigation() {
    let session = SessionHandle::new();
    let navigator = Arc::new(
        Navigator::new(
            RouteTable::builtin().unwrap(),
            session.clone(),
            &NavigatorConfig::default(),
        )
        .unwrap(),
    );

    let pending = {
        let navigator = Arc::clone(&navigator);
        tokio::spawn(async move {
            navigator
                .navigate(&NavigationAttempt::new("/profile"))
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!pending.is_finished());

    session.finish_restoration(Some(CurrentUser::new("user-1")));
    let resolution = tokio::time::timeout(Duration::from_secs(1), pending)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(resolution.name, "Profile");
    assert!(!resolution.is_redirect());

    // Later sign-outs are seen by the next navigation without waiting.
    session.sign_out();
    let resolution = navigator
        .navigate(&NavigationAttempt::new("/profile"))
        .await;
    assert_eq!(resolution.name, "Login");
}
