//! Session controller behaviour tests
//! Exercises the role/token state machine against an in-memory store
//! and a scripted authentication API.

use async_trait::async_trait;
use clinicnav::auth::{AuthApi, Credentials, LoginResponse};
use clinicnav::config::RoutesConfig;
use clinicnav::error::{Error, LoginError, Result};
use clinicnav::session::{
    ActionTarget, FileStore, HeaderLayout, LoginCategory, MemoryStore, NavActionKind, NavOutcome,
    RecordingNotifier, Redirect, Role, RoleSelection, SessionController, SessionStore,
    SESSION_EXPIRED, ROLE_KEY, TOKEN_KEY,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// What the scripted API answers
#[derive(Clone)]
enum Reply {
    Respond(LoginResponse),
    Fail(String),
}

/// Auth API that replays scripted replies and records calls
struct ScriptedAuth {
    default: Reply,
    per_category: HashMap<LoginCategory, Reply>,
    calls: Arc<Mutex<Vec<(LoginCategory, String)>>>,
}

impl ScriptedAuth {
    fn new(default: Reply) -> Self {
        Self {
            default,
            per_category: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with(mut self, category: LoginCategory, reply: Reply) -> Self {
        self.per_category.insert(category, reply);
        self
    }
}

#[async_trait]
impl AuthApi for ScriptedAuth {
    async fn login(&self, category: LoginCategory, credentials: &Credentials) -> Result<LoginResponse> {
        self.calls
            .lock()
            .push((category, credentials.username.clone()));
        // Let other in-flight logins interleave
        tokio::task::yield_now().await;
        match self.per_category.get(&category).unwrap_or(&self.default) {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(reason) => Err(Error::Io(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, reason.clone()))),
        }
    }
}

type TestController = SessionController<MemoryStore, ScriptedAuth, RecordingNotifier>;

fn controller_with(entries: &[(&str, &str)], reply: Reply) -> TestController {
    SessionController::new(
        MemoryStore::with_entries(entries.iter().copied()),
        ScriptedAuth::new(reply),
        RecordingNotifier::new(),
        RoutesConfig::default(),
    )
}

fn controller(entries: &[(&str, &str)]) -> TestController {
    controller_with(entries, Reply::Fail("no network in this test".to_string()))
}

fn stored(c: &TestController, key: &str) -> Option<String> {
    c.store().get(key).unwrap()
}

// ============================================================================
// derive_navigation
// ============================================================================

#[test]
fn test_privileged_roles_without_token_are_repaired() {
    for role in ["admin", "doctor", "loggedPatient"] {
        let c = controller(&[(ROLE_KEY, role)]);

        let outcome = c.derive_navigation("/pages/anything.html").unwrap();

        assert_eq!(outcome, NavOutcome::Redirect(Redirect::to("/")), "role {role}");
        assert_eq!(stored(&c, ROLE_KEY), None, "role {role} should be cleared");
        assert_eq!(c.notifier().messages(), vec![SESSION_EXPIRED.to_string()]);
    }
}

#[test]
fn test_patient_and_no_role_never_redirect() {
    let cases: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![(TOKEN_KEY, "stale")],
        vec![(ROLE_KEY, "patient")],
        vec![(ROLE_KEY, "patient"), (TOKEN_KEY, "stale")],
    ];

    for entries in cases {
        let c = controller(&entries);
        let outcome = c.derive_navigation("/pages/patientDashboard.html").unwrap();
        assert!(outcome.redirect().is_none(), "entries {:?}", entries);
        assert!(c.notifier().messages().is_empty());
    }
}

#[test]
fn test_navigation_per_role() {
    let cases = [
        ("admin", vec![NavActionKind::AddDoctor, NavActionKind::Logout]),
        ("doctor", vec![NavActionKind::Home, NavActionKind::Logout]),
        ("patient", vec![NavActionKind::Login, NavActionKind::Signup]),
        (
            "loggedPatient",
            vec![NavActionKind::Home, NavActionKind::Appointments, NavActionKind::Logout],
        ),
    ];

    for (role, expected) in cases {
        let c = controller(&[(ROLE_KEY, role), (TOKEN_KEY, "tok")]);
        let outcome = c.derive_navigation("/pages/page.html").unwrap();
        let nav = outcome.descriptor().expect("descriptor");
        assert_eq!(nav.layout, HeaderLayout::Full);
        assert_eq!(nav.kinds(), expected, "role {role}");
    }
}

#[test]
fn test_no_role_gets_empty_full_header() {
    let c = controller(&[]);
    let outcome = c.derive_navigation("/pages/page.html").unwrap();
    let nav = outcome.descriptor().unwrap();
    assert_eq!(nav.layout, HeaderLayout::Full);
    assert!(nav.actions.is_empty());
}

#[test]
fn test_logged_patient_targets() {
    let c = controller(&[(ROLE_KEY, "loggedPatient"), (TOKEN_KEY, "tok")]);
    let outcome = c.derive_navigation("/pages/loggedPatientDashboard.html").unwrap();
    let nav = outcome.descriptor().unwrap();

    assert_eq!(
        nav.actions[0].target,
        ActionTarget::Route("/pages/loggedPatientDashboard.html".to_string())
    );
    assert_eq!(
        nav.actions[1].target,
        ActionTarget::Route("/pages/patientAppointments.html".to_string())
    );
    assert_eq!(nav.actions[2].target, ActionTarget::LogoutPatient);
}

#[test]
fn test_index_paths_get_minimal_header() {
    for path in ["/", "/index.html", "/site/index.html"] {
        let c = controller(&[(ROLE_KEY, "doctor")]);
        let outcome = c.derive_navigation(path).unwrap();
        assert_eq!(outcome.descriptor().unwrap().layout, HeaderLayout::Minimal);
        assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("doctor"));
    }
}

// ============================================================================
// select_role
// ============================================================================

#[test]
fn test_select_admin_with_existing_token() {
    let c = controller(&[(TOKEN_KEY, "abc")]);
    let selection = c.select_role(Role::Admin).unwrap();
    assert_eq!(selection, RoleSelection::Redirect(Redirect::to("/adminDashboard/abc")));
    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("admin"));
}

#[test]
fn test_select_doctor_with_existing_token() {
    let c = controller(&[(TOKEN_KEY, "abc")]);
    let selection = c.select_role(Role::Doctor).unwrap();
    assert_eq!(selection.redirect(), Some(&Redirect::to("/doctorDashboard/abc")));
}

#[test]
fn test_select_admin_without_token_does_not_redirect() {
    let c = controller(&[]);
    let selection = c.select_role(Role::Admin).unwrap();
    assert_eq!(
        selection,
        RoleSelection::LoginRequired {
            category: LoginCategory::Admin
        }
    );
    assert!(selection.redirect().is_none());
    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("admin"));
}

#[test]
fn test_select_patient_roles_always_redirect() {
    let c = controller(&[]);
    assert_eq!(
        c.select_role(Role::Patient).unwrap().redirect(),
        Some(&Redirect::to("/pages/patientDashboard.html"))
    );
    assert_eq!(
        c.select_role(Role::LoggedPatient).unwrap().redirect(),
        Some(&Redirect::to("/pages/loggedPatientDashboard.html"))
    );
    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("loggedPatient"));
}

// ============================================================================
// login
// ============================================================================

#[tokio::test]
async fn test_doctor_login_success() {
    let c = controller_with(&[], Reply::Respond(LoginResponse::accepted("xyz")));

    let success = c
        .login(LoginCategory::Doctor, Credentials::new("doc@clinic.example", "pw"))
        .await
        .unwrap();

    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("doctor"));
    assert_eq!(stored(&c, TOKEN_KEY).as_deref(), Some("xyz"));
    assert_eq!(success.redirect, Redirect::to("/doctor/dashboard"));
    assert_eq!(success.state.role, Some(Role::Doctor));
}

#[tokio::test]
async fn test_login_lands_on_category_dashboard() {
    let cases = [
        (LoginCategory::Admin, "admin", "/admin/dashboard"),
        (LoginCategory::Patient, "loggedPatient", "/pages/loggedPatientDashboard.html"),
    ];

    for (category, role, landing) in cases {
        let c = controller_with(&[], Reply::Respond(LoginResponse::accepted("t")));
        let success = c.login(category, Credentials::new("u", "p")).await.unwrap();
        assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some(role));
        assert_eq!(success.redirect.to, landing);
    }
}

#[tokio::test]
async fn test_rejected_login_leaves_state_untouched() {
    let c = controller_with(
        &[(ROLE_KEY, "patient"), (TOKEN_KEY, "old")],
        Reply::Respond(LoginResponse::rejected("bad creds")),
    );

    let err = c
        .login(LoginCategory::Patient, Credentials::new("p@clinic.example", "nope"))
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), Some("bad creds"));
    assert_eq!(c.notifier().last().as_deref(), Some("Login failed: bad creds"));
    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("patient"));
    assert_eq!(stored(&c, TOKEN_KEY).as_deref(), Some("old"));
}

#[tokio::test]
async fn test_transport_failure_is_caught() {
    let c = controller_with(&[(ROLE_KEY, "admin"), (TOKEN_KEY, "keep")], Reply::Fail("connection reset".into()));

    let err = c
        .login(LoginCategory::Admin, Credentials::new("admin", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::Transport(_)));
    assert_eq!(
        c.notifier().last().as_deref(),
        Some("Login failed. Please try again.")
    );
    assert_eq!(stored(&c, TOKEN_KEY).as_deref(), Some("keep"));
    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_empty_server_message_uses_fallback() {
    let c = controller_with(&[], Reply::Respond(LoginResponse::rejected("")));
    let err = c
        .login(LoginCategory::Doctor, Credentials::new("d", "p"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Login failed: Invalid credentials");
}

#[tokio::test]
async fn test_login_posts_to_selected_category() {
    let auth = ScriptedAuth::new(Reply::Respond(LoginResponse::accepted("t")));
    let calls = Arc::clone(&auth.calls);
    let c = SessionController::new(
        MemoryStore::new(),
        auth,
        RecordingNotifier::new(),
        RoutesConfig::default(),
    );

    c.login(LoginCategory::Patient, Credentials::new("pat@clinic.example", "pw"))
        .await
        .unwrap();

    assert_eq!(
        *calls.lock(),
        vec![(LoginCategory::Patient, "pat@clinic.example".to_string())]
    );
}

#[tokio::test]
async fn test_racing_logins_leave_a_consistent_pair() {
    let auth = ScriptedAuth::new(Reply::Fail("unexpected".into()))
        .with(LoginCategory::Admin, Reply::Respond(LoginResponse::accepted("admin-token")))
        .with(LoginCategory::Doctor, Reply::Respond(LoginResponse::accepted("doctor-token")));
    let c = SessionController::new(
        MemoryStore::new(),
        auth,
        RecordingNotifier::new(),
        RoutesConfig::default(),
    );

    let (admin, doctor) = tokio::join!(
        c.login(LoginCategory::Admin, Credentials::new("a", "p")),
        c.login(LoginCategory::Doctor, Credentials::new("d", "p")),
    );
    assert!(admin.is_ok());
    assert!(doctor.is_ok());

    let pair = (stored(&c, ROLE_KEY).unwrap(), stored(&c, TOKEN_KEY).unwrap());
    assert!(
        pair == ("admin".to_string(), "admin-token".to_string())
            || pair == ("doctor".to_string(), "doctor-token".to_string()),
        "mixed session state: {:?}",
        pair
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_logins_against_file_store_never_mix() {
    let dir = tempfile::TempDir::new().unwrap();
    let auth = ScriptedAuth::new(Reply::Fail("unexpected".into()))
        .with(LoginCategory::Admin, Reply::Respond(LoginResponse::accepted("admin-token")))
        .with(LoginCategory::Doctor, Reply::Respond(LoginResponse::accepted("doctor-token")));
    let c = Arc::new(SessionController::new(
        FileStore::new(dir.path().join("session.json")),
        auth,
        RecordingNotifier::new(),
        RoutesConfig::default(),
    ));

    let mut handles = Vec::new();
    for i in 0..16 {
        let c = Arc::clone(&c);
        let category = if i % 2 == 0 {
            LoginCategory::Admin
        } else {
            LoginCategory::Doctor
        };
        handles.push(tokio::spawn(async move {
            c.login(category, Credentials::new("user", "p")).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let state = c.snapshot().unwrap();
    let pair = (state.role.unwrap(), state.token.unwrap());
    assert!(
        pair == (Role::Admin, "admin-token".to_string())
            || pair == (Role::Doctor, "doctor-token".to_string()),
        "mixed session state: {:?}",
        pair
    );
}

// ============================================================================
// logout
// ============================================================================

#[test]
fn test_logout_clears_everything() {
    let cases: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![(ROLE_KEY, "admin"), (TOKEN_KEY, "abc")],
        vec![(ROLE_KEY, "loggedPatient")],
        vec![(TOKEN_KEY, "orphan")],
    ];

    for entries in cases {
        let c = controller(&entries);
        assert_eq!(c.logout().unwrap(), Redirect::to("/"));
        assert_eq!(stored(&c, ROLE_KEY), None);
        assert_eq!(stored(&c, TOKEN_KEY), None);
    }
}

#[test]
fn test_logout_patient_demotes_to_patient() {
    let c = controller(&[(ROLE_KEY, "loggedPatient"), (TOKEN_KEY, "abc")]);

    let to = c.logout_patient().unwrap();

    assert_eq!(to, Redirect::to("/pages/patientDashboard.html"));
    assert_eq!(stored(&c, TOKEN_KEY), None);
    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("patient"));
}

#[test]
fn test_logout_patient_sets_patient_even_without_prior_role() {
    let c = controller(&[]);
    c.logout_patient().unwrap();
    assert_eq!(stored(&c, ROLE_KEY).as_deref(), Some("patient"));
}

// ============================================================================
// index entry and page guard
// ============================================================================

#[test]
fn test_enter_index_keeps_token() {
    let c = controller(&[(ROLE_KEY, "doctor"), (TOKEN_KEY, "abc")]);
    c.enter_index().unwrap();
    assert_eq!(stored(&c, ROLE_KEY), None);
    assert_eq!(stored(&c, TOKEN_KEY).as_deref(), Some("abc"));
}

#[test]
fn test_guard_redirects_only_without_role() {
    let anonymous = controller(&[]);
    assert_eq!(
        anonymous.guard_page("/pages/patientDashboard.html").unwrap(),
        Some(Redirect::to("/"))
    );
    assert_eq!(anonymous.guard_page("/pages/").unwrap(), None);
    assert_eq!(anonymous.guard_page("/index.html").unwrap(), None);

    let patient = controller(&[(ROLE_KEY, "patient")]);
    assert_eq!(patient.guard_page("/pages/patientDashboard.html").unwrap(), None);
}

#[test]
fn test_select_role_after_index_reuses_token() {
    let c = controller(&[(ROLE_KEY, "doctor"), (TOKEN_KEY, "abc")]);
    c.enter_index().unwrap();
    let selection = c.select_role(Role::Doctor).unwrap();
    assert_eq!(selection.redirect(), Some(&Redirect::to("/doctorDashboard/abc")));
}
