//! Role/session state machine

use serde::Serialize;

use crate::auth::{AuthApi, Credentials};
use crate::config::RoutesConfig;
use crate::error::{LoginError, Result};

use super::forms::LoginForm;
use super::navigation::{
    is_index_path, ActionTarget, NavAction, NavActionKind, NavOutcome, NavigationDescriptor,
    Redirect, RoleSelection,
};
use super::notice::{Notifier, SESSION_EXPIRED};
use super::role::{LoginCategory, Role};
use super::store::{SessionStore, ROLE_KEY, TOKEN_KEY};

/// Snapshot of the persisted session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub role: Option<Role>,
    pub token: Option<String>,
}

impl SessionState {
    /// A privileged role without a token is invalid
    pub fn is_valid(&self) -> bool {
        match self.role {
            Some(role) if role.requires_token() => self.token.is_some(),
            _ => true,
        }
    }
}

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginSuccess {
    pub state: SessionState,
    pub redirect: Redirect,
}

/// Owns the interpretation of the persisted `(role, token)` pair.
///
/// All access to persisted state goes through the injected
/// [`SessionStore`]; user-visible messages go through the [`Notifier`].
pub struct SessionController<S, A, N> {
    store: S,
    auth: A,
    notifier: N,
    routes: RoutesConfig,
}

impl<S, A, N> SessionController<S, A, N>
where
    S: SessionStore,
    A: AuthApi,
    N: Notifier,
{
    pub fn new(store: S, auth: A, notifier: N, routes: RoutesConfig) -> Self {
        Self {
            store,
            auth,
            notifier,
            routes,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Persisted role, with unrecognised values treated as no role
    fn role(&self) -> Result<Option<Role>> {
        let Some(raw) = self.store.get(ROLE_KEY)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<Role>() {
            Ok(role) => Ok(Some(role)),
            Err(e) => {
                tracing::warn!("Ignoring persisted role: {}", e);
                Ok(None)
            }
        }
    }

    /// Persisted token; an empty string counts as absent
    fn token(&self) -> Result<Option<String>> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Read the current session
    pub fn snapshot(&self) -> Result<SessionState> {
        Ok(SessionState {
            role: self.role()?,
            token: self.token()?,
        })
    }

    /// Work out the header navigation for `pathname`.
    ///
    /// The index page always gets the minimal header without touching
    /// state. Elsewhere a privileged role without a token is repaired
    /// (role cleared, user notified) and redirected to the root.
    pub fn derive_navigation(&self, pathname: &str) -> Result<NavOutcome> {
        if is_index_path(pathname) {
            return Ok(NavOutcome::Render(NavigationDescriptor::minimal()));
        }

        let state = self.snapshot()?;
        if !state.is_valid() {
            tracing::warn!(
                "Session for role {:?} has no token on {}, clearing role",
                state.role,
                pathname
            );
            self.store.remove(ROLE_KEY)?;
            self.notifier.notify(SESSION_EXPIRED);
            return Ok(NavOutcome::Redirect(Redirect::to(&self.routes.root)));
        }

        let actions = match state.role {
            Some(role) => self.actions_for(role),
            None => Vec::new(),
        };
        tracing::debug!("Navigation for {:?} on {}: {} actions", state.role, pathname, actions.len());

        Ok(NavOutcome::Render(NavigationDescriptor::full(state.role, actions)))
    }

    fn actions_for(&self, role: Role) -> Vec<NavAction> {
        match role {
            Role::Admin => vec![
                NavAction::new(NavActionKind::AddDoctor, ActionTarget::Modal("addDoctor".to_string())),
                NavAction::new(NavActionKind::Logout, ActionTarget::Logout),
            ],
            Role::Doctor => vec![
                NavAction::new(NavActionKind::Home, ActionTarget::SelectRole(Role::Doctor)),
                NavAction::new(NavActionKind::Logout, ActionTarget::Logout),
            ],
            Role::Patient => vec![
                NavAction::new(NavActionKind::Login, ActionTarget::LoginForm(LoginCategory::Patient)),
                NavAction::new(NavActionKind::Signup, ActionTarget::SignupForm),
            ],
            Role::LoggedPatient => vec![
                NavAction::new(
                    NavActionKind::Home,
                    ActionTarget::Route(self.routes.logged_patient_dashboard.clone()),
                ),
                NavAction::new(
                    NavActionKind::Appointments,
                    ActionTarget::Route(self.routes.patient_appointments.clone()),
                ),
                NavAction::new(NavActionKind::Logout, ActionTarget::LogoutPatient),
            ],
        }
    }

    /// Persist `role` and decide where to go next.
    ///
    /// Admin and doctor dashboards are addressed by the token already
    /// held; without one the caller stays put and should offer the login
    /// form for the returned category.
    pub fn select_role(&self, role: Role) -> Result<RoleSelection> {
        let token = self.token()?;
        self.store.set(ROLE_KEY, role.as_str())?;
        tracing::info!("Selected role {}", role);

        let dashboard = match role {
            Role::Admin => &self.routes.admin_dashboard,
            Role::Doctor => &self.routes.doctor_dashboard,
            Role::Patient => {
                return Ok(RoleSelection::Redirect(Redirect::to(&self.routes.patient_dashboard)))
            }
            Role::LoggedPatient => {
                return Ok(RoleSelection::Redirect(Redirect::to(
                    &self.routes.logged_patient_dashboard,
                )))
            }
        };

        match token {
            Some(token) => Ok(RoleSelection::Redirect(Redirect::to(
                RoutesConfig::with_token(dashboard, &token),
            ))),
            None => {
                tracing::info!("Role {} selected without a session token, login required", role);
                Ok(RoleSelection::LoginRequired {
                    category: role.login_category(),
                })
            }
        }
    }

    /// Authenticate against the endpoint for `category`.
    ///
    /// On failure the persisted session is left as it was and the reason
    /// is surfaced through the notifier.
    pub async fn login(
        &self,
        category: LoginCategory,
        credentials: Credentials,
    ) -> std::result::Result<LoginSuccess, LoginError> {
        let response = match self.auth.login(category, &credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Login error for {}: {}", category, e);
                let err = LoginError::Transport(e.to_string());
                self.notifier.notify(&err.to_string());
                return Err(err);
            }
        };

        let Some(token) = response.session_token() else {
            let err = LoginError::Rejected {
                message: response.message.clone().filter(|m| !m.is_empty()),
            };
            tracing::warn!("Login rejected for {} as {}", credentials.username, category);
            self.notifier.notify(&err.to_string());
            return Err(err);
        };

        let role = category.granted_role();
        if let Err(e) = self.persist_login(token, role) {
            tracing::error!("Failed to persist session after {} login: {}", category, e);
            let err = LoginError::Store(e);
            self.notifier.notify(&err.to_string());
            return Err(err);
        }

        tracing::info!("Logged in {} as {}", credentials.username, role);
        Ok(LoginSuccess {
            state: SessionState {
                role: Some(role),
                token: Some(token.to_string()),
            },
            redirect: Redirect::to(self.login_landing(category)),
        })
    }

    fn persist_login(&self, token: &str, role: Role) -> Result<()> {
        self.store
            .set_many(&[(TOKEN_KEY, token), (ROLE_KEY, role.as_str())])
    }

    fn login_landing(&self, category: LoginCategory) -> &str {
        match category {
            LoginCategory::Admin => &self.routes.admin_home,
            LoginCategory::Doctor => &self.routes.doctor_home,
            LoginCategory::Patient => &self.routes.logged_patient_dashboard,
        }
    }

    /// Clear role and token and return to the root
    pub fn logout(&self) -> Result<Redirect> {
        self.store.remove(ROLE_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        tracing::info!("Logged out");
        Ok(Redirect::to(&self.routes.root))
    }

    /// Drop the token but stay an anonymous patient
    pub fn logout_patient(&self) -> Result<Redirect> {
        self.store.remove(TOKEN_KEY)?;
        self.store.set(ROLE_KEY, Role::Patient.as_str())?;
        tracing::info!("Patient logged out");
        Ok(Redirect::to(&self.routes.patient_dashboard))
    }

    /// Landing on the index page forgets the selected role
    pub fn enter_index(&self) -> Result<()> {
        self.store.remove(ROLE_KEY)?;
        tracing::debug!("Index page entered, role cleared");
        Ok(())
    }

    /// Send visitors without any role back to the root.
    ///
    /// Any non-empty persisted role value passes, recognised or not.
    pub fn guard_page(&self, pathname: &str) -> Result<Option<Redirect>> {
        let has_role = self
            .store
            .get(ROLE_KEY)?
            .is_some_and(|r| !r.is_empty());
        if has_role || pathname.ends_with('/') || pathname.ends_with("/index.html") {
            return Ok(None);
        }

        tracing::debug!("No role on {}, redirecting to root", pathname);
        Ok(Some(Redirect::to(&self.routes.root)))
    }

    pub fn login_form(&self, category: LoginCategory) -> LoginForm {
        LoginForm::for_category(category)
    }
}
