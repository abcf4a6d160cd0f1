//! Navigation descriptors and redirect decisions

use serde::Serialize;
use std::fmt;

use super::role::{LoginCategory, Role};

/// Which header variant to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLayout {
    /// Logo only, used on the index page
    Minimal,
    /// Logo plus role navigation
    Full,
}

/// What activating a navigation item does
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ActionTarget {
    /// Re-run role selection for the given role
    SelectRole(Role),
    /// Navigate to a fixed route
    Route(String),
    /// Open a named modal on the current page
    Modal(String),
    /// Open the login form for a category
    LoginForm(LoginCategory),
    /// Open the patient signup form
    SignupForm,
    /// Run the full logout transition
    Logout,
    /// Run the patient logout transition
    LogoutPatient,
}

/// A single entry in the header navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavAction {
    pub kind: NavActionKind,
    pub target: ActionTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NavActionKind {
    AddDoctor,
    Home,
    Appointments,
    Login,
    Signup,
    Logout,
}

impl NavActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            NavActionKind::AddDoctor => "Add Doctor",
            NavActionKind::Home => "Home",
            NavActionKind::Appointments => "Appointments",
            NavActionKind::Login => "Login",
            NavActionKind::Signup => "Sign Up",
            NavActionKind::Logout => "Logout",
        }
    }
}

impl NavAction {
    pub fn new(kind: NavActionKind, target: ActionTarget) -> Self {
        Self { kind, target }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Everything the header renderer needs for the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationDescriptor {
    pub layout: HeaderLayout,
    pub role: Option<Role>,
    pub actions: Vec<NavAction>,
}

impl NavigationDescriptor {
    /// Logo-only header
    pub fn minimal() -> Self {
        Self {
            layout: HeaderLayout::Minimal,
            role: None,
            actions: Vec::new(),
        }
    }

    pub fn full(role: Option<Role>, actions: Vec<NavAction>) -> Self {
        Self {
            layout: HeaderLayout::Full,
            role,
            actions,
        }
    }

    /// Action kinds in display order
    pub fn kinds(&self) -> Vec<NavActionKind> {
        self.actions.iter().map(|a| a.kind).collect()
    }
}

/// A navigation the caller must perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
}

impl Redirect {
    pub fn to(target: impl Into<String>) -> Self {
        Self { to: target.into() }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to)
    }
}

/// Result of deriving navigation for a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum NavOutcome {
    Render(NavigationDescriptor),
    Redirect(Redirect),
}

impl NavOutcome {
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            NavOutcome::Redirect(r) => Some(r),
            NavOutcome::Render(_) => None,
        }
    }

    pub fn descriptor(&self) -> Option<&NavigationDescriptor> {
        match self {
            NavOutcome::Render(d) => Some(d),
            NavOutcome::Redirect(_) => None,
        }
    }
}

/// Result of choosing a role on the landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RoleSelection {
    Redirect(Redirect),
    /// The role needs a token that is not yet held; no navigation happens
    LoginRequired { category: LoginCategory },
}

impl RoleSelection {
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            RoleSelection::Redirect(r) => Some(r),
            RoleSelection::LoginRequired { .. } => None,
        }
    }
}

/// Whether a path is the site index, where no session state is consulted
pub fn is_index_path(pathname: &str) -> bool {
    pathname == "/" || pathname.ends_with("/index.html")
}
