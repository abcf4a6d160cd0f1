//! HTML fragments for the header, footer and login modal
//!
//! The session layer only produces descriptors; this module turns them
//! into markup with minijinja. Templates are named `*.html` so values are
//! HTML-escaped on output.

mod footer;

pub use footer::{Footer, FooterColumn, FooterLink};

use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::Result;
use crate::session::{ActionTarget, HeaderLayout, LoginForm, NavAction, NavigationDescriptor};

const HEADER_TEMPLATE: &str = r##"<header class="header">
  <a href="{{ root }}" class="logo-link">
    <img src="{{ logo_src }}" alt="Hospital CMS Logo" class="logo-img">
    <span class="logo-title">Hospital CMS</span>
  </a>
{% if full %}
  <nav>
{% for action in actions %}
{% if action.element == "a" %}
    <a href="#" onclick="{{ action.onclick }}">{{ action.label }}</a>
{% else %}
    <button{% if action.id %} id="{{ action.id }}"{% endif %} class="adminBtn"{% if action.onclick %} onclick="{{ action.onclick }}"{% endif %}>{{ action.label }}</button>
{% endif %}
{% endfor %}
  </nav>
{% endif %}
</header>
"##;

const FOOTER_TEMPLATE: &str = r#"<footer class="footer">
  <div class="footer-container">
    <div class="footer-logo">
      <img src="{{ footer.logo_src }}" alt="Hospital CMS Logo">
      <p>{{ footer.blurb }}</p>
    </div>
    <div class="footer-links">
{% for column in footer.columns %}
      <div class="footer-column">
        <h4>{{ column.title }}</h4>
{% for link in column.links %}
        <a href="{{ link.href }}">{{ link.label }}</a>
{% endfor %}
      </div>
{% endfor %}
    </div>
  </div>
  <div class="footer-copyright">
    <p>{{ footer.copyright }}</p>
  </div>
</footer>
"#;

const LOGIN_MODAL_TEMPLATE: &str = r#"<h2>{{ form.title }}</h2>
<form onsubmit="event.preventDefault(); {{ handler }}();">
  <input type="{{ form.identifier.kind }}" id="{{ form.identifier.id }}" class="input-field" placeholder="{{ form.identifier.placeholder }}" required />
  <input type="{{ form.password.kind }}" id="{{ form.password.id }}" class="input-field" placeholder="{{ form.password.placeholder }}" required />
  <button type="submit" class="dashboard-btn">{{ form.submit_label }}</button>
</form>
"#;

/// Markup-level view of a [`NavAction`]
#[derive(Debug, Serialize)]
struct ActionView {
    element: &'static str,
    id: Option<String>,
    onclick: Option<String>,
    label: &'static str,
}

impl From<&NavAction> for ActionView {
    fn from(action: &NavAction) -> Self {
        let (element, id, onclick) = match &action.target {
            ActionTarget::Modal(name) => ("button", None, Some(format!("openModal('{}')", name))),
            ActionTarget::SelectRole(role) => ("button", None, Some(format!("selectRole('{}')", role))),
            ActionTarget::Route(route) => (
                "button",
                None,
                Some(format!("window.location.href='{}'", route)),
            ),
            ActionTarget::LoginForm(category) => ("button", Some(format!("{}Login", category)), None),
            ActionTarget::SignupForm => ("button", Some("patientSignup".to_string()), None),
            ActionTarget::Logout => ("a", None, Some("logout()".to_string())),
            ActionTarget::LogoutPatient => ("a", None, Some("logoutPatient()".to_string())),
        };

        Self {
            element,
            id,
            onclick,
            label: action.label(),
        }
    }
}

/// Template environment for the page fragments
pub struct Renderer {
    env: Environment<'static>,
    root: String,
}

impl Renderer {
    pub fn new(root: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.add_template("header.html", HEADER_TEMPLATE)?;
        env.add_template("footer.html", FOOTER_TEMPLATE)?;
        env.add_template("login_modal.html", LOGIN_MODAL_TEMPLATE)?;

        Ok(Self {
            env,
            root: root.into(),
        })
    }

    /// Render the page header for a navigation descriptor
    pub fn header(&self, nav: &NavigationDescriptor) -> Result<String> {
        let full = nav.layout == HeaderLayout::Full;
        // Index sits at the site root, every other page one level down
        let logo_src = if full {
            "../assets/images/logo/logo.png"
        } else {
            "./assets/images/logo/logo.png"
        };
        let actions: Vec<ActionView> = nav.actions.iter().map(ActionView::from).collect();

        let template = self.env.get_template("header.html")?;
        let rendered = template.render(context! {
            root => self.root,
            logo_src => logo_src,
            full => full,
            actions => actions,
        })?;
        Ok(rendered)
    }

    pub fn footer(&self, footer: &Footer) -> Result<String> {
        let template = self.env.get_template("footer.html")?;
        Ok(template.render(context! { footer => footer })?)
    }

    /// Render the body of the login modal
    pub fn login_modal(&self, form: &LoginForm) -> Result<String> {
        let template = self.env.get_template("login_modal.html")?;
        Ok(template.render(context! {
            form => form,
            handler => format!("{}LoginHandler", form.category),
        })?)
    }
}
