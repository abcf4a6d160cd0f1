//! Login form descriptors

use serde::Serialize;

use super::role::LoginCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub id: String,
    pub kind: InputKind,
    pub placeholder: &'static str,
}

/// Content of the login modal for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub category: LoginCategory,
    pub title: &'static str,
    pub identifier: FormField,
    pub password: FormField,
    pub submit_label: &'static str,
}

impl LoginForm {
    pub fn for_category(category: LoginCategory) -> Self {
        let (title, identifier) = match category {
            LoginCategory::Admin => (
                "Admin Login",
                FormField {
                    id: "adminUsername".to_string(),
                    kind: InputKind::Text,
                    placeholder: "Username or Email",
                },
            ),
            LoginCategory::Doctor => (
                "Doctor Login",
                FormField {
                    id: "doctorEmail".to_string(),
                    kind: InputKind::Email,
                    placeholder: "Email",
                },
            ),
            LoginCategory::Patient => (
                "Patient Login",
                FormField {
                    id: "patientEmail".to_string(),
                    kind: InputKind::Email,
                    placeholder: "Email",
                },
            ),
        };

        Self {
            category,
            title,
            identifier,
            password: FormField {
                id: format!("{}Password", category.as_str()),
                kind: InputKind::Password,
                placeholder: "Password",
            },
            submit_label: "Login",
        }
    }
}
