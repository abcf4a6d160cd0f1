//! Static footer content

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<FooterLink>,
}

/// Footer shown on every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub logo_src: String,
    pub blurb: String,
    pub columns: Vec<FooterColumn>,
    pub copyright: String,
}

fn column(title: &str, links: &[(&str, &str)]) -> FooterColumn {
    FooterColumn {
        title: title.to_string(),
        links: links
            .iter()
            .map(|(label, href)| FooterLink {
                label: label.to_string(),
                href: href.to_string(),
            })
            .collect(),
    }
}

impl Footer {
    /// Footer used across the Hospital CMS pages
    pub fn site(patient_dashboard: &str) -> Self {
        Self {
            logo_src: "./assets/images/logo/logo.png".to_string(),
            blurb: "Your trusted healthcare management system. Providing quality care and efficient management solutions.".to_string(),
            columns: vec![
                column(
                    "Quick Links",
                    &[
                        ("Home", "/"),
                        ("Find Doctors", patient_dashboard),
                        ("About Us", "#"),
                        ("Contact", "#"),
                    ],
                ),
                column(
                    "Services",
                    &[
                        ("Book Appointment", "#"),
                        ("Medical Records", "#"),
                        ("Prescriptions", "#"),
                        ("Health Tips", "#"),
                    ],
                ),
                column(
                    "Support",
                    &[
                        ("Help Center", "#"),
                        ("Privacy Policy", "#"),
                        ("Terms of Service", "#"),
                        ("FAQ", "#"),
                    ],
                ),
            ],
            copyright: "© 2025 Hospital CMS. All rights reserved.".to_string(),
        }
    }
}
