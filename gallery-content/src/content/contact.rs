//! Contact page content
//!
//! The contact page is not backed by the CMS; its text ships with the crate.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub heading: String,
    pub tagline: String,
    pub body: String,
    pub address_label: String,
    pub address: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            heading: "Contact us".to_string(),
            tagline: "Get in touch with Hamur Artspace".to_string(),
            body: "Hamur Art Space is here to connect! Whether you're an artist seeking \
                   representation, an art enthusiast with questions, or simply curious \
                   about our upcoming exhibitions, we'd love to hear from you."
                .to_string(),
            address_label: "Hamur Art Space Address".to_string(),
            address: "Malang, East Java, Indonesia".to_string(),
        }
    }
}
