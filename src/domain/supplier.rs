//! Supplier record

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A supplier with an email address as primary contact channel. The
/// optional subject/body templates support the placeholders
/// `{product_name}`, `{quantity}` and `{unit}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_body_template: Option<String>,
}

impl Supplier {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Precondition check before any persistence call.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("supplier name must not be empty".into()));
        }
        if self.email.trim().is_empty() {
            return Err(Error::Validation("supplier email must not be empty".into()));
        }
        if !self.email.contains('@') {
            return Err(Error::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }

    pub fn render_subject(&self, product_name: &str, quantity: u32, unit: &str) -> Option<String> {
        self.email_subject_template
            .as_deref()
            .map(|t| render(t, product_name, quantity, unit))
    }

    pub fn render_body(&self, product_name: &str, quantity: u32, unit: &str) -> Option<String> {
        self.email_body_template
            .as_deref()
            .map(|t| render(t, product_name, quantity, unit))
    }
}

fn render(template: &str, product_name: &str, quantity: u32, unit: &str) -> String {
    template
        .replace("{product_name}", product_name)
        .replace("{quantity}", &quantity.to_string())
        .replace("{unit}", unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_placeholders() {
        let mut s = Supplier::new("Kaffeerösterei Nord", "bestellung@roesterei.example");
        s.email_body_template =
            Some("Bitte liefern Sie {quantity} {unit} {product_name}.".to_string());

        assert_eq!(
            s.render_body("Kaffee Bohnen", 10, "kg").as_deref(),
            Some("Bitte liefern Sie 10 kg Kaffee Bohnen.")
        );
        assert_eq!(s.render_subject("Kaffee Bohnen", 10, "kg"), None);
    }

    #[test]
    fn email_is_required() {
        let s = Supplier::new("Getränke Müller", "");
        assert!(s.validate().is_err());

        let s = Supplier::new("Getränke Müller", "not-an-address");
        assert!(s.validate().is_err());

        let s = Supplier::new("Getränke Müller", "info@mueller.example");
        assert!(s.validate().is_ok());
    }
}
