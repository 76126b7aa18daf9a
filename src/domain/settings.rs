//! Settings record
//!
//! Flat configuration read once at startup by each consumer. Credential
//! fields default to empty strings, never to absent values, so callers can
//! read sub-fields unconditionally. Changing the backend credentials
//! requires rebuilding the [`DataFacade`](crate::DataFacade).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Email dispatch credentials (EmailJS).
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Remote backend credentials (Supabase project URL and anon key).
    pub supabase_url: String,
    pub supabase_key: String,
    pub enable_stock_management: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            supabase_url: String::new(),
            supabase_key: String::new(),
            enable_stock_management: true,
        }
    }
}

impl Settings {
    /// Presence of both remote credentials is the sole switch between the
    /// local store and the remote backend.
    pub fn remote_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_key.is_empty()
    }

    pub fn email_configured(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_management_defaults_on() {
        assert!(Settings::default().enable_stock_management);
    }

    #[test]
    fn remote_needs_both_credentials() {
        let mut s = Settings::default();
        assert!(!s.remote_configured());

        s.supabase_url = "https://project.supabase.co".into();
        assert!(!s.remote_configured());

        s.supabase_key = "anon-key".into();
        assert!(s.remote_configured());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.service_id, "");
    }
}
