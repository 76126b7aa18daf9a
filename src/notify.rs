//! Outbound order channels
//!
//! Fire-and-forget collaborators around the core: composing the order
//! email (supplier templates win over legacy per-product fields, which win
//! over built-in defaults), mailto/webmail deep links, templated dispatch
//! via the EmailJS API and the copy-paste command snippets for IoT
//! buttons. Everything here is string formatting except the one dispatch
//! call, which reports success or failure and nothing else.

use serde_json::json;

use crate::domain::{Product, Settings, Supplier};
use crate::{Error, Result};

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// A composed order email, ready for any channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Composes the order email for a product. Fails when neither the linked
/// supplier nor the product's legacy fields provide a recipient.
pub fn order_email(
    product: &Product,
    supplier: Option<&Supplier>,
    quantity: u32,
) -> Result<OrderEmail> {
    let to = supplier
        .map(|s| s.email.clone())
        .or_else(|| product.email_order_address.clone())
        .filter(|addr| !addr.is_empty())
        .ok_or_else(|| {
            Error::Validation(format!("no order email address known for '{}'", product.name))
        })?;

    let subject = supplier
        .and_then(|s| s.render_subject(&product.name, quantity, &product.unit))
        .or_else(|| product.email_order_subject.clone())
        .unwrap_or_else(|| format!("Bestellung: {}", product.name));

    let body = supplier
        .and_then(|s| s.render_body(&product.name, quantity, &product.unit))
        .or_else(|| product.email_order_body.clone())
        .unwrap_or_else(|| {
            format!(
                "Guten Tag,\n\nbitte liefern Sie folgende Ware:\n\nProdukt: {}\nMenge: {} {}\n\nMit freundlichen Grüßen",
                product.name, quantity, product.unit
            )
        });

    Ok(OrderEmail { to, subject, body })
}

pub fn mailto_link(email: &OrderEmail) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email.to,
        urlencoding::encode(&email.subject),
        urlencoding::encode(&email.body)
    )
}

pub fn webmail_link(email: &OrderEmail) -> String {
    format!(
        "https://mail.google.com/mail/?view=cm&fs=1&to={}&su={}&body={}",
        email.to,
        urlencoding::encode(&email.subject),
        urlencoding::encode(&email.body)
    )
}

/// Sends the order email through the configured dispatch service.
pub async fn send_order_email(
    settings: &Settings,
    email: &OrderEmail,
    product_name: &str,
    quantity: u32,
    unit: &str,
) -> Result<()> {
    if !settings.email_configured() {
        return Err(Error::NotConfigured("email dispatch"));
    }

    let payload = json!({
        "service_id": settings.service_id,
        "template_id": settings.template_id,
        "user_id": settings.public_key,
        "template_params": {
            "to_email": email.to,
            "subject": email.subject,
            "message": email.body,
            "product_name": product_name,
            "quantity": quantity,
            "unit": unit,
        },
    });

    let response = reqwest::Client::new()
        .post(EMAILJS_SEND_URL)
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::RemoteApi {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}

/// Copy-paste commands for an IoT button that places a quantity-1 open
/// order straight against the remote orders collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IotCommands {
    pub curl: String,
    pub powershell: String,
}

/// `None` without remote credentials — the snippets POST to the backend.
pub fn iot_commands(settings: &Settings, product: &Product) -> Option<IotCommands> {
    if !settings.remote_configured() {
        return None;
    }

    let base_url = settings.supabase_url.trim_end_matches('/');
    let url = format!("{base_url}/rest/v1/orders");
    let key = &settings.supabase_key;

    let mut body = json!({
        "product_name": product.name,
        "quantity": 1,
        "status": "open",
    });
    if let Some(image) = &product.image {
        body["product_image"] = json!(image);
    }
    let body_json = body.to_string();

    // Single quotes inside the payload need per-shell escaping.
    let body_curl = body_json.replace('\'', "'\\''");
    let curl = format!(
        "curl -X POST '{url}' \\\n  -H \"apikey: {key}\" \\\n  -H \"Authorization: Bearer {key}\" \\\n  -H \"Content-Type: application/json\" \\\n  -d '{body_curl}'"
    );

    let body_pwsh = body_json.replace('\'', "''");
    let powershell = format!(
        "$h=@{{\"apikey\"=\"{key}\";\"Authorization\"=\"Bearer {key}\"}}; Invoke-RestMethod -Uri \"{url}\" -Method Post -Headers $h -ContentType \"application/json\" -Body ([System.Text.Encoding]::UTF8.GetBytes('{body_pwsh}'))"
    );

    Some(IotCommands { curl, powershell })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        let mut p = Product::new("Kaffee Bohnen", "kg");
        p.email_order_address = Some("legacy@roesterei.example".into());
        p.email_order_subject = Some("Nachbestellung Kaffee".into());
        p
    }

    #[test]
    fn supplier_templates_win_over_legacy_fields() {
        let mut supplier = Supplier::new("Rösterei Nord", "bestellung@nord.example");
        supplier.email_subject_template = Some("Bestellung {quantity} {unit} {product_name}".into());

        let email = order_email(&product(), Some(&supplier), 10).unwrap();
        assert_eq!(email.to, "bestellung@nord.example");
        assert_eq!(email.subject, "Bestellung 10 kg Kaffee Bohnen");
        assert!(email.body.starts_with("Guten Tag"), "default body without a template");
    }

    #[test]
    fn legacy_fields_apply_without_supplier() {
        let email = order_email(&product(), None, 5).unwrap();
        assert_eq!(email.to, "legacy@roesterei.example");
        assert_eq!(email.subject, "Nachbestellung Kaffee");
    }

    #[test]
    fn missing_recipient_is_a_validation_error() {
        let bare = Product::new("Servietten", "Packung");
        assert!(matches!(order_email(&bare, None, 1), Err(Error::Validation(_))));
    }

    #[test]
    fn links_are_percent_encoded() {
        let email = OrderEmail {
            to: "a@b.example".into(),
            subject: "Bestellung: Kaffee".into(),
            body: "Menge: 10 kg\nDanke".into(),
        };
        let link = mailto_link(&email);
        assert!(link.starts_with("mailto:a@b.example?subject=Bestellung%3A%20Kaffee"));
        assert!(link.contains("%0A"), "newlines survive encoding");
        assert!(webmail_link(&email).contains("to=a@b.example"));
    }

    #[test]
    fn iot_commands_need_remote_credentials() {
        let product = product();
        assert!(iot_commands(&Settings::default(), &product).is_none());

        let settings = Settings {
            supabase_url: "https://project.supabase.co/".into(),
            supabase_key: "anon-key".into(),
            ..Settings::default()
        };
        let commands = iot_commands(&settings, &product).unwrap();
        assert!(commands.curl.contains("https://project.supabase.co/rest/v1/orders"));
        assert!(commands.curl.contains("apikey: anon-key"));
        assert!(commands.powershell.contains("Invoke-RestMethod"));
    }

    #[test]
    fn iot_payload_escapes_single_quotes() {
        let settings = Settings {
            supabase_url: "https://project.supabase.co".into(),
            supabase_key: "anon".into(),
            ..Settings::default()
        };
        let mut p = Product::new("L'Espresso", "kg");
        p.image = None;
        let commands = iot_commands(&settings, &p).unwrap();
        assert!(commands.curl.contains("L'\\''Espresso"));
        assert!(commands.powershell.contains("L''Espresso"));
    }

    #[tokio::test]
    async fn dispatch_requires_credentials() {
        let email = OrderEmail {
            to: "a@b.example".into(),
            subject: "s".into(),
            body: "b".into(),
        };
        let err = send_order_email(&Settings::default(), &email, "Kaffee", 1, "kg")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotConfigured(_)));
    }
}
