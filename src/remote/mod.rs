//! Remote Backend
//!
//! Thin REST client for a hosted Supabase-style data service: row
//! collections under `/rest/v1/` plus object storage for attachments.
//! Every call authenticates with the project anon key (`apikey` header and
//! bearer token).

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::Settings;
use crate::{Error, Result};

pub mod rows;

pub const TABLE_PRODUCTS: &str = "products";
pub const TABLE_ORDERS: &str = "orders";
pub const TABLE_SUPPLIERS: &str = "suppliers";

const ATTACHMENT_BUCKET: &str = "attachments";

#[derive(Clone, Debug)]
pub struct RemoteBackend {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RemoteBackend {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        let base_url = url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            api_key: key.into(),
        }
    }

    /// `None` unless both remote credentials are present.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        settings
            .remote_configured()
            .then(|| Self::new(&settings.supabase_url, &settings.supabase_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::RemoteApi {
            status: status.as_u16(),
            body,
        })
    }

    /// Selects a whole collection with server-side ordering, e.g.
    /// `order = "name.asc"` or `"date.desc"`.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, order: &str) -> Result<Vec<T>> {
        let response = self
            .authed(self.http.get(self.rest_url(table)))
            .query(&[("select", "*"), ("order", order)])
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    /// Upserts rows keyed by `id` in a single batch.
    pub async fn upsert<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<()> {
        let response = self
            .authed(self.http.post(self.rest_url(table)))
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// Pure insert for rows whose ids are freshly generated.
    pub async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<()> {
        let response = self
            .authed(self.http.post(self.rest_url(table)))
            .json(row)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// Deletes the row with the given id. Deleting a nonexistent id is
    /// not an error.
    pub async fn delete(&self, table: &str, id: &str) -> Result<()> {
        let response = self
            .authed(self.http.delete(self.rest_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// Uploads an attachment to object storage and returns its public URL.
    pub async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<String> {
        let url = format!("{}/storage/v1/object/{ATTACHMENT_BUCKET}/{name}", self.base_url);
        let response = self.authed(self.http.post(url)).body(bytes).send().await?;
        Self::checked(response).await?;
        Ok(self.public_url(name))
    }

    pub fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{ATTACHMENT_BUCKET}/{name}",
            self.base_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let remote = RemoteBackend::new("https://project.supabase.co/", "anon");
        assert_eq!(remote.rest_url("orders"), "https://project.supabase.co/rest/v1/orders");
    }

    #[test]
    fn from_settings_requires_both_credentials() {
        let mut settings = Settings::default();
        assert!(RemoteBackend::from_settings(&settings).is_none());

        settings.supabase_url = "https://project.supabase.co".into();
        settings.supabase_key = "anon".into();
        assert!(RemoteBackend::from_settings(&settings).is_some());
    }

    #[test]
    fn public_url_points_into_the_bucket() {
        let remote = RemoteBackend::new("https://project.supabase.co", "anon");
        assert_eq!(
            remote.public_url("defect.jpg"),
            "https://project.supabase.co/storage/v1/object/public/attachments/defect.jpg"
        );
    }
}
