//! PostgREST-backed remote item store
//!
//! Talks to the hosted backend's REST endpoint (`/rest/v1/<table>`) directly
//! from the client. Row-level security on the backend scopes writes to the
//! signed-in user, so every call carries the user's access token when one is
//! known and falls back to the anonymous key otherwise.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{
    InterestRow, Item, NewItem, NewRequest, RemoteError, RemoteResult, Request,
};

use super::traits::RemoteItemStore;

const ITEMS: &str = "items";
const REQUESTS: &str = "requests";

/// Connection settings for the hosted backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub url: String,
    /// Public anonymous API key
    pub anon_key: String,
}

impl PostgrestConfig {
    /// Validate and normalize (trims whitespace and trailing slashes)
    pub fn validate(&self) -> RemoteResult<Self> {
        let url = self.url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(RemoteError::InvalidInput(format!(
                "backend url must be http(s), got {:?}",
                self.url
            )));
        }
        let anon_key = self.anon_key.trim().to_string();
        if anon_key.is_empty() {
            return Err(RemoteError::InvalidInput("anon key is required".to_string()));
        }
        Ok(Self { url, anon_key })
    }
}

#[derive(Debug, Clone)]
pub struct PostgrestRemote {
    client: Client,
    config: PostgrestConfig,
    access_token: Option<String>,
}

impl PostgrestRemote {
    pub fn new(config: &PostgrestConfig) -> RemoteResult<Self> {
        Ok(Self {
            client: Client::new(),
            config: config.validate()?,
            access_token: None,
        })
    }

    /// Act as a signed-in user
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.config.url, table);
        let token = self.access_token.as_deref().unwrap_or(&self.config.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }
}

/// `in.("a","b")` filter value
fn in_list(ids: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

async fn check_status(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Check the status and decode the body as JSON
pub(super) async fn read_json<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
    let text = check_status(response).await?.text().await?;
    Ok(serde_json::from_str(&text)?)
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> RemoteResult<T> {
    read_json(builder.send().await?).await
}

async fn send_empty(builder: RequestBuilder) -> RemoteResult<()> {
    check_status(builder.send().await?).await?;
    Ok(())
}

#[async_trait(?Send)]
impl RemoteItemStore for PostgrestRemote {
    async fn list_items(&self) -> RemoteResult<Vec<Item>> {
        send_json(
            self.request(Method::GET, ITEMS)
                .query(&[("select", "*"), ("order", "created_at.desc")]),
        )
        .await
    }

    async fn fetch_items_by_ids(&self, ids: &[String]) -> RemoteResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        send_json(
            self.request(Method::GET, ITEMS)
                .query(&[("select", "*".to_string()), ("id", in_list(ids))]),
        )
        .await
    }

    async fn create_item(&self, item: &NewItem) -> RemoteResult<Item> {
        item.validate()?;
        let mut rows: Vec<Item> = send_json(
            self.request(Method::POST, ITEMS)
                .header("Prefer", "return=representation")
                .json(item),
        )
        .await?;
        if rows.is_empty() {
            return Err(RemoteError::NotFound("created item was not returned".to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    /// Zero deleted rows (not the owner, or hidden by row-level security)
    /// is `NotFound`
    async fn delete_item(&self, item_id: &str, owner_id: &str) -> RemoteResult<()> {
        debug!("deleting item {}", item_id);
        let deleted: Vec<Item> = send_json(
            self.request(Method::DELETE, ITEMS)
                .query(&[("id", eq(item_id)), ("owner_id", eq(owner_id))])
                .header("Prefer", "return=representation"),
        )
        .await?;
        if deleted.is_empty() {
            return Err(RemoteError::NotFound(format!("item {} owned by {}", item_id, owner_id)));
        }
        Ok(())
    }

    /// An existing (item, requester) row is kept as is
    async fn insert_request(&self, request: &NewRequest) -> RemoteResult<()> {
        send_empty(
            self.request(Method::POST, REQUESTS)
                .query(&[("on_conflict", "item_id,requester_id")])
                .header("Prefer", "resolution=ignore-duplicates,return=minimal")
                .json(request),
        )
        .await
    }

    async fn delete_request(&self, item_id: &str, user_id: &str) -> RemoteResult<()> {
        send_empty(
            self.request(Method::DELETE, REQUESTS)
                .query(&[("item_id", eq(item_id)), ("requester_id", eq(user_id))]),
        )
        .await
    }

    async fn fetch_requests_for_user(&self, user_id: &str) -> RemoteResult<Vec<InterestRow>> {
        send_json(self.request(Method::GET, REQUESTS).query(&[
            ("select", "*,item:items(*)".to_string()),
            ("requester_id", eq(user_id)),
            ("order", "created_at.asc".to_string()),
        ]))
        .await
    }

    async fn fetch_requests_for_item(&self, item_id: &str) -> RemoteResult<Vec<Request>> {
        send_json(self.request(Method::GET, REQUESTS).query(&[
            ("select", "*".to_string()),
            ("item_id", eq(item_id)),
            ("order", "created_at.asc".to_string()),
        ]))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_list_quotes_ids() {
        let ids = vec!["a".to_string(), "b,c".to_string(), "q\"x".to_string()];
        assert_eq!(in_list(&ids), r#"in.("a","b,c","q\"x")"#);
    }

    #[test]
    fn test_config_validation() {
        let config = PostgrestConfig {
            url: " https://proj.example.co/ ".to_string(),
            anon_key: "key".to_string(),
        };
        assert_eq!(config.validate().unwrap().url, "https://proj.example.co");

        let bad = PostgrestConfig {
            url: "ftp://x".to_string(),
            anon_key: "key".to_string(),
        };
        assert!(matches!(bad.validate(), Err(RemoteError::InvalidInput(_))));

        let keyless = PostgrestConfig {
            url: "https://x".to_string(),
            anon_key: "  ".to_string(),
        };
        assert!(keyless.validate().is_err());
    }
}
