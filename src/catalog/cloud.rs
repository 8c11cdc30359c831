//! Cloud document store backed by a CouchDB-compatible HTTP API
//! (Apache CouchDB, IBM Cloudant).
//!
//! | Operation       | Request                          |
//! |-----------------|----------------------------------|
//! | create database | `PUT /{db}`                      |
//! | count records   | `POST /{db}/_find` (ids only)    |
//! | seed            | `POST /{db}/_bulk_docs`          |
//! | query           | `POST /{db}/_find` (Mango)       |

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::catalog::store::{CatalogStore, SeedOutcome, StoreError};
use crate::core::exercise::Exercise;
use crate::matching::predicate::Predicate;

/// Upper bound on documents returned by one `_find`. CouchDB defaults to 25.
pub const MAX_FIND_DOCS: usize = 10_000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the cloud store
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// Server base URL, e.g. `https://account.cloudantnosqldb.appdomain.cloud`
    pub url: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CloudConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            username: None,
            password: None,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }
}

/// CouchDB database names: a lowercase letter followed by lowercase
/// letters, digits or any of `_$()+-/`.
pub fn is_valid_database_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || "_$()+-/".contains(c)
        })
}

/// `_find` response when only `_id` is requested
#[derive(Deserialize)]
struct IdsResponse {
    docs: Vec<serde_json::Value>,
}

/// One entry of a `_bulk_docs` response. CouchDB answers 201 for the batch
/// and reports rejected documents here.
#[derive(Deserialize)]
struct BulkDocResult {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize)]
struct FindResponse {
    docs: Vec<Exercise>,
    #[serde(default)]
    warning: Option<String>,
}

pub struct CloudStore {
    client: Client,
    database_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl CloudStore {
    /// Connect and create the database if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration, an unreachable server,
    /// or any unexpected HTTP status.
    pub async fn connect(config: CloudConfig) -> Result<Self, StoreError> {
        if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
            return Err(StoreError::InvalidConfig(format!(
                "database URL must start with http:// or https://, got '{}'",
                config.url
            )));
        }
        if !is_valid_database_name(&config.database) {
            return Err(StoreError::InvalidConfig(format!(
                "'{}' is not a valid database name",
                config.database
            )));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let database_url = format!(
            "{}/{}",
            config.url.trim_end_matches('/'),
            config.database.replace('/', "%2F")
        );

        let store = Self {
            client,
            database_url,
            username: config.username,
            password: config.password,
        };
        store.ensure_database().await?;
        Ok(store)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = if path.is_empty() {
            self.database_url.clone()
        } else {
            format!("{}/{path}", self.database_url)
        };
        let builder = self.client.request(method, url);
        match &self.username {
            Some(user) => builder.basic_auth(user, self.password.as_deref()),
            None => builder,
        }
    }

    async fn ensure_database(&self) -> Result<(), StoreError> {
        let response = self.request(reqwest::Method::PUT, "").send().await?;
        match response.status() {
            StatusCode::CREATED | StatusCode::ACCEPTED => {
                tracing::info!("Created database at {}", self.database_url);
                Ok(())
            }
            StatusCode::PRECONDITION_FAILED => Ok(()),
            _ => Err(remote_error(response).await),
        }
    }
}

async fn remote_error(response: Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StoreError::Remote { status, body }
}

async fn expect_success(response: Response) -> Result<Response, StoreError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(remote_error(response).await)
    }
}

fn check_bulk_results(results: &[BulkDocResult], total: usize) -> Result<(), StoreError> {
    let rejected: Vec<&BulkDocResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let Some(first) = rejected.first() else {
        return Ok(());
    };

    let reason = format!(
        "document {} rejected: {} ({})",
        first.id.as_deref().unwrap_or("<unknown>"),
        first.error.as_deref().unwrap_or_default(),
        first.reason.as_deref().unwrap_or("no reason given"),
    );
    Err(StoreError::Seed {
        rejected: rejected.len(),
        total,
        reason,
    })
}

#[async_trait]
impl CatalogStore for CloudStore {
    fn backend(&self) -> &'static str {
        "cloud"
    }

    // `doc_count` from `GET /{db}` includes design documents, which `_find` skips
    async fn len(&self) -> Result<usize, StoreError> {
        let body = json!({
            "selector": Predicate::always().to_mango_selector(),
            "fields": ["_id"],
            "limit": MAX_FIND_DOCS,
        });
        let response = self
            .request(reqwest::Method::POST, "_find")
            .json(&body)
            .send()
            .await?;
        let found: IdsResponse = expect_success(response).await?.json().await?;
        Ok(found.docs.len())
    }

    async fn seed_if_empty(&self, records: &[Exercise]) -> Result<SeedOutcome, StoreError> {
        let existing = self.len().await?;
        if existing > 0 {
            return Ok(SeedOutcome::AlreadyPopulated(existing));
        }

        let response = self
            .request(reqwest::Method::POST, "_bulk_docs")
            .json(&json!({ "docs": records }))
            .send()
            .await?;
        let results: Vec<BulkDocResult> = expect_success(response).await?.json().await?;
        check_bulk_results(&results, records.len())?;
        Ok(SeedOutcome::Seeded(records.len()))
    }

    async fn query(&self, predicate: &Predicate) -> Result<Vec<Exercise>, StoreError> {
        let body = json!({
            "selector": predicate.to_mango_selector(),
            "limit": MAX_FIND_DOCS,
        });
        let response = self
            .request(reqwest::Method::POST, "_find")
            .json(&body)
            .send()
            .await?;
        let found: FindResponse = expect_success(response).await?.json().await?;

        if let Some(warning) = found.warning {
            tracing::debug!("Document database warning: {warning}");
        }
        Ok(found.docs)
    }
}
