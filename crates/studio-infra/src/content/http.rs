//! HTTP content client - talks to the platform's data API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use studio_core::StoreError;
use studio_core::domain::Document;
use studio_core::ports::{CommitResult, ContentClient, MutationResult, Operation, Transaction};
use studio_shared::ApiErrorResponse;
use studio_shared::dto::{DocumentsResponse, MutateRequest, MutateResponse};

/// Data API connection settings.
#[derive(Debug, Clone)]
pub struct ContentApiConfig {
    pub project_id: String,
    pub dataset: String,
    /// Date-style API version, without the leading `v`.
    pub api_version: String,
    /// Host the project subdomain is prefixed to.
    pub api_host: String,
    /// Bearer token with write access.
    pub token: Option<String>,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2021-06-07".to_string(),
            api_host: "api.sanity.io".to_string(),
            token: None,
        }
    }
}

impl ContentApiConfig {
    fn base_url(&self) -> String {
        format!(
            "https://{}.{}/v{}",
            self.project_id,
            self.api_host,
            self.api_version.trim_start_matches('v')
        )
    }

    /// Endpoint for transactional mutations.
    pub fn mutate_url(&self) -> String {
        format!(
            "{}/data/mutate/{}?returnIds=true",
            self.base_url(),
            self.dataset
        )
    }

    /// Endpoint for a single document lookup. The id is percent-encoded as one path segment.
    pub fn document_url(&self, id: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.base_url())
            .map_err(|e| StoreError::Connection(format!("Invalid content API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StoreError::Connection("Content API URL cannot have a path".to_string()))?
            .extend(["data", "doc", self.dataset.as_str(), id]);
        Ok(url)
    }
}

/// Content client backed by the HTTP data API.
pub struct HttpContentClient {
    config: ContentApiConfig,
    client: Client,
}

impl HttpContentClient {
    pub fn new(config: ContentApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ContentApiConfig {
        &self.config
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ContentClient for HttpContentClient {
    async fn commit(&self, transaction: Transaction) -> Result<CommitResult, StoreError> {
        let (id, mutations) = transaction.into_parts();
        let count = mutations.len();
        let body = MutateRequest::new(mutations).with_transaction_id(id);

        tracing::debug!(
            url = %self.config.mutate_url(),
            mutations = count,
            "Submitting transaction"
        );

        let response = self
            .authorize(self.client.post(self.config.mutate_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        if !status.is_success() {
            return Err(rejection(status, &text));
        }

        let parsed: MutateResponse =
            serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))?;

        commit_result(parsed)
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self
            .authorize(self.client.get(self.config.document_url(id)?))
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        if !status.is_success() {
            return Err(rejection(status, &text));
        }

        let parsed: DocumentsResponse<Document> =
            serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(parsed.documents.into_iter().next())
    }
}

/// Map an error response to a rejection, keeping the platform's description.
fn rejection(status: StatusCode, body: &str) -> StoreError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.message(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };

    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn commit_result(response: MutateResponse) -> Result<CommitResult, StoreError> {
    let results = response
        .results
        .into_iter()
        .map(|item| {
            let operation = match item.operation.as_str() {
                "create" => Operation::Create,
                "update" => Operation::Update,
                "delete" => Operation::Delete,
                other => {
                    return Err(StoreError::Decode(format!(
                        "unknown operation '{other}' for {}",
                        item.id
                    )));
                }
            };
            Ok(MutationResult {
                id: item.id,
                operation,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CommitResult {
        transaction_id: response.transaction_id,
        results,
    })
}
