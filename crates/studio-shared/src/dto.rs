//! Data Transfer Objects - request/response bodies of the data API.

use serde::{Deserialize, Serialize};

/// Body of `POST /data/mutate/{dataset}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateRequest<M> {
    pub mutations: Vec<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl<M> MutateRequest<M> {
    pub fn new(mutations: Vec<M>) -> Self {
        Self {
            mutations,
            transaction_id: None,
        }
    }

    pub fn with_transaction_id(mut self, id: Option<String>) -> Self {
        self.transaction_id = id;
        self
    }
}

/// Response of a committed mutate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResponse {
    pub transaction_id: String,
    #[serde(default)]
    pub results: Vec<MutateResultItem>,
}

/// Per-document outcome, present when `returnIds=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutateResultItem {
    pub id: String,
    pub operation: String,
}

/// Response of `GET /data/doc/{dataset}/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse<D> {
    #[serde(default = "Vec::new")]
    pub documents: Vec<D>,
}
