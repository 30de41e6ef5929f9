use crate::models::{MarketingData, MarketingDocument, StatusResponse};
use crate::source::{fetch_marketing_data, DataSource};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

#[derive(Debug)]
pub struct Snapshot {
    pub raw: serde_json::Value,
    pub data: MarketingData,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Snapshot>),
    Failed(String),
}

#[derive(Clone)]
pub struct AppState {
    pub source: DataSource,
    pub load: Arc<Mutex<LoadState>>,
}

impl Snapshot {
    fn new(document: MarketingDocument) -> Self {
        Self {
            raw: document.raw,
            data: document.data,
            fetched_at: Utc::now(),
        }
    }
}

impl AppState {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            load: Arc::new(Mutex::new(LoadState::Loading)),
        }
    }

    /// State that is already holding `document`, skipping the fetch.
    pub fn with_document(source: DataSource, document: MarketingDocument) -> Self {
        let snapshot = Snapshot::new(document);
        Self {
            source,
            load: Arc::new(Mutex::new(LoadState::Ready(Arc::new(snapshot)))),
        }
    }

    /// Runs the fetch and replaces the held snapshot with its outcome. The
    /// lock is not held while the fetch is in flight.
    pub async fn refresh(&self) -> LoadState {
        let next = match fetch_marketing_data(&self.source).await {
            Ok(document) => LoadState::Ready(Arc::new(Snapshot::new(document))),
            Err(err) => {
                error!(source = %self.source, "failed to load marketing data: {err}");
                LoadState::Failed(err.to_string())
            }
        };

        let mut load = self.load.lock().await;
        *load = next.clone();
        next
    }

    pub async fn current(&self) -> LoadState {
        self.load.lock().await.clone()
    }
}

impl LoadState {
    pub fn status(&self) -> StatusResponse {
        match self {
            Self::Loading => StatusResponse {
                state: "loading".to_string(),
                message: None,
                fetched_at: None,
                campaigns: 0,
            },
            Self::Ready(snapshot) => StatusResponse {
                state: "ready".to_string(),
                message: None,
                fetched_at: Some(snapshot.fetched_at.to_rfc3339()),
                campaigns: snapshot.data.campaigns.len(),
            },
            Self::Failed(message) => StatusResponse {
                state: "error".to_string(),
                message: Some(message.clone()),
                fetched_at: None,
                campaigns: 0,
            },
        }
    }
}
