use crate::errors::FetchError;
use crate::models::MarketingDocument;
use std::{env, fmt, path::PathBuf};
use tokio::fs;
use tracing::info;

const DEFAULT_DATA_PATH: &str = "data/marketing.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// `MARKETING_DATA_URL` wins over `MARKETING_DATA_PATH`; without either the
/// bundled sample file is used.
pub fn resolve_data_source() -> DataSource {
    source_from(
        env::var("MARKETING_DATA_URL").ok(),
        env::var("MARKETING_DATA_PATH").ok(),
    )
}

fn source_from(url: Option<String>, path: Option<String>) -> DataSource {
    if let Some(url) = url.filter(|value| !value.trim().is_empty()) {
        return DataSource::Url(url.trim().to_string());
    }
    match path.filter(|value| !value.trim().is_empty()) {
        Some(path) => DataSource::File(PathBuf::from(path)),
        None => DataSource::File(PathBuf::from(DEFAULT_DATA_PATH)),
    }
}

pub async fn fetch_marketing_data(source: &DataSource) -> Result<MarketingDocument, FetchError> {
    let bytes = match source {
        DataSource::File(path) => fs::read(path).await.map_err(|source| FetchError::Read {
            path: path.clone(),
            source,
        })?,
        DataSource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            response.bytes().await?.to_vec()
        }
    };

    let document = MarketingDocument::from_slice(&bytes)?;
    info!(
        source = %source,
        campaigns = document.data.campaigns.len(),
        "loaded marketing data"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_takes_precedence_over_path() {
        let source = source_from(
            Some("http://localhost:9000/data.json".to_string()),
            Some("local.json".to_string()),
        );
        assert_eq!(
            source,
            DataSource::Url("http://localhost:9000/data.json".to_string())
        );
    }

    #[test]
    fn blank_values_fall_back_to_default_file() {
        let source = source_from(Some("  ".to_string()), Some(String::new()));
        assert_eq!(source, DataSource::File(PathBuf::from(DEFAULT_DATA_PATH)));
        let source = source_from(None, Some("fixtures/data.json".to_string()));
        assert_eq!(source, DataSource::File(PathBuf::from("fixtures/data.json")));
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("marketing_dashboard_missing_file.json");
        let err = fetch_marketing_data(&DataSource::File(path.clone()))
            .await
            .expect_err("missing file must fail");
        assert!(matches!(err, FetchError::Read { .. }));
        assert!(err.to_string().contains("marketing_dashboard_missing_file.json"));
    }

    #[tokio::test]
    async fn negative_counters_rejected_on_parse() {
        let path = std::env::temp_dir().join(format!(
            "marketing_dashboard_negative_{}.json",
            std::process::id()
        ));
        let payload = serde_json::json!({
            "campaigns": [{
                "spend": 10.0,
                "revenue": 20.0,
                "clicks": 5,
                "demographic_breakdown": [{
                    "gender": "Male",
                    "age_group": "18-24",
                    "performance": { "impressions": 100, "clicks": -5, "conversions": 1 }
                }]
            }]
        });
        fs::write(&path, payload.to_string()).await.expect("write fixture");

        let err = fetch_marketing_data(&DataSource::File(path.clone()))
            .await
            .expect_err("negative clicks must fail");
        let _ = fs::remove_file(&path).await;
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn parses_minimal_document() {
        let path = std::env::temp_dir().join(format!(
            "marketing_dashboard_minimal_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"campaigns": [{"spend": 1.5, "revenue": 3, "clicks": 2}]}"#)
            .await
            .expect("write fixture");

        let document = fetch_marketing_data(&DataSource::File(path.clone()))
            .await
            .expect("parse");
        let _ = fs::remove_file(&path).await;
        let data = &document.data;
        assert_eq!(data.campaigns.len(), 1);
        assert!(data.campaigns[0].demographic_breakdown.is_empty());
        assert!(data.company_info.is_none());
        assert_eq!(document.raw["campaigns"][0]["revenue"], serde_json::json!(3));
    }
}
