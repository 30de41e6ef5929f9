use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Performance {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicBreakdown {
    pub gender: String,
    pub age_group: String,
    #[serde(default)]
    pub performance: Performance,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Campaign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub demographic_breakdown: Vec<DemographicBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub founded: Option<serde_json::Value>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarketingStats {
    pub total_campaigns: Option<u64>,
    pub total_revenue: Option<f64>,
    pub average_roas: Option<f64>,
    pub total_conversions: Option<u64>,
    pub top_performing_medium: Option<String>,
    pub top_performing_region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarketInsights {
    pub peak_performance_day: Option<String>,
    pub peak_performance_time: Option<String>,
    pub top_converting_product: Option<String>,
    pub fastest_growing_region: Option<String>,
}

/// The fetched dataset. Only `campaigns` feeds the aggregator; the other
/// sections are passed through to the overview page.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarketingData {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_stats: Option<MarketingStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_insights: Option<MarketInsights>,
}

/// The fetched document as received, plus the typed view the dashboard reads.
/// `raw` is what `/api/marketing` serves, so fields the typed view does not
/// know about survive.
#[derive(Debug, Clone, Default)]
pub struct MarketingDocument {
    pub raw: serde_json::Value,
    pub data: MarketingData,
}

impl MarketingDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Value = serde_json::from_slice(bytes)?;
        let data = MarketingData::deserialize(&raw)?;
        Ok(Self { raw, data })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct GenderSummary {
    pub clicks: u64,
    pub spend: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct GenderTotals {
    pub male: GenderSummary,
    pub female: GenderSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicRow {
    pub gender: String,
    pub age_group: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub roas: f64,
    pub spend: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DemographicReport {
    pub gender_totals: GenderTotals,
    pub spend_by_age: Vec<ChartPoint>,
    pub revenue_by_age: Vec<ChartPoint>,
    pub rows: Vec<DemographicRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyHeader {
    pub name: String,
    pub industry: String,
    pub founded: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    pub company: CompanyHeader,
    pub key_metrics: Vec<MetricCard>,
    pub highlights: Vec<MetricCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<MetricCard>>,
}

#[derive(Debug, Serialize)]
pub struct DemographicsResponse {
    pub cards: Vec<MetricCard>,
    pub report: DemographicReport,
    pub columns: Vec<crate::table::TableColumn>,
    /// Absent when the rows are in display order rather than a requested sort.
    pub sort: Option<crate::table::SortSpec>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
    pub campaigns: usize,
}
