use crate::models::{
    CompanyHeader, GenderSummary, GenderTotals, MarketingData, MetricCard, OverviewResponse,
};

const NOT_AVAILABLE: &str = "N/A";
const GREEN_ACCENT: &str = "text-green";

fn card(title: &str, value: String, gradient: Option<&str>) -> MetricCard {
    MetricCard {
        title: title.to_string(),
        value,
        gradient: gradient.map(str::to_string),
        accent: None,
    }
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn or_na(value: Option<&String>) -> String {
    or_default(value.cloned(), NOT_AVAILABLE)
}

/// Whole dollars, with halves rounded away from zero.
fn money(value: f64) -> String {
    format!("${}", value.round())
}

/// Cards and header for the landing page. Missing sections fall back to
/// placeholder values rather than failing.
pub fn build_overview(data: &MarketingData) -> OverviewResponse {
    let company = data.company_info.clone().unwrap_or_default();
    let stats = data.marketing_stats.clone().unwrap_or_default();

    let founded = match company.founded {
        Some(serde_json::Value::String(text)) if !text.is_empty() => text,
        Some(serde_json::Value::Number(number)) => number.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    };

    let header = CompanyHeader {
        name: or_default(company.name, "Company Name"),
        industry: or_default(company.industry, "Industry"),
        founded,
        description: or_default(company.description, "No description available"),
    };

    let key_metrics = vec![
        card(
            "Total Campaigns",
            stats.total_campaigns.unwrap_or(0).to_string(),
            Some("from-blue-500 to-cyan-500"),
        ),
        card(
            "Total Revenue",
            format!("${}", format_decimal_thousands(stats.total_revenue.unwrap_or(0.0))),
            Some("from-green-500 to-emerald-500"),
        ),
        card(
            "Average ROAS",
            format!("{}x", stats.average_roas.unwrap_or(0.0)),
            Some("from-purple-500 to-pink-500"),
        ),
        card(
            "Total Conversions",
            stats.total_conversions.unwrap_or(0).to_string(),
            Some("from-orange-500 to-red-500"),
        ),
    ];

    let highlights = vec![
        card(
            "Top Performing Medium",
            or_na(stats.top_performing_medium.as_ref()),
            Some("from-indigo-500 to-blue-500"),
        ),
        card(
            "Top Performing Region",
            or_na(stats.top_performing_region.as_ref()),
            Some("from-teal-500 to-green-500"),
        ),
    ];

    let insights = data.market_insights.as_ref().map(|insights| {
        vec![
            card(
                "Peak Performance Day",
                or_na(insights.peak_performance_day.as_ref()),
                Some("from-violet-500 to-purple-500"),
            ),
            card(
                "Peak Performance Time",
                or_na(insights.peak_performance_time.as_ref()),
                Some("from-amber-500 to-orange-500"),
            ),
            card(
                "Top Converting Product",
                or_na(insights.top_converting_product.as_ref()),
                Some("from-cyan-500 to-blue-500"),
            ),
            card(
                "Fastest Growing Region",
                or_na(insights.fastest_growing_region.as_ref()),
                Some("from-rose-500 to-pink-500"),
            ),
        ]
    });

    OverviewResponse {
        company: header,
        key_metrics,
        highlights,
        insights,
    }
}

pub fn gender_cards(totals: &GenderTotals) -> Vec<MetricCard> {
    let mut cards = Vec::with_capacity(6);
    for (label, summary) in [("Male", &totals.male), ("Female", &totals.female)] {
        cards.extend(summary_cards(label, summary));
    }
    cards
}

fn summary_cards(label: &str, summary: &GenderSummary) -> [MetricCard; 3] {
    let mut revenue = card(&format!("{label} Revenue"), money(summary.revenue), None);
    revenue.accent = Some(GREEN_ACCENT.to_string());
    [
        card(&format!("{label} Clicks"), format_thousands(summary.clicks), None),
        card(&format!("{label} Spend"), money(summary.spend), None),
        revenue,
    ]
}

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Thousands separators with at most three fraction digits, trailing zeros
/// dropped.
pub fn format_decimal_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let whole = whole.parse::<u64>().map(format_thousands).unwrap_or_else(|_| whole.to_string());
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}
