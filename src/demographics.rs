use crate::models::{
    Campaign, ChartPoint, DemographicReport, DemographicRow, GenderSummary, GenderTotals,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

pub const SPEND_COLOR: &str = "#F59E0B";
pub const REVENUE_COLOR: &str = "#10B981";

#[derive(Debug, Default)]
struct Bucket {
    impressions: u64,
    clicks: u64,
    conversions: u64,
    spend: f64,
    revenue: f64,
}

/// Rolls campaign demographic breakdowns up into gender totals, age-group
/// chart series and one table row per `(gender, age_group)`.
///
/// Spend and revenue are not reported per demographic, so each bucket is
/// attributed the campaign totals scaled by its share of the campaign's
/// clicks. A campaign with zero clicks attributes nothing.
pub fn aggregate(campaigns: &[Campaign]) -> DemographicReport {
    let mut buckets: BTreeMap<(String, String), Bucket> = BTreeMap::new();

    for campaign in campaigns {
        let denom = campaign.clicks.max(1) as f64;
        for entry in &campaign.demographic_breakdown {
            let perf = &entry.performance;
            let share = if campaign.clicks == 0 {
                0.0
            } else {
                perf.clicks as f64 / denom
            };

            let bucket = buckets
                .entry((entry.gender.clone(), entry.age_group.clone()))
                .or_default();
            bucket.impressions = bucket.impressions.saturating_add(perf.impressions);
            bucket.clicks = bucket.clicks.saturating_add(perf.clicks);
            bucket.conversions = bucket.conversions.saturating_add(perf.conversions);
            bucket.spend += share * campaign.spend;
            bucket.revenue += share * campaign.revenue;
        }
    }

    let mut gender_totals = GenderTotals::default();
    let mut age_totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    let mut rows = Vec::with_capacity(buckets.len());

    for ((gender, age_group), bucket) in &buckets {
        let summary = match gender.as_str() {
            "Male" => Some(&mut gender_totals.male),
            "Female" => Some(&mut gender_totals.female),
            _ => None,
        };
        if let Some(summary) = summary {
            add_to_summary(summary, bucket);
        }

        let totals = age_totals.entry(age_group.as_str()).or_default();
        totals.0 += bucket.spend;
        totals.1 += bucket.revenue;

        rows.push(to_row(gender, age_group, bucket));
    }

    rows.sort_by(compare_rows);

    let spend_by_age = chart_series(&age_totals, |totals| totals.0, SPEND_COLOR);
    let revenue_by_age = chart_series(&age_totals, |totals| totals.1, REVENUE_COLOR);

    debug!(
        campaigns = campaigns.len(),
        rows = rows.len(),
        "aggregated demographic breakdowns"
    );

    DemographicReport {
        gender_totals,
        spend_by_age,
        revenue_by_age,
        rows,
    }
}

fn add_to_summary(summary: &mut GenderSummary, bucket: &Bucket) {
    summary.clicks = summary.clicks.saturating_add(bucket.clicks);
    summary.spend += bucket.spend;
    summary.revenue += bucket.revenue;
}

fn to_row(gender: &str, age_group: &str, bucket: &Bucket) -> DemographicRow {
    let ctr = if bucket.impressions > 0 {
        bucket.clicks as f64 / bucket.impressions as f64 * 100.0
    } else {
        0.0
    };
    let conversion_rate = if bucket.clicks > 0 {
        bucket.conversions as f64 / bucket.clicks as f64 * 100.0
    } else {
        0.0
    };
    let roas = if bucket.spend > 0.0 {
        bucket.revenue / bucket.spend
    } else {
        0.0
    };

    DemographicRow {
        gender: gender.to_string(),
        age_group: age_group.to_string(),
        impressions: bucket.impressions,
        clicks: bucket.clicks,
        conversions: bucket.conversions,
        ctr: round_to(ctr, 2),
        conversion_rate: round_to(conversion_rate, 2),
        roas: round_to(roas, 1),
        spend: bucket.spend,
        revenue: bucket.revenue,
    }
}

// Age groups arrive already in label order from the BTreeMap.
fn chart_series(
    age_totals: &BTreeMap<&str, (f64, f64)>,
    pick: impl Fn(&(f64, f64)) -> f64,
    color: &str,
) -> Vec<ChartPoint> {
    age_totals
        .iter()
        .map(|(label, totals)| (label, pick(totals)))
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| ChartPoint {
            label: label.to_string(),
            value,
            color: color.to_string(),
        })
        .collect()
}

fn gender_rank(gender: &str) -> u8 {
    match gender {
        "Male" => 0,
        "Female" => 1,
        _ => 2,
    }
}

/// Display order for the detail table: Male, then Female, then any other
/// label, each group by age group.
pub fn compare_rows(a: &DemographicRow, b: &DemographicRow) -> Ordering {
    gender_rank(&a.gender)
        .cmp(&gender_rank(&b.gender))
        .then_with(|| a.gender.cmp(&b.gender))
        .then_with(|| a.age_group.cmp(&b.age_group))
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
