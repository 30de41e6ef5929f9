use crate::models::DemographicRow;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    String,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    pub key: &'static str,
    pub header: &'static str,
    pub align: Align,
    pub sort_type: SortType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Gender,
    AgeGroup,
    Impressions,
    Clicks,
    Conversions,
    Ctr,
    ConversionRate,
    Roas,
    Spend,
    Revenue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

pub const DEFAULT_SORT: SortSpec = SortSpec {
    key: SortKey::Revenue,
    direction: SortDirection::Desc,
};

/// Column layout of the demographic detail table.
pub fn demographic_columns() -> Vec<TableColumn> {
    let column = |key, header, align, sort_type| TableColumn {
        key,
        header,
        align,
        sort_type,
    };
    vec![
        column("gender", "Gender", Align::Left, SortType::String),
        column("age_group", "Age Group", Align::Center, SortType::String),
        column("impressions", "Impressions", Align::Right, SortType::Number),
        column("clicks", "Clicks", Align::Right, SortType::Number),
        column("conversions", "Conversions", Align::Right, SortType::Number),
        column("ctr", "CTR", Align::Right, SortType::Number),
        column("conversion_rate", "Conv. Rate", Align::Right, SortType::Number),
        column("roas", "ROAS", Align::Right, SortType::Number),
    ]
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = match value {
            "gender" => Self::Gender,
            "age_group" => Self::AgeGroup,
            "impressions" => Self::Impressions,
            "clicks" => Self::Clicks,
            "conversions" => Self::Conversions,
            "ctr" => Self::Ctr,
            "conversion_rate" => Self::ConversionRate,
            "roas" => Self::Roas,
            "spend" => Self::Spend,
            "revenue" => Self::Revenue,
            other => return Err(format!("unknown sort key '{other}'")),
        };
        Ok(key)
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("sort direction must be 'asc' or 'desc', got '{other}'")),
        }
    }
}

enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

fn sort_value(row: &DemographicRow, key: SortKey) -> SortValue<'_> {
    match key {
        SortKey::Gender => SortValue::Text(&row.gender),
        SortKey::AgeGroup => SortValue::Text(&row.age_group),
        SortKey::Impressions => SortValue::Number(row.impressions as f64),
        SortKey::Clicks => SortValue::Number(row.clicks as f64),
        SortKey::Conversions => SortValue::Number(row.conversions as f64),
        SortKey::Ctr => SortValue::Number(row.ctr),
        SortKey::ConversionRate => SortValue::Number(row.conversion_rate),
        SortKey::Roas => SortValue::Number(row.roas),
        SortKey::Spend => SortValue::Number(row.spend),
        SortKey::Revenue => SortValue::Number(row.revenue),
    }
}

/// Stable sort; rows with equal values keep their incoming order.
pub fn sort_rows(rows: &mut [DemographicRow], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = match (sort_value(a, spec.key), sort_value(b, spec.key)) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(&b),
            _ => Ordering::Equal,
        };
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
