use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Statistics available for a project, keyed by job name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticNames(pub HashMap<String, Vec<String>>);

/// Suffixes recorded for each statistic of a job instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticSuffixes(pub HashMap<String, Vec<String>>);

/// A single time series, Influx result style: one row per timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub columns: Vec<String>,
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Time series values for one statistic, keyed by suffix. Statistics
/// without sub-series use a single empty-string key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsPayload(pub HashMap<String, TimeSeries>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub bucket: f64,
    pub count: u64,
}

/// Histogram of one statistic, keyed by suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistogramPayload(pub HashMap<String, Vec<HistogramBucket>>);

/// Comparative aggregates (mean, variance, ...) of one statistic, keyed
/// by suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparativePayload(pub HashMap<String, HashMap<String, f64>>);

/// Confirmation returned by the graphing backend after a dashboard is
/// created. Fields beyond the id and name are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCreated {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_payload_is_suffix_keyed() {
        let payload: StatisticsPayload = serde_json::from_str(
            r#"{"flow0": {"columns": ["time", "smoothed_rtt"], "values": [[1000, 12.5]]}}"#,
        )
        .unwrap();

        let series = payload.0.get("flow0").unwrap();
        assert_eq!(series.columns, vec!["time", "smoothed_rtt"]);
        assert_eq!(series.values.len(), 1);
    }

    #[test]
    fn test_dashboard_created_keeps_unknown_fields() {
        let created: DashboardCreated = serde_json::from_str(
            r#"{"id": 7, "name": "Scenario instance #42", "links": {"self": "/chronograf/api/dashboards/7"}}"#,
        )
        .unwrap();

        assert_eq!(created.id, 7);
        assert_eq!(created.name, "Scenario instance #42");
        assert!(created.extra.contains_key("links"));
    }
}
