use serde::{Deserialize, Serialize};

/// One statistic produced by a job instance, as selected by the caller.
///
/// Descriptors are only consumed for grouping and labeling; the values
/// themselves stay on the backend and are referenced by name in queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticDescriptor {
    /// The agent the job instance ran on (e.g., "client-1")
    pub job_agent: String,

    /// The job name, which is also the backend measurement name
    pub job_name: String,

    /// The job instance identifier
    pub job_id: i64,

    /// The statistic name (e.g., "smoothed_rtt")
    pub stat_name: String,

    /// The unit of measurement (e.g., "ms")
    pub unit: String,
}

impl StatisticDescriptor {
    pub fn new(
        job_agent: String,
        job_name: String,
        job_id: i64,
        stat_name: String,
        unit: String,
    ) -> Self {
        Self {
            job_agent,
            job_name,
            job_id,
            stat_name,
            unit,
        }
    }
}
