use serde::{Deserialize, Serialize};

/// The scenario instance a dashboard is created for.
///
/// `start_date` is an ISO 8601 timestamp; it becomes the lower time bound
/// of every cell query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInstance {
    pub owner_scenario_instance_id: i64,
    pub start_date: String,
}

impl ScenarioInstance {
    pub fn new(owner_scenario_instance_id: i64, start_date: String) -> Self {
        Self {
            owner_scenario_instance_id,
            start_date,
        }
    }
}
