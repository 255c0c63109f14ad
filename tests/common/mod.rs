use statboard::client::{HttpTransport, StatisticsClient};
use statboard::clock::SystemClock;
use statboard::datamodel::{ScenarioInstance, StatisticDescriptor};
use std::time::Duration;

pub fn descriptor(job_id: i64, stat_name: &str, unit: &str) -> StatisticDescriptor {
    StatisticDescriptor::new(
        "agent-1".to_string(),
        "quic_probe".to_string(),
        job_id,
        stat_name.to_string(),
        unit.to_string(),
    )
}

pub fn instance(id: i64, start_date: &str) -> ScenarioInstance {
    ScenarioInstance::new(id, start_date.to_string())
}

/// Client pointed at a mock server.
pub fn client_for(base_url: &str) -> StatisticsClient<HttpTransport, SystemClock> {
    let transport = HttpTransport::new(base_url, Duration::from_secs(5))
        .expect("mock server URL should be valid");
    StatisticsClient::new(transport, SystemClock)
}
