use crate::clock::{epoch_from_unix_milliseconds, Clock, SystemClock};
use crate::config::StatboardConfig;
use crate::dashboard::{build_dashboard, DASHBOARDS_PATH};
use crate::datamodel::{
    ComparativePayload, Dashboard, DashboardCreated, HistogramPayload, ScenarioInstance,
    StatisticDescriptor, StatisticNames, StatisticSuffixes, StatisticsPayload,
};
use anyhow::Result;
use hifitime::Epoch;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub mod error;
pub mod routes;
pub mod transport;

pub use error::ClientError;
pub use transport::{ApiTransport, HttpTransport};

/// Client for the statistics backend and the dashboard endpoint.
///
/// Stateless apart from the injected transport and clock; every operation
/// is one request/response round trip.
pub struct StatisticsClient<T = HttpTransport, C = SystemClock> {
    transport: T,
    clock: C,
}

impl StatisticsClient<HttpTransport, SystemClock> {
    pub fn from_config(config: &StatboardConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::from_config(config)?, SystemClock))
    }
}

impl<T: ApiTransport, C: Clock> StatisticsClient<T, C> {
    pub fn new(transport: T, clock: C) -> Self {
        Self { transport, clock }
    }

    async fn get_json<M: DeserializeOwned>(&self, path: String) -> Result<M, ClientError> {
        debug!("GET {path}");
        let body = self.transport.get(&path).await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Parse { path, source })
    }

    /// Statistics available for a project.
    pub async fn statistic_names(&self, project: &str) -> Result<StatisticNames, ClientError> {
        self.get_json(routes::names_route(project)).await
    }

    /// Statistics and their suffixes recorded for a job instance.
    pub async fn statistic_suffixes(&self, job_id: i64) -> Result<StatisticSuffixes, ClientError> {
        self.get_json(routes::suffixes_route(job_id)).await
    }

    /// Origin instant of a job instance's statistics.
    ///
    /// The origin is only used for display defaults, so any failure is
    /// recovered locally by substituting the current time instead of
    /// being propagated.
    pub async fn statistics_origin(&self, job_id: i64) -> Epoch {
        match self.get_json::<i64>(routes::origin_route(job_id)).await {
            Ok(milliseconds) => epoch_from_unix_milliseconds(milliseconds),
            Err(error) => {
                warn!("substituting local time for job {job_id} origin: {error}");
                self.clock.now()
            }
        }
    }

    /// Values of one statistic. An origin of `Some(0)` is a valid offset
    /// and is sent like any other.
    pub async fn statistics(
        &self,
        job_id: i64,
        stat_name: &str,
        suffix: &str,
        origin: Option<i64>,
    ) -> Result<StatisticsPayload, ClientError> {
        let mut route = routes::statistics_route(job_id, stat_name, suffix);
        if let Some(origin) = origin {
            route.push_str(&format!("&origin={origin}"));
        }
        self.get_json(route).await
    }

    /// Histogram of one statistic over the requested number of buckets.
    pub async fn statistics_histogram(
        &self,
        job_id: i64,
        stat_name: &str,
        suffix: &str,
        buckets: u32,
    ) -> Result<HistogramPayload, ClientError> {
        let route = format!(
            "{}&histogram={buckets}",
            routes::statistics_route(job_id, stat_name, suffix)
        );
        self.get_json(route).await
    }

    /// Comparative aggregation of one statistic.
    pub async fn statistics_comparative(
        &self,
        job_id: i64,
        stat_name: &str,
        suffix: &str,
    ) -> Result<ComparativePayload, ClientError> {
        let route = format!(
            "{}&comparative",
            routes::statistics_route(job_id, stat_name, suffix)
        );
        self.get_json(route).await
    }

    /// Submit an assembled dashboard to the graphing backend.
    pub async fn publish_dashboard(
        &self,
        dashboard: &Dashboard,
    ) -> Result<DashboardCreated, ClientError> {
        let body = serde_json::to_value(dashboard).map_err(|source| ClientError::Parse {
            path: DASHBOARDS_PATH.to_string(),
            source,
        })?;
        info!(
            "creating dashboard {:?} with {} cells",
            dashboard.name,
            dashboard.cells.len()
        );
        let text = self.transport.post_json(DASHBOARDS_PATH, body).await?;
        serde_json::from_str(&text).map_err(|source| ClientError::Parse {
            path: DASHBOARDS_PATH.to_string(),
            source,
        })
    }

    /// Assemble a dashboard from statistic descriptors and submit it.
    pub async fn create_dashboard(
        &self,
        instance: &ScenarioInstance,
        descriptors: &[StatisticDescriptor],
        grouped: bool,
    ) -> Result<DashboardCreated> {
        let dashboard = build_dashboard(instance, descriptors, grouped, &self.clock)?;
        Ok(self.publish_dashboard(&dashboard).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::epoch_to_unix_milliseconds;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport that records requested paths and replays canned bodies.
    struct StubTransport {
        requests: Mutex<Vec<String>>,
        response: Result<String, u16>,
    }

    impl StubTransport {
        fn replying(body: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Ok(body.to_string()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Err(status),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiTransport for StubTransport {
        async fn get(&self, path: &str) -> Result<String, ClientError> {
            self.requests.lock().unwrap().push(path.to_string());
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(ClientError::Status {
                    path: path.to_string(),
                    status: *status,
                }),
            }
        }

        async fn post_json(
            &self,
            path: &str,
            _body: serde_json::Value,
        ) -> Result<String, ClientError> {
            self.requests.lock().unwrap().push(path.to_string());
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(ClientError::Status {
                    path: path.to_string(),
                    status: *status,
                }),
            }
        }
    }

    fn client(transport: StubTransport) -> StatisticsClient<StubTransport, SystemClock> {
        StatisticsClient::new(transport, SystemClock)
    }

    #[tokio::test]
    async fn test_zero_origin_is_sent() {
        let client = client(StubTransport::replying("{}"));
        client.statistics(1, "x", "", Some(0)).await.unwrap();
        assert_eq!(client.transport.requests(), vec!["/statistic/1?name=x&origin=0"]);
    }

    #[tokio::test]
    async fn test_missing_origin_is_omitted() {
        let client = client(StubTransport::replying("{}"));
        client.statistics(1, "x", "", None).await.unwrap();
        assert_eq!(client.transport.requests(), vec!["/statistic/1?name=x"]);
    }

    #[tokio::test]
    async fn test_zero_buckets_are_sent() {
        let client = client(StubTransport::replying("{}"));
        client.statistics_histogram(1, "x", "flow0", 0).await.unwrap();
        assert_eq!(
            client.transport.requests(),
            vec!["/statistic/1?name=x&suffix=flow0&histogram=0"]
        );
    }

    #[tokio::test]
    async fn test_comparative_marker() {
        let client = client(StubTransport::replying("{}"));
        client.statistics_comparative(1, "x", "").await.unwrap();
        assert_eq!(
            client.transport.requests(),
            vec!["/statistic/1?name=x&comparative"]
        );
    }

    #[tokio::test]
    async fn test_origin_fallback_on_transport_failure() {
        let client = client(StubTransport::failing(500));
        let before = SystemClock.now();
        let origin = client.statistics_origin(3).await;
        let after = SystemClock.now();
        assert!(origin >= before && origin <= after);
    }

    #[tokio::test]
    async fn test_origin_fallback_on_parse_failure() {
        let client = client(StubTransport::replying("not json"));
        let before = SystemClock.now();
        let origin = client.statistics_origin(3).await;
        let after = SystemClock.now();
        assert!(origin >= before && origin <= after);
    }

    #[tokio::test]
    async fn test_origin_parses_epoch_milliseconds() {
        let client = client(StubTransport::replying("1704067200000"));
        let origin = client.statistics_origin(3).await;
        assert_eq!(epoch_to_unix_milliseconds(origin), 1704067200000);
        assert_eq!(client.transport.requests(), vec!["/statistic/3/?origin"]);
    }

    #[tokio::test]
    async fn test_status_failure_surfaces() {
        let client = client(StubTransport::failing(404));
        let error = client.statistic_names("demo").await.unwrap_err();
        assert!(matches!(error, ClientError::Status { status: 404, .. }));
        assert!(error.is_network());
    }
}
