pub mod dashboard;
pub mod responses;
pub mod scenario;
pub mod statistic;

pub use dashboard::{AxisConfig, CellAxes, CellQuery, ChartKind, Dashboard, DashboardCell};
pub use responses::{
    ComparativePayload, DashboardCreated, HistogramBucket, HistogramPayload, StatisticNames,
    StatisticSuffixes, StatisticsPayload, TimeSeries,
};
pub use scenario::ScenarioInstance;
pub use statistic::StatisticDescriptor;
