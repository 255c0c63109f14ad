use crate::clock::{epoch_to_unix_milliseconds, Clock};
use crate::datamodel::{
    AxisConfig, CellAxes, CellQuery, Dashboard, DashboardCell, ScenarioInstance,
    StatisticDescriptor,
};
use anyhow::{Context, Result};
use tracing::debug;

pub mod labels;

/// Dashboard-creation endpoint of the graphing backend.
pub const DASHBOARDS_PATH: &str = "/chronograf/api/dashboards";

// Database and retention policy the collector writes statistics into.
const STATISTICS_DATABASE: &str = "openbach";
const RETENTION_POLICY: &str = "openbach";

const CELL_HEIGHT: u32 = 4;
const CELL_WIDTH: u32 = 12;

/// Statistics that end up on one chart: same job instance, same unit.
/// Built during the grouping pass and consumed during cell assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphGroup {
    pub agent: String,
    pub name: String,
    pub job_id: i64,
    pub unit: String,
    pub targets: Vec<String>,
}

/// Stable sort by (job id, unit); ties keep their input order.
fn sorted_descriptors(descriptors: &[StatisticDescriptor]) -> Vec<StatisticDescriptor> {
    let mut sorted = descriptors.to_vec();
    sorted.sort_by(|a, b| a.job_id.cmp(&b.job_id).then_with(|| a.unit.cmp(&b.unit)));
    sorted
}

/// Partition descriptors into graph groups.
///
/// A new group starts at every descriptor when `grouped` is off;
/// otherwise only where the sorted sequence changes job id or unit, so a
/// group always holds adjacent descriptors sharing both.
pub fn group_descriptors(descriptors: &[StatisticDescriptor], grouped: bool) -> Vec<GraphGroup> {
    let sorted = sorted_descriptors(descriptors);
    let mut groups: Vec<GraphGroup> = Vec::new();

    for (index, descriptor) in sorted.iter().enumerate() {
        let starts_new_group = !grouped
            || index == 0
            || sorted[index - 1].job_id != descriptor.job_id
            || sorted[index - 1].unit != descriptor.unit;
        if starts_new_group {
            groups.push(GraphGroup {
                agent: descriptor.job_agent.clone(),
                name: descriptor.job_name.clone(),
                job_id: descriptor.job_id,
                unit: descriptor.unit.clone(),
                targets: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.targets.push(descriptor.stat_name.clone());
        }
    }

    groups
}

fn statistic_query(stat_name: &str, job_name: &str, job_id: i64, start_ms: i64) -> String {
    format!(
        "SELECT \"{stat_name}\" FROM \"{STATISTICS_DATABASE}\".\"{RETENTION_POLICY}\".\"{job_name}\" \
         WHERE time > {start_ms}ms \
         AND \"@job_instance_id\"='{job_id}' GROUP BY \"@suffix\" FILL(null)"
    )
}

fn build_cell(group: &GraphGroup, index: usize, start_ms: i64) -> DashboardCell {
    let (axis_label, title) = labels::resolve_labels(&group.targets);
    let queries = group
        .targets
        .iter()
        .map(|stat_name| {
            CellQuery::influxql(
                statistic_query(stat_name, &group.name, group.job_id, start_ms),
                format!("{stat_name} ({})", group.unit),
            )
        })
        .collect();

    DashboardCell {
        h: CELL_HEIGHT,
        name: format!("{title} (#{})", group.job_id),
        kind: labels::chart_kind(&group.targets),
        queries,
        axes: CellAxes {
            x: AxisConfig::time(),
            y: AxisConfig::linear(axis_label),
            y2: AxisConfig::disabled(),
        },
        w: CELL_WIDTH,
        x: 0,
        y: CELL_HEIGHT * index as u32,
    }
}

/// Assemble the dashboard-creation request for a scenario instance.
///
/// Pure apart from parsing the instance start date through the clock
/// capability; submission is a separate step.
pub fn build_dashboard(
    instance: &ScenarioInstance,
    descriptors: &[StatisticDescriptor],
    grouped: bool,
    clock: &impl Clock,
) -> Result<Dashboard> {
    let start = clock
        .parse_timestamp(&instance.start_date)
        .with_context(|| format!("invalid scenario start date {:?}", instance.start_date))?;
    let start_ms = epoch_to_unix_milliseconds(start);

    let groups = group_descriptors(descriptors, grouped);
    let cells = groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            debug!(
                "cell {index}: job {} on agent {} ({} targets)",
                group.job_id,
                group.agent,
                group.targets.len()
            );
            build_cell(group, index, start_ms)
        })
        .collect();

    Ok(Dashboard {
        cells,
        name: format!(
            "Scenario instance #{}",
            instance.owner_scenario_instance_id
        ),
    })
}
