use serde::{Deserialize, Serialize};

/// Dashboard-creation request body, as the graphing backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub cells: Vec<DashboardCell>,
    pub name: String,
}

/// One chart tile within a dashboard.
///
/// Field names are the wire names: `h`/`w` are the cell size in grid
/// units, `x`/`y` its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCell {
    pub h: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub queries: Vec<CellQuery>,
    pub axes: CellAxes,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

/// How a cell renders its queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    #[serde(rename = "single-stat")]
    SingleStat,
    #[serde(rename = "line")]
    Line,
}

/// One query within a cell. The query text is InfluxQL and is executed by
/// the graphing backend, never locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellQuery {
    pub query: String,
    pub source: String,
    pub text: String,
    #[serde(rename = "type")]
    pub language: String,
}

impl CellQuery {
    pub fn influxql(query: String, text: String) -> Self {
        Self {
            query,
            source: String::new(),
            text,
            language: "influxql".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellAxes {
    pub x: AxisConfig,
    pub y: AxisConfig,
    pub y2: AxisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub base: String,
    pub bounds: Vec<String>,
    pub label: String,
    pub prefix: String,
    pub scale: String,
    pub suffix: String,
}

impl AxisConfig {
    /// The time axis shared by every cell.
    pub fn time() -> Self {
        Self {
            base: "10".to_string(),
            bounds: vec![String::new(), String::new()],
            label: "Time".to_string(),
            prefix: String::new(),
            scale: "linear".to_string(),
            suffix: String::new(),
        }
    }

    /// A linear value axis with the given label.
    pub fn linear(label: &str) -> Self {
        Self {
            base: String::new(),
            bounds: vec![String::new(), String::new()],
            label: label.to_string(),
            prefix: String::new(),
            scale: "linear".to_string(),
            suffix: String::new(),
        }
    }

    /// An axis left unconfigured, used for the secondary y axis.
    pub fn disabled() -> Self {
        Self {
            base: String::new(),
            bounds: vec![String::new(), String::new()],
            label: String::new(),
            prefix: String::new(),
            scale: String::new(),
            suffix: String::new(),
        }
    }
}
