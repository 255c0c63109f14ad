use crate::datamodel::ChartKind;

pub(crate) const DEFAULT_AXIS_LABEL: &str = "Valore di prova per Y";
pub(crate) const DEFAULT_TITLE: &str = "Default";

struct LabelRule {
    keyword: &'static str,
    axis_label: &'static str,
    title: &'static str,
}

// Applied top to bottom with last-match-wins, so later rules override
// earlier ones when a group matches several keywords. The order and the
// repeated smoothed_rtt entry are part of the dashboard contract; do not
// reorder or deduplicate.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        keyword: "fairness",
        axis_label: "",
        title: "Fairness",
    },
    LabelRule {
        keyword: "average_rtt",
        axis_label: "Average RTT (ms)",
        title: "Average RTT",
    },
    LabelRule {
        keyword: "average_throughput",
        axis_label: "Average Throughput (bytes/ms)",
        title: "Average Throughput",
    },
    LabelRule {
        keyword: "min_rtt",
        axis_label: "Min RTT (ms)",
        title: "Min RTT",
    },
    LabelRule {
        keyword: "smoothed_rtt",
        axis_label: "Smoothed RTT (ms)",
        title: "Smoothed RTT",
    },
    LabelRule {
        keyword: "smoothed_rtt",
        axis_label: "Smoothed RTT (ms)",
        title: "Smoothed RTT",
    },
    LabelRule {
        keyword: "latest_rtt",
        axis_label: "Latest RTT (ms)",
        title: "Latest RTT",
    },
    LabelRule {
        keyword: "rtt_variance",
        axis_label: "RTT Variance (ms)",
        title: "RTT variance",
    },
    LabelRule {
        keyword: "pto_count",
        axis_label: "PTO Count",
        title: "Probe timeout events Count",
    },
    LabelRule {
        keyword: "congestion_window",
        axis_label: "Congestion Window (bytes)",
        title: "Congestion window",
    },
    LabelRule {
        keyword: "bytes_in_flight",
        axis_label: "Bytes in Flight (bytes)",
        title: "Bytes in Flight",
    },
];

const SINGLE_STAT_KEYWORDS: &[&str] = &["fairness", "average_rtt", "average_throughput"];

/// Derive the (y-axis label, title) pair for a group of targets.
pub fn resolve_labels(targets: &[String]) -> (&'static str, &'static str) {
    let mut axis_label = DEFAULT_AXIS_LABEL;
    let mut title = DEFAULT_TITLE;
    for rule in LABEL_RULES {
        if targets.iter().any(|target| target.contains(rule.keyword)) {
            axis_label = rule.axis_label;
            title = rule.title;
        }
    }
    (axis_label, title)
}

/// Aggregate statistics render as a single number, everything else as a
/// line chart.
pub fn chart_kind(targets: &[String]) -> ChartKind {
    let single_stat = targets.iter().any(|target| {
        SINGLE_STAT_KEYWORDS
            .iter()
            .any(|keyword| target.contains(keyword))
    });
    if single_stat {
        ChartKind::SingleStat
    } else {
        ChartKind::Line
    }
}
