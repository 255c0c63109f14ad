use urlencoding::encode;

/// Statistics available for a project.
pub fn names_route(project: &str) -> String {
    format!("/statistic/{}", encode(project))
}

/// Statistics and suffixes recorded for a job instance.
pub fn suffixes_route(job_id: i64) -> String {
    format!("/statistic/{job_id}")
}

/// Origin timestamp of a job instance.
pub fn origin_route(job_id: i64) -> String {
    format!("/statistic/{job_id}/?origin")
}

/// Base route for statistic values. The suffix segment is only present
/// when a suffix is given; further parameters (origin, histogram,
/// comparative) are appended by the caller.
pub fn statistics_route(job_id: i64, stat_name: &str, suffix: &str) -> String {
    let mut route = format!("/statistic/{job_id}?name={}", encode(stat_name));
    if suffix.is_empty() {
        return route;
    }
    route.push_str("&suffix=");
    route.push_str(&encode(suffix));
    route
}
