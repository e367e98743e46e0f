use prometheus::{
    register_histogram, register_int_counter_vec, proto::MetricFamily, Encoder, Histogram,
    IntCounterVec, TextEncoder,
};
use std::sync::LazyLock;

pub static RELEASE_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "releasify_release_requests_total",
        "Release requests handed to the release client, by outcome",
        &["outcome"]
    )
    .unwrap()
});

pub static RELEASE_LATENCY: LazyLock<Histogram> = LazyLock::new(|| {
    register_histogram!(
        "releasify_release_duration_seconds",
        "Release client call latency in seconds",
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap()
});

pub static AUTH_FAILURES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "releasify_auth_failures_total",
        "Basic authentication failures",
        &["reason"]
    )
    .unwrap()
});

/// Encode `families` in the Prometheus text format.
pub fn encode_metrics(families: &[MetricFamily]) -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

pub fn metrics_output() -> prometheus::Result<String> {
    encode_metrics(&prometheus::gather())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_includes_release_counters() {
        RELEASE_REQUESTS.with_label_values(&["success"]).inc_by(0);
        let output = metrics_output().unwrap();
        assert!(output.contains("releasify_release_requests_total"));
    }

    #[test]
    fn family_without_metrics_fails_to_encode() {
        assert!(encode_metrics(&[MetricFamily::default()]).is_err());
    }
}
