mod common;

use std::sync::Arc;

use cloudwatch_reporter::models::Unit;
use common::{build_reporter, snapshots, RecordingClient};
use serde_json::json;

fn worker_snapshots() -> cloudwatch_reporter::models::Snapshots {
    snapshots(vec![
        (
            "app1:worker_meter",
            json!({
                "count": 184, "kind": "meter", "five": 18.786777163057295,
                "one": 18.73603553170346, "fifteen": 18.79556787840392,
                "day": 18.799953705043272, "mean": 18.384584630563918
            }),
        ),
        (
            "app1:worker_histogram",
            json!({
                "kind": "histogram", "n": 42, "min": 0.0002, "max": 0.094,
                "arithmetic_mean": 0.047, "median": 0.051,
                "percentile": [[50, 0.05], [99.9, 0.094]],
                "histogram": [[1.000256061553955, 42]]
            }),
        ),
        ("app1:version", json!({"kind": "gauge", "value": "version 1.0"})),
        ("app1:jobs", json!({"kind": "counter", "value": 5})),
    ])
}

#[tokio::test]
async fn integration_every_kind_is_submitted() {
    let client = Arc::new(RecordingClient::default());
    let reporter = build_reporter(client.clone());

    let summary = reporter.report(&worker_snapshots()).await;

    assert_eq!(summary.submitted, 4);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);

    let requests = client.requests();
    assert_eq!(requests.len(), 4);
    for request in &requests {
        assert_eq!(request.namespace, "Workers");
        assert_eq!(request.unit, Unit::None);
        assert_eq!(request.dimensions["server"], "test");
        assert_eq!(request.dimensions["app"], "app1");
        assert_eq!(request.metric_names.len(), request.values.len());
        assert!(request.statistics.is_none());
    }

    let histogram = requests
        .iter()
        .find(|r| r.metric_names.iter().any(|n| n.starts_with("worker_histogram.")))
        .expect("histogram batch missing");
    assert!(histogram
        .metric_names
        .contains(&"worker_histogram.percentile_99.9".to_string()));
    assert!(histogram
        .metric_names
        .iter()
        .all(|n| n != "worker_histogram.histogram" && n != "worker_histogram.percentile"));

    let gauge = requests
        .iter()
        .find(|r| r.metric_names == vec!["version.value"])
        .expect("gauge batch missing");
    assert_eq!(gauge.values, vec![json!("version 1.0")]);
}

#[tokio::test]
async fn integration_unknown_kind_is_skipped() {
    let client = Arc::new(RecordingClient::default());
    let reporter = build_reporter(client.clone());
    let objects = snapshots(vec![
        ("m1", json!({"kind": "counter", "value": 5})),
        ("m2", json!({"kind": "unknown"})),
    ]);

    let summary = reporter.report(&objects).await;

    assert_eq!(summary.submitted, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(client.attempts(), vec!["m1.value".to_string()]);
}

#[tokio::test]
async fn integration_snapshot_without_kind_is_skipped() {
    let client = Arc::new(RecordingClient::default());
    let reporter = build_reporter(client.clone());
    let objects = snapshots(vec![("app1:untagged", json!({"value": 5}))]);

    let summary = reporter.report(&objects).await;

    assert_eq!(summary.skipped, 1);
    assert!(client.attempts().is_empty());
}

#[tokio::test]
async fn integration_source_snapshots_are_not_modified() {
    let client = Arc::new(RecordingClient::default());
    let reporter = build_reporter(client.clone());
    let objects = worker_snapshots();
    let before = objects.clone();

    reporter.report(&objects).await;

    assert_eq!(objects, before);
    let histogram = &objects["app1:worker_histogram"];
    assert!(histogram.contains_key("kind"));
    assert!(histogram.contains_key("histogram"));
    assert!(histogram.contains_key("percentile"));
}

#[tokio::test]
async fn integration_transport_failure_does_not_stop_the_cycle() {
    // entries are visited in name order, so the failing meter comes first
    let client = Arc::new(RecordingClient::failing_for(&["a_first"]));
    let reporter = build_reporter(client.clone());
    let objects = snapshots(vec![
        ("app1:a_first", json!({"kind": "counter", "value": 1})),
        ("app1:b_second", json!({"kind": "counter", "value": 2})),
        ("app1:c_third", json!({"kind": "meter", "count": 3, "mean": 0.1})),
    ]);

    let summary = reporter.report(&objects).await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.submitted, 2);
    assert_eq!(client.attempts().len(), 3);
    let submitted: Vec<_> = client
        .requests()
        .into_iter()
        .map(|r| r.metric_names[0].clone())
        .collect();
    assert_eq!(submitted, vec!["b_second.value", "c_third.count"]);
}

#[tokio::test]
async fn integration_repeated_reports_are_identical_except_timestamp() {
    let client = Arc::new(RecordingClient::default());
    let reporter = build_reporter(client.clone());
    let objects = worker_snapshots();

    reporter.report(&objects).await;
    reporter.report(&objects).await;

    let requests = client.requests();
    assert_eq!(requests.len(), 8);
    let (first, second) = requests.split_at(4);
    for (a, b) in first.iter().zip(second.iter()) {
        let mut b = b.clone();
        b.timestamp = a.timestamp;
        assert_eq!(a, &b);
    }
}
