//! Pipeline timing tests

use sheetlytics::perf::{PipelineStats, ScopedTimer, measure};

#[test]
fn test_time_records_and_returns_result() {
    let mut stats = PipelineStats::new();
    let value = stats.time("ingest", || 21 * 2);
    stats.time("ingest", || ());

    assert_eq!(value, 42);
    let ingest = stats.get("ingest").unwrap();
    assert_eq!(ingest.count(), 2);
    assert!(ingest.max_ms() >= ingest.last_ms());
    assert!(ingest.average() <= ingest.max_ms());
    assert!(stats.get("shape").is_none());

    stats.reset();
    assert!(stats.get("ingest").is_none());
}

#[test]
fn test_scoped_timer_reports_elapsed() {
    let timer = ScopedTimer::new("summarize", 1_000.0);
    assert_eq!(timer.name(), "summarize");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure() {
    let (result, ms) = measure(|| "done");
    assert_eq!(result, "done");
    assert!(ms >= 0.0);
}
