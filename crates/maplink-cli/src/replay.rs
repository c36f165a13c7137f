//! Event log replay.
//!
//! A log is JSON lines of `{"name": ..., "payload": ..., "at_ms": ...}`,
//! `at_ms` being the receive time relative to the start of the log. Blank
//! lines and lines starting with `#` are skipped.

use anyhow::{Context, Result};
use maplink_event::Event;
use maplink_runtime::{event_channel, EventProcessor, MaplinkConfig};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct LogLine {
    name: String,
    #[serde(default)]
    payload: Value,
    #[serde(default)]
    at_ms: u64,
}

/// Parses a log, anchoring `at_ms` offsets at `base`.
///
/// Unknown event names are logged and skipped; malformed lines are errors.
pub fn parse_events(log: &str, base: Instant) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (idx, line) in log.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry: LogLine =
            serde_json::from_str(line).with_context(|| format!("line {}: invalid log entry", idx + 1))?;
        let at = base + Duration::from_millis(entry.at_ms);
        match Event::decode_at(&entry.name, &entry.payload.to_string(), at) {
            Ok(event) => events.push(event),
            Err(e) => warn!(line = idx + 1, error = %e, "skipping event"),
        }
    }
    Ok(events)
}

/// Replays `log` through the processor's consumer loop and returns one JSON
/// line per event the listener received.
pub async fn replay(log: &str, config: &MaplinkConfig) -> Result<Vec<String>> {
    let base = Instant::now();
    let events = parse_events(log, base)?;
    debug!(count = events.len(), "replaying events");

    let received = Arc::new(Mutex::new(Vec::new()));
    let out = Arc::clone(&received);
    let listener = move |event: &Event| out.lock().push(render_event(base, event));

    let processor = EventProcessor::from_config(Arc::new(listener), &config.events);
    let (sink, rx) = event_channel(events.len().max(1));
    let event_loop = tokio::spawn(processor.run(rx, None));

    for event in events {
        sink.deliver_event(event)?;
    }
    drop(sink);
    event_loop.await.context("event loop failed")?;

    let lines = received.lock().clone();
    Ok(lines)
}

fn render_event(base: Instant, event: &Event) -> String {
    let at_ms = event.received_at.saturating_duration_since(base).as_millis();
    json!({
        "name": event.name,
        "at_ms": u64::try_from(at_ms).unwrap_or(u64::MAX),
        "payload": event.payload,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplink_event::EventName;

    #[test]
    fn parse_skips_comments_and_unknown_names() {
        let log = "# header\n\n{\"name\":\"tap\",\"at_ms\":5}\n{\"name\":\"hover\"}\n";
        let events = parse_events(log, Instant::now()).expect("valid log");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, EventName::Tap);
    }

    #[test]
    fn parse_reports_line_number() {
        let err = parse_events("{\"name\":\"tap\"}\nnot json\n", Instant::now())
            .expect_err("bad line");
        assert!(err.to_string().contains("line 2"));
    }

    #[tokio::test]
    async fn replay_confirms_double_tap() {
        let log = r#"
{"name":"touchend","at_ms":0}
{"name":"touchend","at_ms":120}
{"name":"idle","at_ms":300}
{"name":"moveend","payload":{"zoom":3.0},"at_ms":310}
"#;
        let lines = replay(log, &MaplinkConfig::default()).await.expect("replay");
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(&lines[0]).expect("json");
        assert_eq!(first["name"], "doubletap");
        assert_eq!(first["at_ms"], 300);
        let second: Value = serde_json::from_str(&lines[1]).expect("json");
        assert_eq!(second["name"], "moveend");
        assert_eq!(second["payload"]["zoom"], 3.0);
    }
}
