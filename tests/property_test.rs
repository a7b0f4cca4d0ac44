//! Property-based tests for line parsing and wait computation
//!
//! Uses proptest to generate random inputs and verify invariants hold
//! across a wide range of scenarios that unit tests might miss.

use chrono::{NaiveTime, Timelike};
use proptest::prelude::*;
use std::time::Duration;
use telemetry_replay::replay::wait_between;
use telemetry_replay::LineParser;

/// Strategy for a valid time of day with millisecond precision
fn time_of_day() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60, 0u32..60, 0u32..1000)
        .prop_map(|(h, m, s, ms)| NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: lines without the message marker never parse
    #[test]
    fn lines_without_marker_never_parse(line in "[^\n]{0,200}") {
        prop_assume!(!line.contains("verb MQTT Message received with topic"));
        let parser = LineParser::new().unwrap();
        prop_assert!(parser.parse(&line).is_none());
    }

    /// Property: well-formed lines parse to exactly the fields written
    #[test]
    fn well_formed_lines_parse(
        time in time_of_day(),
        topic in "[a-z0-9/_+#-]{1,40}",
        payload in "[ -~]{1,120}",
    ) {
        let parser = LineParser::new().unwrap();
        let line = format!(
            "2020-03-04 {} verb MQTT Message received with topic '{}' and data: {}",
            time.format("%H:%M:%S%.3f"),
            topic,
            payload
        );
        prop_assume!(!payload.contains("' and data: "));

        let event = parser.parse(&line).unwrap();
        prop_assert_eq!(event.time, time);
        prop_assert_eq!(event.topic, topic);
        prop_assert_eq!(event.payload, payload);
    }

    /// Property: the wait is never negative and equals the forward gap
    #[test]
    fn wait_is_forward_gap_or_zero(a in time_of_day(), b in time_of_day()) {
        let wait = wait_between(a, b, 1.0);
        let ms = |t: NaiveTime| u64::from(t.num_seconds_from_midnight()) * 1000
            + u64::from(t.nanosecond() / 1_000_000);

        if ms(b) >= ms(a) {
            prop_assert_eq!(wait, Duration::from_millis(ms(b) - ms(a)));
        } else {
            prop_assert_eq!(wait, Duration::ZERO);
        }
    }
}
