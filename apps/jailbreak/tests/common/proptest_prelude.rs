// Proptest settings shared by the integration suites.
//
// Env knobs:
// - PROPTEST_CASES: cases per property (default 64)
// - PROPTEST_MAX_SHRINK_MS: cap on shrinking time

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();

    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);

    let max_shrink_time = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    proptest::prelude::ProptestConfig {
        // No regression files from integration runs.
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
