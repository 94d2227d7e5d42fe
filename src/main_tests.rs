use super::*;

#[test]
fn verbosity_maps_to_log_level() {
    assert_eq!(default_log_level(0, false), "warn");
    assert_eq!(default_log_level(1, false), "info");
    assert_eq!(default_log_level(2, false), "debug");
    assert_eq!(default_log_level(3, false), "trace");
    assert_eq!(default_log_level(9, false), "trace");
}

#[test]
fn quiet_wins_over_verbose() {
    assert_eq!(default_log_level(2, true), "error");
}
