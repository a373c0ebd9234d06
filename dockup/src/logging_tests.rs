use super::*;

#[test]
fn test_filter_follows_verbosity_without_env() {
    assert_eq!(filter_for(VerbosityLevel::Normal, None).to_string(), "warn");
    assert_eq!(filter_for(VerbosityLevel::Verbose, None).to_string(), "debug");
}

#[test]
fn test_env_directive_wins_over_verbosity() {
    let filter = filter_for(VerbosityLevel::Normal, Some("libdockup=trace"));
    assert_eq!(filter.to_string(), "libdockup=trace");
}

#[test]
fn test_invalid_env_directive_falls_back() {
    let filter = filter_for(VerbosityLevel::Trace, Some("libdockup=loud"));
    assert_eq!(filter.to_string(), "trace");
}
