//! Loading pilot configuration from disk.

use std::io::Write;

use approx::assert_relative_eq;
use cursor_pilot::{ConfigError, PilotConfig};
use rstest::rstest;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[rstest]
fn loads_options_and_weights() {
    let file = config_file(
        r#"{
            "increase_speed_out_of_combat": true,
            "draw_combat_area": true,
            "roll_weights": { "away_from_enemies": 0.3, "perpendicular": 0.1 }
        }"#,
    );
    let config = PilotConfig::load(file.path()).expect("config loads");
    assert!(config.increase_speed_out_of_combat);
    assert!(config.draw_combat_area);
    assert_relative_eq!(config.roll_weights.away_from_enemies, 0.3);
    assert_relative_eq!(config.roll_weights.perpendicular, 0.1);
    assert_relative_eq!(config.roll_weights.bullet_distance, 2.0);
}

#[rstest]
fn missing_file_reports_read_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent.json");
    let err = PilotConfig::load(&path).expect_err("file is missing");
    assert!(matches!(err, ConfigError::Read { path: ref p, .. } if p == &path));
}

#[rstest]
#[case::truncated("{\"draw_combat_area\": ")]
#[case::weights_not_an_object("{\"roll_weights\": 3}")]
#[case::flag_not_a_bool("{\"draw_combat_area\": \"yes\"}")]
fn malformed_file_reports_parse_error(#[case] contents: &str) {
    let file = config_file(contents);
    let err = PilotConfig::load(file.path()).expect_err("contents are invalid");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("failed to parse config"));
}
