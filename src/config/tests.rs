use bevy::prelude::*;

use super::*;

#[test]
fn shipped_config_matches_defaults() {
  let shipped = GameConfig::parse(EMBEDDED_CONFIG).expect("shipped config should parse");
  let defaults = GameConfig::default();

  assert_eq!(shipped.window, defaults.window);
  assert_eq!(shipped.camera, defaults.camera);
  assert_eq!(shipped.locomotion, defaults.locomotion);
  assert_eq!(shipped.room, defaults.room);
  assert_eq!(shipped.zones.proximity_radius, defaults.zones.proximity_radius);
  assert_eq!(shipped.zones.tie_break, defaults.zones.tie_break);

  let names: Vec<_> = shipped.zones.entries.iter().map(|z| z.name.as_str()).collect();
  assert_eq!(names, ["Retro Game Corner", "CV & Experience"]);
  for (entry, expected) in shipped.zones.entries.iter().zip(&defaults.zones.entries) {
    assert_eq!(entry.position, expected.position);
    assert_eq!(entry.label, expected.label);
    for (a, b) in entry.color.iter().zip(expected.color) {
      assert!((a - b).abs() < 1e-6);
    }
  }
}

#[test]
fn partial_config_fills_in_defaults() {
  let config = GameConfig::parse(
    r#"
[locomotion]
move_speed = 20.0
slide_enabled = false
jump_enabled = false
"#,
  )
  .expect("partial config should parse");

  assert_eq!(config.locomotion.move_speed, 20.0);
  assert_eq!(config.locomotion.gravity, LocomotionConfig::default().gravity);
  assert_eq!(config.room, RoomConfig::default());
  assert_eq!(config.zones.entries.len(), 2);

  let settings = config.locomotion.settings();
  assert!(!settings.slide_enabled);
  assert!(!settings.jump_enabled);
}

#[test]
fn nearest_tie_break_is_accepted() {
  let config = GameConfig::parse(
    r#"
[zones]
tie_break = "nearest"
entries = []
"#,
  )
  .expect("config should parse");
  assert_eq!(config.zones.tie_break, TieBreak::Nearest);
  assert!(config.zones.descriptors().is_empty());
}

#[test]
fn zone_entries_become_descriptors() {
  let config = GameConfig::parse(
    r##"
[[zones.entries]]
name = "Lab"
label = "LAB"
icon = "L"
position = [1.0, 2.0, 3.0]
color = "#ff0000"
"##,
  )
  .expect("config should parse");

  let zones = config.zones.descriptors();
  assert_eq!(zones.len(), 1);
  assert_eq!(zones[0].position, Vec3::new(1.0, 2.0, 3.0));
  assert_eq!(zones[0].color, [1.0, 0.0, 0.0]);
  assert_eq!(zones[0].caption(), "L Lab");
}

#[test]
fn bad_hex_color_is_a_parse_error() {
  let result = GameConfig::parse(
    r##"
[[zones.entries]]
name = "Lab"
label = "LAB"
icon = "L"
position = [0.0, 0.0, 0.0]
color = "#ff00"
"##,
  );
  assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn non_ascii_hex_color_is_a_parse_error() {
  // Six bytes but not six hex digits.
  let result = GameConfig::parse(
    r##"
[[zones.entries]]
name = "Lab"
label = "LAB"
icon = "L"
position = [0.0, 0.0, 0.0]
color = "#aé€"
"##,
  );
  assert!(matches!(result, Err(ConfigError::Parse(_))));

  let signed = GameConfig::parse(
    r##"
[[zones.entries]]
name = "Lab"
label = "LAB"
icon = "L"
position = [0.0, 0.0, 0.0]
color = "#+f+f+f"
"##,
  );
  assert!(matches!(signed, Err(ConfigError::Parse(_))));
}

#[test]
fn nan_values_are_rejected() {
  for source in [
    "[room]\nhalf_extent = nan\n",
    "[zones]\nproximity_radius = nan\n",
    "[locomotion]\nnormal_camera_height = nan\n",
    "[locomotion]\nslide_camera_height = nan\n",
    "[room]\nhalf_extent = inf\n",
  ] {
    let result = GameConfig::parse(source);
    assert!(
      matches!(result, Err(ConfigError::Invalid(_))),
      "{source:?} should be rejected, got {result:?}"
    );
  }
}

#[test]
fn crouch_above_standing_height_is_rejected() {
  let result = GameConfig::parse(
    r#"
[locomotion]
normal_camera_height = 1.0
slide_camera_height = 1.5
"#,
  );
  let Err(ConfigError::Invalid(message)) = result else {
    panic!("expected validation error, got {result:?}");
  };
  assert!(message.contains("slide_camera_height"));
}

#[test]
fn negative_rates_are_rejected() {
  let result = GameConfig::parse(
    r#"
[locomotion]
gravity = -9.8
"#,
  );
  assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn non_positive_radius_is_rejected() {
  let result = GameConfig::parse(
    r#"
[zones]
proximity_radius = 0.0
"#,
  );
  assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn missing_file_is_an_io_error() {
  let result = GameConfig::from_file("does/not/exist.config.toml");
  assert!(matches!(result, Err(ConfigError::Io(_))));
}
