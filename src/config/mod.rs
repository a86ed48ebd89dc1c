mod plugin;
#[cfg(test)]
mod tests;

use std::path::Path;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::{Deserialize, Deserializer, de};

use crate::player::locomotion::LocomotionSettings;
use crate::zones::proximity::{TieBreak, ZoneDescriptor};

/// Path of the config file relative to the working directory.
pub const CONFIG_PATH: &str = "assets/config/game.config.toml";
/// Path of the config file inside the asset folder, used for hot-reload.
pub const CONFIG_ASSET_PATH: &str = "config/game.config.toml";
/// The shipped config, embedded for builds without filesystem access.
pub const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/game.config.toml");

#[derive(Asset, TypePath, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub locomotion: LocomotionConfig,
  pub room: RoomConfig,
  pub zones: ZonesConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      width: 1280,
      height: 720,
      title: "Portfolio Room".to_string(),
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
  pub fov_degrees: f32,
  /// Radians of rotation per pixel of mouse motion.
  pub mouse_sensitivity: f32,
  pub spawn: [f32; 3],
}

impl Default for CameraConfig {
  fn default() -> Self {
    Self {
      fov_degrees: 75.0,
      mouse_sensitivity: 0.002,
      spawn: [0.0, 1.7, 8.0],
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
  pub move_speed: f32,
  pub ground_friction: f32,
  pub air_friction: f32,
  pub slide_speed: f32,
  pub slide_decay_rate: f32,
  pub slide_carry_threshold: f32,
  pub jump_force: f32,
  pub gravity: f32,
  pub normal_camera_height: f32,
  pub slide_camera_height: f32,
  pub height_smoothing: f32,
  pub slide_enabled: bool,
  pub jump_enabled: bool,
  /// Frame deltas are clamped to this before reaching the controller.
  pub max_frame_delta: f32,
}

impl Default for LocomotionConfig {
  fn default() -> Self {
    let settings = LocomotionSettings::default();
    Self {
      move_speed: settings.move_speed,
      ground_friction: settings.ground_friction,
      air_friction: settings.air_friction,
      slide_speed: settings.slide_speed,
      slide_decay_rate: settings.slide_decay_rate,
      slide_carry_threshold: settings.slide_carry_threshold,
      jump_force: settings.jump_force,
      gravity: settings.gravity,
      normal_camera_height: settings.normal_camera_height,
      slide_camera_height: settings.slide_camera_height,
      height_smoothing: settings.height_smoothing,
      slide_enabled: settings.slide_enabled,
      jump_enabled: settings.jump_enabled,
      max_frame_delta: 0.1,
    }
  }
}

impl LocomotionConfig {
  pub fn settings(&self) -> LocomotionSettings {
    LocomotionSettings {
      move_speed: self.move_speed,
      ground_friction: self.ground_friction,
      air_friction: self.air_friction,
      slide_speed: self.slide_speed,
      slide_decay_rate: self.slide_decay_rate,
      slide_carry_threshold: self.slide_carry_threshold,
      jump_force: self.jump_force,
      gravity: self.gravity,
      normal_camera_height: self.normal_camera_height,
      slide_camera_height: self.slide_camera_height,
      height_smoothing: self.height_smoothing,
      slide_enabled: self.slide_enabled,
      jump_enabled: self.jump_enabled,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RoomConfig {
  /// Player positions are clamped to ±half_extent on X and Z.
  pub half_extent: f32,
  pub floor_size: f32,
  pub wall_height: f32,
}

impl Default for RoomConfig {
  fn default() -> Self {
    Self {
      half_extent: 14.0,
      floor_size: 30.0,
      wall_height: 5.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ZonesConfig {
  pub proximity_radius: f32,
  pub tie_break: TieBreak,
  pub entries: Vec<ZoneEntry>,
}

impl Default for ZonesConfig {
  fn default() -> Self {
    Self {
      proximity_radius: 3.0,
      tie_break: TieBreak::LastInList,
      entries: vec![
        ZoneEntry {
          name: "Retro Game Corner".to_string(),
          label: "RETRO GAMES".to_string(),
          icon: "🕹️".to_string(),
          position: [-8.0, 1.5, -8.0],
          color: [0.0, 1.0, 1.0],
        },
        ZoneEntry {
          name: "CV & Experience".to_string(),
          label: "MY CV".to_string(),
          icon: "📄".to_string(),
          position: [8.0, 1.5, -8.0],
          color: [1.0, 2.0 / 3.0, 0.0],
        },
      ],
    }
  }
}

impl ZonesConfig {
  pub fn descriptors(&self) -> Vec<ZoneDescriptor> {
    self
      .entries
      .iter()
      .map(|entry| ZoneDescriptor {
        position: Vec3::from_array(entry.position),
        name: entry.name.clone(),
        label: entry.label.clone(),
        icon: entry.icon.clone(),
        color: entry.color,
      })
      .collect()
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ZoneEntry {
  pub name: String,
  pub label: String,
  pub icon: String,
  pub position: [f32; 3],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
    return Err(de::Error::custom(format!("expected a 6-digit hex color, got {s:?}")));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

impl GameConfig {
  pub fn parse(source: &str) -> Result<Self, ConfigError> {
    let config: GameConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    Self::parse(&source)
  }

  /// Rejects values that would break the locomotion or proximity invariants.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let loco = &self.locomotion;
    let heights = [
      ("normal_camera_height", loco.normal_camera_height),
      ("slide_camera_height", loco.slide_camera_height),
    ];
    if let Some((name, value)) = heights.iter().find(|(_, v)| !v.is_finite()) {
      return Err(ConfigError::Invalid(format!(
        "locomotion.{name} must be a finite number, got {value}"
      )));
    }
    if loco.slide_camera_height > loco.normal_camera_height {
      return Err(ConfigError::Invalid(format!(
        "slide_camera_height ({}) is above normal_camera_height ({})",
        loco.slide_camera_height, loco.normal_camera_height
      )));
    }
    let rates = [
      ("move_speed", loco.move_speed),
      ("ground_friction", loco.ground_friction),
      ("air_friction", loco.air_friction),
      ("slide_speed", loco.slide_speed),
      ("slide_decay_rate", loco.slide_decay_rate),
      ("slide_carry_threshold", loco.slide_carry_threshold),
      ("jump_force", loco.jump_force),
      ("gravity", loco.gravity),
      ("height_smoothing", loco.height_smoothing),
      ("max_frame_delta", loco.max_frame_delta),
    ];
    if let Some((name, value)) = rates.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
      return Err(ConfigError::Invalid(format!(
        "locomotion.{name} must be a non-negative number, got {value}"
      )));
    }
    if !is_positive(self.room.half_extent) {
      return Err(ConfigError::Invalid(format!(
        "room.half_extent must be positive, got {}",
        self.room.half_extent
      )));
    }
    if !is_positive(self.zones.proximity_radius) {
      return Err(ConfigError::Invalid(format!(
        "zones.proximity_radius must be positive, got {}",
        self.zones.proximity_radius
      )));
    }
    Ok(())
  }
}

/// False for zero, negatives, NaN and infinities.
fn is_positive(value: f32) -> bool {
  value.is_finite() && value > 0.0
}

/// Error loading the game config.
#[derive(Debug)]
pub enum ConfigError {
  Io(std::io::Error),
  Parse(toml::de::Error),
  Invalid(String),
}

impl From<std::io::Error> for ConfigError {
  fn from(err: std::io::Error) -> Self {
    Self::Io(err)
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {e}"),
      Self::Parse(e) => write!(f, "parse error: {e}"),
      Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
      Self::Invalid(_) => None,
    }
  }
}

#[cfg(not(target_family = "wasm"))]
#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub locomotion: LocomotionConfig,
  pub room: RoomConfig,
  pub zones: ZonesConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      locomotion: config.locomotion,
      room: config.room,
      zones: config.zones,
    }
  }
}
