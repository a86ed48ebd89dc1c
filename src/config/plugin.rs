#[cfg(not(target_family = "wasm"))]
use bevy::{asset::AssetEvent, ecs::message::MessageReader};
use bevy::{prelude::*, window::PrimaryWindow};
#[cfg(not(target_family = "wasm"))]
use bevy_common_assets::toml::TomlAssetPlugin;

#[cfg(not(target_family = "wasm"))]
use super::{CONFIG_ASSET_PATH, CONFIG_PATH, ConfigHandle};
use super::{ConfigLoaded, GameConfig};
use crate::player::components::Player;
use crate::player::locomotion::LocomotionController;

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    // Native: asset-based config with hot-reload
    #[cfg(not(target_family = "wasm"))]
    app
      .add_plugins(TomlAssetPlugin::<GameConfig>::new(&["config.toml"]))
      .add_systems(Update, watch_config_changes);

    app.add_systems(PreStartup, load_config_sync).add_systems(
      Update,
      (
        update_window_on_config_change,
        update_locomotion_on_config_change,
        update_camera_on_config_change,
      ),
    );
  }
}

/// Reads the config before any `Startup` system needs it. A missing or
/// invalid file falls back to the built-in defaults.
fn load_config_sync(
  mut commands: Commands,
  #[cfg(not(target_family = "wasm"))] asset_server: Res<AssetServer>,
) {
  // Native: set up asset handle for hot-reload
  #[cfg(not(target_family = "wasm"))]
  {
    let handle: Handle<GameConfig> = asset_server.load(CONFIG_ASSET_PATH);
    commands.insert_resource(ConfigHandle(handle));
  }

  #[cfg(target_family = "wasm")]
  let loaded = GameConfig::parse(super::EMBEDDED_CONFIG);
  #[cfg(not(target_family = "wasm"))]
  let loaded = GameConfig::from_file(CONFIG_PATH);

  let config = match loaded {
    Ok(config) => {
      info!("Loaded config with {} zones", config.zones.entries.len());
      config
    }
    Err(err) => {
      error!("Failed to load config, using defaults: {err}");
      GameConfig::default()
    }
  };

  commands.insert_resource(ConfigLoaded::from(config));
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_changes(
  mut commands: Commands,
  config_handle: Res<ConfigHandle>,
  mut messages: MessageReader<AssetEvent<GameConfig>>,
  configs: Res<Assets<GameConfig>>,
) {
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          match config.validate() {
            Ok(()) => {
              info!("Config reloaded!");
              commands.insert_resource(ConfigLoaded::from(config.clone()));
            }
            Err(err) => warn!("Ignoring config reload: {err}"),
          }
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}

fn update_locomotion_on_config_change(
  config: Res<ConfigLoaded>,
  mut players: Query<&mut LocomotionController, With<Player>>,
) {
  if config.is_changed() && !config.is_added() {
    let settings = config.locomotion.settings();
    for mut controller in &mut players {
      controller.set_settings(settings.clone());
    }
  }
}

fn update_camera_on_config_change(
  config: Res<ConfigLoaded>,
  mut camera_query: Query<&mut Projection, With<Player>>,
) {
  if config.is_changed() {
    for mut projection in camera_query.iter_mut() {
      if let Projection::Perspective(ref mut perspective) = *projection {
        perspective.fov = config.camera.fov_degrees.to_radians();
      }
    }
  }
}
