use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use super::components::{JumpLatch, LookAngles, Player};
use super::locomotion::{LocomotionController, MoveInput};
use crate::config::ConfigLoaded;
use crate::input::{PlayerInput, player_input_actions};
use crate::world::{AMBIENT_BRIGHTNESS, BACKGROUND_COLOR};

/// The player is the first-person camera itself.
pub fn spawn_player(mut commands: Commands, config: Res<ConfigLoaded>) {
  let spawn_pos = Vec3::from_array(config.camera.spawn);
  info!("Spawning player at {:?}", spawn_pos);

  commands.spawn((
    Player,
    Camera3d::default(),
    Projection::Perspective(PerspectiveProjection {
      fov: config.camera.fov_degrees.to_radians(),
      near: 0.1,
      far: 1000.0,
      ..default()
    }),
    Transform::from_translation(spawn_pos),
    DistanceFog {
      color: BACKGROUND_COLOR,
      falloff: FogFalloff::Linear {
        start: 0.0,
        end: 50.0,
      },
      ..default()
    },
    AmbientLight {
      color: Color::WHITE,
      brightness: AMBIENT_BRIGHTNESS,
      ..default()
    },
    LocomotionController::new(config.locomotion.settings()),
    LookAngles::default(),
    MoveInput::default(),
    JumpLatch::default(),
    PlayerInput,
    player_input_actions(),
  ));
}
