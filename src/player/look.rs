use std::f32::consts::FRAC_PI_2;

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use super::components::{LookAngles, Player};
use crate::config::ConfigLoaded;

/// Turns the camera from relative mouse motion while the pointer is captured.
pub fn mouse_look(
  mouse_motion: Res<AccumulatedMouseMotion>,
  config: Res<ConfigLoaded>,
  mut players: Query<(&mut LookAngles, &mut Transform), With<Player>>,
) {
  let delta = mouse_motion.delta;
  if delta == Vec2::ZERO {
    return;
  }

  let sensitivity = config.camera.mouse_sensitivity;
  for (mut look, mut transform) in &mut players {
    look.yaw -= delta.x * sensitivity;
    look.pitch = (look.pitch - delta.y * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    transform.rotation = look.rotation();
  }
}
