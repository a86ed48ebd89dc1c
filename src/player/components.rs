use bevy::prelude::*;

#[derive(Component)]
pub struct Player;

/// Camera orientation in radians. Pitch is clamped to straight up/down.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
  pub yaw: f32,
  pub pitch: f32,
}

impl LookAngles {
  pub fn rotation(&self) -> Quat {
    Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
  }
}

/// Whether the jump action was held last frame, for edge detection.
#[derive(Component, Default)]
pub struct JumpLatch(pub bool);
