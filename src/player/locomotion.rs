//! First-person locomotion state machine.
//!
//! Pure per-frame logic: the controller consumes a [`MoveInput`] snapshot and a
//! frame delta and returns a camera-relative [`Displacement`]. Applying that
//! displacement to a transform is the caller's job (see
//! [`super::movement::apply_locomotion`]).

use bevy::prelude::*;

/// Momentum below this is treated as a finished slide.
const SLIDE_STOP_EPSILON: f32 = 0.01;

/// Snapshot of the movement keys for one frame.
///
/// Movement and slide are level-triggered; `jump_pressed` is true only on the
/// frame the jump key went down.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput {
  pub forward: bool,
  pub backward: bool,
  pub left: bool,
  pub right: bool,
  pub slide_held: bool,
  pub jump_pressed: bool,
}

impl MoveInput {
  /// Unit direction as `(strafe, forward)`, zero when no key is held or
  /// opposing keys cancel out.
  pub fn direction(&self) -> Vec2 {
    let x = self.right as i8 - self.left as i8;
    let y = self.forward as i8 - self.backward as i8;
    Vec2::new(x as f32, y as f32).normalize_or_zero()
  }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionMode {
  #[default]
  Grounded,
  Sliding,
  Airborne,
}

/// Tuning for [`LocomotionController`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionSettings {
  pub move_speed: f32,
  /// Exponential decay rate of ground velocity, per second.
  pub ground_friction: f32,
  /// Weaker decay applied to carried momentum while airborne.
  pub air_friction: f32,
  pub slide_speed: f32,
  pub slide_decay_rate: f32,
  /// Slide momentum above this keeps driving motion after a jump.
  pub slide_carry_threshold: f32,
  pub jump_force: f32,
  /// Positive downward acceleration.
  pub gravity: f32,
  pub normal_camera_height: f32,
  pub slide_camera_height: f32,
  pub height_smoothing: f32,
  pub slide_enabled: bool,
  pub jump_enabled: bool,
}

impl Default for LocomotionSettings {
  fn default() -> Self {
    Self {
      move_speed: 15.0,
      ground_friction: 10.0,
      air_friction: 1.0,
      slide_speed: 30.0,
      slide_decay_rate: 3.0,
      slide_carry_threshold: 0.5,
      jump_force: 6.0,
      gravity: 20.0,
      normal_camera_height: 1.7,
      slide_camera_height: 0.9,
      height_smoothing: 10.0,
      slide_enabled: true,
      jump_enabled: true,
    }
  }
}

impl LocomotionSettings {
  /// Walk-only tuning: slide and jump transitions are disabled.
  pub fn simple() -> Self {
    Self {
      slide_enabled: false,
      jump_enabled: false,
      ..default()
    }
  }
}

/// Mutable locomotion state, persisted across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
  /// Ground velocity as `(strafe, forward)`.
  pub planar_velocity: Vec2,
  pub vertical_velocity: f32,
  /// Height above the standing position while airborne.
  pub elevation: f32,
  pub slide_momentum: f32,
  /// A ground slide has started and the slide key is still held.
  pub sliding: bool,
  pub grounded: bool,
  pub double_jump_available: bool,
  /// Eye height, always within `[slide_camera_height, normal_camera_height]`.
  pub camera_height: f32,
}

impl LocomotionState {
  pub fn standing(camera_height: f32) -> Self {
    Self {
      planar_velocity: Vec2::ZERO,
      vertical_velocity: 0.0,
      elevation: 0.0,
      slide_momentum: 0.0,
      sliding: false,
      grounded: true,
      double_jump_available: false,
      camera_height,
    }
  }
}

/// Result of one controller step.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
  /// Offset along the look direction projected onto the floor.
  pub forward: f32,
  /// Offset along the strafe axis.
  pub right: f32,
  /// Absolute camera Y: eye height plus jump elevation.
  pub camera_height: f32,
}

#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
  settings: LocomotionSettings,
  state: LocomotionState,
}

impl LocomotionController {
  pub fn new(settings: LocomotionSettings) -> Self {
    let state = LocomotionState::standing(settings.normal_camera_height);
    Self { settings, state }
  }

  pub fn settings(&self) -> &LocomotionSettings {
    &self.settings
  }

  /// Replaces the tuning while keeping the current motion.
  pub fn set_settings(&mut self, settings: LocomotionSettings) {
    self.settings = settings;
    self.state.camera_height = self.bound_height(self.state.camera_height);
  }

  pub fn state(&self) -> &LocomotionState {
    &self.state
  }

  pub fn mode(&self) -> LocomotionMode {
    if !self.state.grounded {
      LocomotionMode::Airborne
    } else if self.state.sliding {
      LocomotionMode::Sliding
    } else {
      LocomotionMode::Grounded
    }
  }

  /// Advances the state machine by `delta` seconds.
  pub fn update(&mut self, input: MoveInput, delta: f32) -> Displacement {
    let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

    if input.jump_pressed && self.settings.jump_enabled {
      self.handle_jump();
    }

    let (forward, right) = if !self.state.grounded {
      self.step_airborne(delta)
    } else if input.slide_held && self.settings.slide_enabled {
      self.step_sliding(delta)
    } else {
      self.step_grounded(input, delta)
    };

    let target_height = if self.state.sliding && self.state.grounded {
      self.settings.slide_camera_height
    } else {
      self.settings.normal_camera_height
    };
    self.ease_camera_height(target_height, delta);

    Displacement {
      forward,
      right,
      camera_height: self.state.camera_height + self.state.elevation,
    }
  }

  fn handle_jump(&mut self) {
    let state = &mut self.state;
    if state.grounded {
      state.vertical_velocity = self.settings.jump_force;
      state.grounded = false;
      state.double_jump_available = true;
    } else if state.double_jump_available {
      state.vertical_velocity = self.settings.jump_force;
      state.double_jump_available = false;
    }
  }

  fn step_airborne(&mut self, delta: f32) -> (f32, f32) {
    let settings = &self.settings;
    let state = &mut self.state;

    state.vertical_velocity -= settings.gravity * delta;
    state.elevation += state.vertical_velocity * delta;
    if state.elevation <= 0.0 && state.vertical_velocity <= 0.0 {
      state.elevation = 0.0;
      state.vertical_velocity = 0.0;
      state.grounded = true;
      state.double_jump_available = false;
    }

    if state.slide_momentum > settings.slide_carry_threshold {
      state.slide_momentum *= decay_factor(settings.air_friction, delta);
      state.planar_velocity = Vec2::new(0.0, state.slide_momentum);
      (state.slide_momentum * delta, 0.0)
    } else {
      state.planar_velocity *= decay_factor(settings.air_friction, delta);
      let step = state.planar_velocity * delta;
      (step.y, step.x)
    }
  }

  fn step_sliding(&mut self, delta: f32) -> (f32, f32) {
    let settings = &self.settings;
    let state = &mut self.state;

    if !state.sliding {
      state.sliding = true;
      state.slide_momentum = settings.slide_speed;
    }

    state.slide_momentum *= decay_factor(settings.slide_decay_rate, delta);
    if state.slide_momentum < SLIDE_STOP_EPSILON {
      state.slide_momentum = 0.0;
    }
    state.planar_velocity = Vec2::new(0.0, state.slide_momentum);
    (state.slide_momentum * delta, 0.0)
  }

  fn step_grounded(&mut self, input: MoveInput, delta: f32) -> (f32, f32) {
    let settings = &self.settings;
    let state = &mut self.state;

    state.sliding = false;
    state.slide_momentum = 0.0;

    state.planar_velocity *= decay_factor(settings.ground_friction, delta);
    state.planar_velocity += input.direction() * settings.move_speed * delta;

    let step = state.planar_velocity * delta;
    (step.y, step.x)
  }

  fn ease_camera_height(&mut self, target: f32, delta: f32) {
    let t = (self.settings.height_smoothing * delta).clamp(0.0, 1.0);
    let height = self.state.camera_height + (target - self.state.camera_height) * t;
    self.state.camera_height = self.bound_height(height);
  }

  /// Bounds the eye height to `[slide_camera_height, normal_camera_height]`.
  fn bound_height(&self, height: f32) -> f32 {
    height
      .max(self.settings.slide_camera_height)
      .min(self.settings.normal_camera_height)
  }
}

/// `1 - rate * delta`, floored at zero so a long frame stops motion instead of
/// reversing it.
fn decay_factor(rate: f32, delta: f32) -> f32 {
  (1.0 - rate * delta).max(0.0)
}

/// Clamps the floor-plane coordinates of `position` to the room interior.
pub fn clamp_to_room(position: Vec3, half_extent: f32) -> Vec3 {
  let half_extent = half_extent.abs();
  Vec3::new(
    position.x.max(-half_extent).min(half_extent),
    position.y,
    position.z.max(-half_extent).min(half_extent),
  )
}

/// World-space floor offset for a camera with the given yaw.
///
/// At yaw 0 the camera looks down -Z and strafes along +X.
pub fn planar_offset(yaw: f32, displacement: &Displacement) -> Vec3 {
  let (sin, cos) = yaw.sin_cos();
  let forward = Vec3::new(-sin, 0.0, -cos);
  let right = Vec3::new(cos, 0.0, -sin);
  forward * displacement.forward + right * displacement.right
}
