use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

#[derive(Component)]
pub struct PlayerInput;

/// Planar movement as `(strafe, forward)`.
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct Move;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Slide;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Jump;
