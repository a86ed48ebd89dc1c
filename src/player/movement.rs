use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::components::{JumpLatch, LookAngles, Player};
use super::locomotion::{LocomotionController, MoveInput, clamp_to_room, planar_offset};
use crate::config::ConfigLoaded;
use crate::input::{Jump, Move, PlayerInput, Slide};

fn is_active(state: &ActionState) -> bool {
  matches!(state, ActionState::Fired | ActionState::Ongoing)
}

/// Samples the player's actions into a [`MoveInput`] snapshot.
pub fn gather_move_input(
  mut players: Query<(&Actions<PlayerInput>, &mut MoveInput, &mut JumpLatch), With<Player>>,
  move_actions: Query<(&Action<Move>, &ActionState)>,
  slide_actions: Query<&ActionState, With<Action<Slide>>>,
  jump_actions: Query<&ActionState, With<Action<Jump>>>,
) {
  for (actions, mut input, mut latch) in &mut players {
    let mut direction = Vec2::ZERO;
    let mut slide_held = false;
    let mut jump_held = false;

    for action_entity in actions.iter() {
      if let Ok((action, action_state)) = move_actions.get(action_entity) {
        if is_active(action_state) {
          direction = **action;
        }
      }
      if let Ok(action_state) = slide_actions.get(action_entity) {
        slide_held |= is_active(action_state);
      }
      if let Ok(action_state) = jump_actions.get(action_entity) {
        jump_held |= is_active(action_state);
      }
    }

    *input = MoveInput {
      forward: direction.y > 0.0,
      backward: direction.y < 0.0,
      left: direction.x < 0.0,
      right: direction.x > 0.0,
      slide_held,
      jump_pressed: jump_held && !latch.0,
    };
    latch.0 = jump_held;
  }
}

/// Drops held keys when the pointer is released so the controller coasts to
/// a stop.
pub fn release_move_input(
  mut players: Query<(&mut MoveInput, Option<&mut JumpLatch>), With<Player>>,
) {
  for (mut input, latch) in &mut players {
    *input = MoveInput::default();
    if let Some(mut latch) = latch {
      latch.0 = false;
    }
  }
}

/// Advances each player's controller and applies the result to its camera
/// transform, keeping it inside the room.
pub fn apply_locomotion(
  mut players: Query<
    (
      &mut Transform,
      &mut LocomotionController,
      &MoveInput,
      &LookAngles,
    ),
    With<Player>,
  >,
  config: Res<ConfigLoaded>,
  time: Res<Time>,
) {
  let delta = time.delta_secs().min(config.locomotion.max_frame_delta).max(0.0);

  for (mut transform, mut controller, input, look) in &mut players {
    let previous_mode = controller.mode();
    let displacement = controller.update(*input, delta);
    let mode = controller.mode();
    if mode != previous_mode {
      debug!("Locomotion: {:?} -> {:?}", previous_mode, mode);
    }

    let moved = transform.translation + planar_offset(look.yaw, &displacement);
    let mut position = clamp_to_room(moved, config.room.half_extent);
    position.y = displacement.camera_height;
    transform.translation = position;

    trace!(
      "Locomotion: pos={:.2?}, vel={:.2?}, momentum={:.2}",
      position,
      controller.state().planar_velocity,
      controller.state().slide_momentum
    );
  }
}
