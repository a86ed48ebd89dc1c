pub mod components;
pub mod locomotion;
pub mod look;
pub mod movement;
mod spawn;


use bevy::prelude::*;

use crate::core::{FrameSet, PointerLock};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    // Sampling needs the pointer; the controller steps every frame.
    app
      .add_systems(Startup, spawn::spawn_player)
      .add_systems(OnExit(PointerLock::Locked), movement::release_move_input)
      .add_systems(
        Update,
        (
          movement::gather_move_input.in_set(FrameSet::Input),
          look::mouse_look.in_set(FrameSet::Look),
        )
          .run_if(in_state(PointerLock::Locked)),
      )
      .add_systems(
        Update,
        movement::apply_locomotion.in_set(FrameSet::Locomotion),
      );
  }
}
