use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Jump, Move, PlayerInput, Slide};

pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Move>::new(),
          Bindings::spawn((
              Cardinal::wasd_keys(),
              Cardinal::arrows(),
          )),
      ),
      (
          Action::<Slide>::new(),
          bindings![KeyCode::KeyC, KeyCode::ControlLeft],
      ),
      (
          Action::<Jump>::new(),
          bindings![KeyCode::Space],
      ),
  ])
}
