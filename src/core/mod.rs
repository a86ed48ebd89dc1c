pub mod pointer_lock;

use bevy::prelude::*;
pub use pointer_lock::PointerLock;

/// Per-frame ordering: input is sampled, the camera turns, the controller
/// moves the player, then zones react to the new position.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
  Input,
  Look,
  Locomotion,
  Proximity,
  Presentation,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .configure_sets(
        Update,
        (
          FrameSet::Input,
          FrameSet::Look,
          FrameSet::Locomotion,
          FrameSet::Proximity,
          FrameSet::Presentation,
        )
          .chain(),
      )
      .add_plugins(pointer_lock::PointerLockPlugin);
  }
}
