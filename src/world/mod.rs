mod room;

use bevy::prelude::*;

/// Ambient fill attached to the player camera.
pub const AMBIENT_BRIGHTNESS: f32 = 250.0;

/// Near-black backdrop shared by the clear color and the fog.
pub const BACKGROUND_COLOR: Color = Color::srgb(0.102, 0.102, 0.102);

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(ClearColor(BACKGROUND_COLOR))
      .add_systems(Startup, (room::spawn_room, room::spawn_lighting));
  }
}
