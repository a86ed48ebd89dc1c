//! A walkable first-person room with proximity-highlighted zones.
//!
//! The locomotion controller ([`player::locomotion`]) and the zone tracker
//! ([`zones::proximity`]) are plain state machines; everything else wires them
//! into a Bevy app.

pub mod config;
pub mod core;
pub mod input;
pub mod player;
pub mod visual_debug;
pub mod world;
pub mod zones;

use bevy::prelude::*;

/// Everything except the engine's `DefaultPlugins`.
pub struct PortfolioRoomPlugin;

impl Plugin for PortfolioRoomPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(config::ConfigPlugin)
      .add_plugins(core::CorePlugin)
      .add_plugins(input::InputPlugin)
      .add_plugins(world::WorldPlugin)
      .add_plugins(player::PlayerPlugin)
      .add_plugins(zones::ZonesPlugin)
      .add_plugins(visual_debug::VisualDebugPlugin);
  }
}
