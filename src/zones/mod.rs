mod label;
pub mod proximity;
mod visuals;

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;
pub use label::{ZoneLabelRoot, ZoneLabelText};
use proximity::{ZoneDescriptor, ZoneEvent, ZoneTracker};
pub use visuals::{ZoneDisplay, ZoneLight, ZoneVisual};

use crate::config::{ConfigLoaded, ZonesConfig};
use crate::core::FrameSet;
use crate::player::components::Player;

/// The room's zones in iteration order, plus the proximity state.
#[derive(Resource, Debug, Clone)]
pub struct ZoneRegistry {
  pub zones: Vec<ZoneDescriptor>,
  pub tracker: ZoneTracker,
}

impl ZoneRegistry {
  pub fn from_config(config: &ZonesConfig) -> Self {
    Self {
      zones: config.descriptors(),
      tracker: ZoneTracker::new(config.proximity_radius, config.tie_break),
    }
  }

  fn same_layout(&self, other: &ZoneRegistry) -> bool {
    self.zones == other.zones
      && self.tracker.radius() == other.tracker.radius()
      && self.tracker.tie_break() == other.tracker.tie_break()
  }

  pub fn active_zone(&self) -> Option<&ZoneDescriptor> {
    self.tracker.active().and_then(|index| self.zones.get(index))
  }
}

/// Sent when the player walks into or out of a zone.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum ZoneChanged {
  Entered { index: usize, caption: String },
  Left,
}

pub struct ZonesPlugin;

impl Plugin for ZonesPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_message::<ZoneChanged>()
      .add_systems(
        Startup,
        (
          init_zone_registry,
          visuals::spawn_zone_visuals,
          label::spawn_zone_label,
        )
          .chain(),
      )
      .add_systems(
        Update,
        (
          reload_zones_on_config_change.before(FrameSet::Proximity),
          track_zone_proximity.in_set(FrameSet::Proximity),
          label::update_zone_label.in_set(FrameSet::Presentation),
          (
            visuals::animate_zone_displays,
            visuals::pulse_zone_lights,
            visuals::draw_zone_edges,
          )
            .in_set(FrameSet::Presentation),
        ),
      );
  }
}

fn init_zone_registry(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.insert_resource(ZoneRegistry::from_config(&config.zones));
}

/// Feeds the player position to the tracker and reports transitions.
pub fn track_zone_proximity(
  players: Query<&Transform, With<Player>>,
  mut registry: ResMut<ZoneRegistry>,
  mut changes: MessageWriter<ZoneChanged>,
) {
  let Ok(transform) = players.single() else {
    return;
  };

  let ZoneRegistry { zones, tracker } = &mut *registry;
  match tracker.update(transform.translation, zones) {
    Some(ZoneEvent::Enter(index)) => {
      let zone = &zones[index];
      info!("Entered zone {} ({})", zone.name, zone.label);
      changes.write(ZoneChanged::Entered {
        index,
        caption: zone.caption(),
      });
    }
    Some(ZoneEvent::Leave) => {
      info!("Left zone");
      changes.write(ZoneChanged::Left);
    }
    None => {}
  }
}

/// Rebuilds zones after a config hot-reload. The active zone is dropped, so
/// the tracker re-enters whatever zone the player is standing in.
pub fn reload_zones_on_config_change(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  registry: Option<Res<ZoneRegistry>>,
  visuals: Query<Entity, With<ZoneVisual>>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
  mut changes: MessageWriter<ZoneChanged>,
) {
  if !config.is_changed() || config.is_added() {
    return;
  }

  let rebuilt = ZoneRegistry::from_config(&config.zones);
  let was_active = match registry {
    Some(old) if old.same_layout(&rebuilt) => return,
    Some(old) => old.tracker.active().is_some(),
    None => false,
  };

  if rebuilt.zones.is_empty() {
    warn!("Config has no zones");
  }
  info!("Rebuilding {} zones", rebuilt.zones.len());

  for entity in &visuals {
    commands.entity(entity).despawn();
  }
  for (index, zone) in rebuilt.zones.iter().enumerate() {
    visuals::spawn_zone(&mut commands, &mut meshes, &mut materials, index, zone);
  }
  if was_active {
    changes.write(ZoneChanged::Left);
  }
  commands.insert_resource(rebuilt);
}
