//! E2E test for the per-frame loop: input -> locomotion -> room clamp -> zones.
//!
//! Runs the real systems headless with a fixed frame time.
//!
//! Run: cargo test --test frame_loop_e2e

use std::time::Duration;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use portfolio_room::config::{ConfigLoaded, GameConfig};
use portfolio_room::core::PointerLock;
use portfolio_room::player::components::{LookAngles, Player};
use portfolio_room::player::locomotion::{LocomotionController, LocomotionMode, MoveInput};
use portfolio_room::player::movement::{apply_locomotion, release_move_input};
use portfolio_room::zones::{
  ZoneChanged, ZoneRegistry, ZoneVisual, reload_zones_on_config_change, track_zone_proximity,
};

#[derive(Resource, Default)]
struct SeenChanges(Vec<ZoneChanged>);

fn collect_changes(mut changes: MessageReader<ZoneChanged>, mut seen: ResMut<SeenChanges>) {
  seen.0.extend(changes.read().cloned());
}

fn test_app() -> (App, Entity) {
  let config = GameConfig::default();
  let spawn = Vec3::from_array(config.camera.spawn);

  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
    .insert_resource(ZoneRegistry::from_config(&config.zones))
    .insert_resource(ConfigLoaded::from(config.clone()))
    .init_resource::<SeenChanges>()
    .add_message::<ZoneChanged>()
    .add_systems(
      Update,
      (apply_locomotion, track_zone_proximity, collect_changes).chain(),
    );

  let player = app
    .world_mut()
    .spawn((
      Player,
      Transform::from_translation(spawn),
      LocomotionController::new(config.locomotion.settings()),
      LookAngles::default(),
      MoveInput::default(),
    ))
    .id();

  // Let the clock start ticking.
  app.update();
  (app, player)
}

fn teleport(app: &mut App, player: Entity, x: f32, z: f32) {
  let mut transform = app.world_mut().get_mut::<Transform>(player).unwrap();
  transform.translation.x = x;
  transform.translation.z = z;
}

fn set_input(app: &mut App, player: Entity, input: MoveInput) {
  *app.world_mut().get_mut::<MoveInput>(player).unwrap() = input;
}

fn position(app: &App, player: Entity) -> Vec3 {
  app.world().get::<Transform>(player).unwrap().translation
}

#[test]
fn player_is_clamped_to_the_room() {
  let (mut app, player) = test_app();

  teleport(&mut app, player, 40.0, -40.0);
  app.update();
  let pos = position(&app, player);
  assert_eq!(pos.x, 14.0);
  assert_eq!(pos.z, -14.0);

  // Walking into the wall does not push through it.
  set_input(
    &mut app,
    player,
    MoveInput {
      right: true,
      backward: true,
      ..default()
    },
  );
  for _ in 0..120 {
    app.update();
    let pos = position(&app, player);
    assert!(pos.x.abs() <= 14.0 && pos.z.abs() <= 14.0, "escaped at {pos:?}");
  }
}

#[test]
fn walking_forward_moves_along_look_direction() {
  let (mut app, player) = test_app();
  let start = position(&app, player);

  set_input(
    &mut app,
    player,
    MoveInput {
      forward: true,
      ..default()
    },
  );
  for _ in 0..60 {
    app.update();
  }

  let end = position(&app, player);
  assert!(end.z < start.z, "expected to move toward -Z: {start:?} -> {end:?}");
  assert!((end.x - start.x).abs() < 1e-4);
  assert!((end.y - 1.7).abs() < 1e-4);
}

#[test]
fn jump_lifts_camera_and_lands() {
  let (mut app, player) = test_app();

  set_input(
    &mut app,
    player,
    MoveInput {
      jump_pressed: true,
      ..default()
    },
  );
  app.update();
  set_input(&mut app, player, MoveInput::default());

  assert!(position(&app, player).y > 1.7);
  let mode = app.world().get::<LocomotionController>(player).unwrap().mode();
  assert_eq!(mode, LocomotionMode::Airborne);

  for _ in 0..120 {
    app.update();
  }
  let controller = app.world().get::<LocomotionController>(player).unwrap();
  assert!(controller.state().grounded);
  assert!((position(&app, player).y - 1.7).abs() < 1e-5);
}

#[test]
fn walking_between_zones_updates_label_events() {
  let (mut app, player) = test_app();
  assert!(app.world().resource::<SeenChanges>().0.is_empty());

  teleport(&mut app, player, -8.0, -8.0);
  app.update();
  teleport(&mut app, player, 0.0, 0.0);
  app.update();
  teleport(&mut app, player, 8.0, -8.0);
  app.update();
  // Standing still produces nothing new.
  app.update();

  let seen = &app.world().resource::<SeenChanges>().0;
  assert_eq!(seen.len(), 3, "unexpected events: {seen:?}");
  assert!(matches!(
    &seen[0],
    ZoneChanged::Entered { index: 0, caption } if caption.ends_with("Retro Game Corner")
  ));
  assert_eq!(seen[1], ZoneChanged::Left);
  assert!(matches!(
    &seen[2],
    ZoneChanged::Entered { index: 1, caption } if caption.ends_with("CV & Experience")
  ));

  let registry = app.world().resource::<ZoneRegistry>();
  assert_eq!(registry.active_zone().map(|z| z.label.as_str()), Some("MY CV"));
}

#[test]
fn releasing_pointer_mid_jump_still_lands() {
  let (mut app, player) = test_app();
  app
    .add_plugins(StatesPlugin)
    .insert_state(PointerLock::Locked)
    .add_systems(OnExit(PointerLock::Locked), release_move_input);
  app.update();

  set_input(
    &mut app,
    player,
    MoveInput {
      forward: true,
      jump_pressed: true,
      ..default()
    },
  );
  app.update();
  assert!(position(&app, player).y > 1.7);

  // Released with keys still held down.
  app
    .world_mut()
    .resource_mut::<NextState<PointerLock>>()
    .set(PointerLock::Unlocked);
  for _ in 0..240 {
    app.update();
  }

  assert_eq!(
    *app.world().get::<MoveInput>(player).unwrap(),
    MoveInput::default()
  );
  let controller = app.world().get::<LocomotionController>(player).unwrap();
  assert!(controller.state().grounded);
  assert!(controller.state().planar_velocity.length() < 1e-3);
  assert!((position(&app, player).y - 1.7).abs() < 1e-5);
}

fn zone_visual_count(app: &mut App) -> usize {
  let world = app.world_mut();
  world
    .query_filtered::<(), With<ZoneVisual>>()
    .iter(world)
    .count()
}

#[test]
fn config_reload_respawns_zone_visuals() {
  let (mut app, player) = test_app();
  app
    .init_resource::<Assets<Mesh>>()
    .init_resource::<Assets<StandardMaterial>>()
    .add_systems(Update, reload_zones_on_config_change.before(track_zone_proximity));

  teleport(&mut app, player, 8.0, -8.0);
  app.update();
  assert_eq!(zone_visual_count(&mut app), 0);

  // Drop the CV corner the player is standing in.
  app
    .world_mut()
    .resource_mut::<ConfigLoaded>()
    .zones
    .entries
    .truncate(1);
  app.update();

  assert_eq!(zone_visual_count(&mut app), 1);
  let registry = app.world().resource::<ZoneRegistry>();
  assert_eq!(registry.zones.len(), 1);
  assert_eq!(registry.active_zone(), None);

  // Another edit replaces the visuals instead of adding to them.
  app
    .world_mut()
    .resource_mut::<ConfigLoaded>()
    .zones
    .proximity_radius = 4.0;
  app.update();
  assert_eq!(zone_visual_count(&mut app), 1);

  let seen = &app.world().resource::<SeenChanges>().0;
  assert_eq!(seen.last(), Some(&ZoneChanged::Left));
}
