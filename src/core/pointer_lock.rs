//! Mouse capture for first-person look.
//!
//! The cursor starts free with a "click to explore" overlay. A left click
//! captures it; Escape or losing window focus releases it again.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused};

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerLock {
  #[default]
  Unlocked,
  Locked,
}

/// Marker for the overlay shown while the pointer is free.
#[derive(Component)]
pub struct Blocker;

const INSTRUCTIONS: &str = "Click to explore\n\n\
  WASD / Arrows: move\n\
  Mouse: look around\n\
  Space: jump (press again mid-air to double jump)\n\
  C / Ctrl: slide\n\
  Esc: release mouse";

pub struct PointerLockPlugin;

impl Plugin for PointerLockPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_state::<PointerLock>()
      .add_systems(OnEnter(PointerLock::Locked), grab_cursor)
      .add_systems(OnEnter(PointerLock::Unlocked), (release_cursor, spawn_blocker))
      .add_systems(OnExit(PointerLock::Unlocked), despawn_blocker)
      .add_systems(
        PreUpdate,
        (
          request_lock.run_if(in_state(PointerLock::Unlocked)),
          request_unlock.run_if(in_state(PointerLock::Locked)),
        ),
      );
  }
}

fn request_lock(mouse: Res<ButtonInput<MouseButton>>, mut next: ResMut<NextState<PointerLock>>) {
  if mouse.just_pressed(MouseButton::Left) {
    next.set(PointerLock::Locked);
  }
}

fn request_unlock(
  keys: Res<ButtonInput<KeyCode>>,
  mut focus: MessageReader<WindowFocused>,
  mut next: ResMut<NextState<PointerLock>>,
) {
  let focus_lost = focus.read().any(|event| !event.focused);
  if keys.just_pressed(KeyCode::Escape) || focus_lost {
    next.set(PointerLock::Unlocked);
  }
}

fn grab_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
  let Ok(mut cursor) = cursors.single_mut() else {
    return;
  };
  cursor.grab_mode = CursorGrabMode::Locked;
  cursor.visible = false;
  info!("Pointer locked");
}

fn release_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
  let Ok(mut cursor) = cursors.single_mut() else {
    return;
  };
  cursor.grab_mode = CursorGrabMode::None;
  cursor.visible = true;
  info!("Pointer released");
}

fn spawn_blocker(mut commands: Commands) {
  commands.spawn((
    Blocker,
    Node {
      position_type: PositionType::Absolute,
      width: Val::Percent(100.0),
      height: Val::Percent(100.0),
      justify_content: JustifyContent::Center,
      align_items: AlignItems::Center,
      ..default()
    },
    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
    children![(
      Text::new(INSTRUCTIONS),
      TextFont {
        font_size: 22.0,
        ..default()
      },
      TextColor(Color::WHITE),
    )],
  ));
}

fn despawn_blocker(mut commands: Commands, blockers: Query<Entity, With<Blocker>>) {
  for entity in &blockers {
    commands.entity(entity).despawn();
  }
}
