use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::ZoneChanged;

/// Centered HUD banner, hidden while no zone is active.
#[derive(Component)]
pub struct ZoneLabelRoot;

#[derive(Component)]
pub struct ZoneLabelText;

pub fn spawn_zone_label(mut commands: Commands) {
  commands.spawn((
    ZoneLabelRoot,
    Node {
      position_type: PositionType::Absolute,
      bottom: Val::Px(48.0),
      width: Val::Percent(100.0),
      justify_content: JustifyContent::Center,
      ..default()
    },
    Visibility::Hidden,
    children![(
      Node {
        padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
        ..default()
      },
      BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
      children![(
        ZoneLabelText,
        Text::new(""),
        TextFont {
          font_size: 24.0,
          ..default()
        },
        TextColor(Color::WHITE),
      )],
    )],
  ));
}

pub fn update_zone_label(
  mut changes: MessageReader<ZoneChanged>,
  mut roots: Query<&mut Visibility, With<ZoneLabelRoot>>,
  mut texts: Query<&mut Text, With<ZoneLabelText>>,
) {
  let Some(change) = changes.read().last() else {
    return;
  };

  match change {
    ZoneChanged::Entered { caption, .. } => {
      for mut text in &mut texts {
        text.0.clone_from(caption);
      }
      for mut visibility in &mut roots {
        *visibility = Visibility::Visible;
      }
    }
    ZoneChanged::Left => {
      for mut visibility in &mut roots {
        *visibility = Visibility::Hidden;
      }
    }
  }
}
