use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::config::ConfigLoaded;
use crate::player::components::{LookAngles, Player};
use crate::player::locomotion::LocomotionController;
use crate::zones::ZoneRegistry;

/// F3 overlay: locomotion readout plus zone and room gizmos.
#[derive(Resource, Default)]
pub struct DebugOverlay {
  pub enabled: bool,
}

/// Resource for frame-by-frame debug mode
#[derive(Resource, Default)]
pub struct FrameStepMode {
  pub enabled: bool,
  advance_requested: bool,
}

pub struct VisualDebugPlugin;

impl Plugin for VisualDebugPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
      app.add_plugins(EguiPlugin::default());
    }
    app
      .init_resource::<DebugOverlay>()
      .init_resource::<FrameStepMode>()
      .add_systems(PreUpdate, (toggle_overlay, frame_step_control))
      .add_systems(
        Update,
        draw_debug_gizmos.run_if(|overlay: Res<DebugOverlay>| overlay.enabled),
      )
      .add_systems(
        EguiPrimaryContextPass,
        render_locomotion_panel.run_if(|overlay: Res<DebugOverlay>| overlay.enabled),
      );
  }
}

fn toggle_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
  if keyboard.just_pressed(KeyCode::F3) {
    overlay.enabled = !overlay.enabled;
    info!(
      "Debug overlay {}",
      if overlay.enabled { "ENABLED" } else { "DISABLED" }
    );
  }
}

/// Controls frame-by-frame stepping mode
/// F5: Toggle frame-step mode
/// F6: Advance one frame (when in frame-step mode)
fn frame_step_control(
  keyboard: Res<ButtonInput<KeyCode>>,
  mut frame_step: ResMut<FrameStepMode>,
  mut time: ResMut<Time<Virtual>>,
) {
  if keyboard.just_pressed(KeyCode::F5) {
    frame_step.enabled = !frame_step.enabled;
    if frame_step.enabled {
      time.pause();
      info!("Frame-step mode ENABLED (press F6 to advance, F5 to disable)");
    } else {
      time.unpause();
      info!("Frame-step mode DISABLED");
    }
  }

  if frame_step.enabled {
    if keyboard.just_pressed(KeyCode::F6) {
      // Request advance - unpause for this frame
      frame_step.advance_requested = true;
      time.unpause();
    } else if frame_step.advance_requested {
      frame_step.advance_requested = false;
      time.pause();
    }
  }
}

/// Proximity spheres (highlighted when active) and the walkable bounds.
fn draw_debug_gizmos(
  mut gizmos: Gizmos,
  registry: Option<Res<ZoneRegistry>>,
  config: Res<ConfigLoaded>,
) {
  let half = config.room.half_extent;
  gizmos.rect(
    Isometry3d::new(Vec3::new(0.0, 0.01, 0.0), Quat::from_rotation_x(FRAC_PI_2)),
    Vec2::splat(half * 2.0),
    Color::srgb(1.0, 0.3, 0.3),
  );

  let Some(registry) = registry else {
    return;
  };
  for (index, zone) in registry.zones.iter().enumerate() {
    let color = if registry.tracker.active() == Some(index) {
      Color::srgb(0.3, 1.0, 0.3)
    } else {
      Color::srgb(1.0, 1.0, 0.3)
    };
    gizmos.sphere(
      Isometry3d::from_translation(zone.position),
      registry.tracker.radius(),
      color,
    );
  }
}

fn render_locomotion_panel(
  mut contexts: EguiContexts,
  players: Query<(&Transform, &LocomotionController, &LookAngles), With<Player>>,
  registry: Option<Res<ZoneRegistry>>,
) {
  let Ok(ctx) = contexts.ctx_mut() else {
    return;
  };
  let Ok((transform, controller, look)) = players.single() else {
    return;
  };
  let state = controller.state();
  let active_zone = registry
    .as_ref()
    .and_then(|registry| registry.active_zone())
    .map_or("-".to_string(), |zone| zone.label.clone());

  egui::Window::new("Locomotion")
    .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
    .default_width(220.0)
    .title_bar(false)
    .resizable(false)
    .movable(false)
    .frame(egui::Frame::NONE.fill(egui::Color32::from_rgba_unmultiplied(20, 20, 25, 200)))
    .show(ctx, |ui| {
      let rows = [
        ("mode", format!("{:?}", controller.mode())),
        ("position", format!("{:.2?}", transform.translation)),
        ("yaw / pitch", format!("{:.2} / {:.2}", look.yaw, look.pitch)),
        ("velocity", format!("{:.2?}", state.planar_velocity)),
        ("vertical", format!("{:.2}", state.vertical_velocity)),
        ("elevation", format!("{:.2}", state.elevation)),
        ("momentum", format!("{:.2}", state.slide_momentum)),
        ("eye height", format!("{:.2}", state.camera_height)),
        ("double jump", format!("{}", state.double_jump_available)),
        ("zone", active_zone),
      ];
      for (name, value) in rows {
        ui.label(
          egui::RichText::new(format!("{name:<12}{value}"))
            .color(egui::Color32::from_rgb(255, 255, 180))
            .monospace()
            .size(11.0),
        );
      }
    });
}
