use bevy::{
  log::LogPlugin,
  prelude::*,
  window::{PresentMode, WindowResolution},
};
use portfolio_room::PortfolioRoomPlugin;
use portfolio_room::config::GameConfig;

fn main() {
  // WASM: set up panic hook for better error messages
  #[cfg(target_family = "wasm")]
  console_error_panic_hook::set_once();

  // The window is built before logging starts; ConfigPlugin reloads the file
  // and reports any error once the app is running.
  #[cfg(target_family = "wasm")]
  let config = GameConfig::parse(portfolio_room::config::EMBEDDED_CONFIG).unwrap_or_default();
  #[cfg(not(target_family = "wasm"))]
  let config = GameConfig::from_file(portfolio_room::config::CONFIG_PATH).unwrap_or_default();

  App::new()
    .add_plugins(
      DefaultPlugins
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            present_mode: PresentMode::AutoVsync,
            // WASM: target canvas element
            #[cfg(target_family = "wasm")]
            canvas: Some("#bevy".to_string()),
            #[cfg(target_family = "wasm")]
            fit_canvas_to_parent: true,
            ..default()
          }),
          ..default()
        })
        .set(LogPlugin {
          filter: "wgpu=error,naga=warn,portfolio_room=debug".to_string(),
          ..default()
        }),
    )
    .add_plugins(PortfolioRoomPlugin)
    .run();
}
