/// CubeView Terminal Demo - Transform Pipeline
/// 
/// Draws the cube wireframe at each stage of the scale, rotate and
/// translate pipeline, with the transformed model shaded underneath.
/// Controls:
///   - WASD / Arrow Keys: Orbit the debug camera
///   - +/-: Zoom
///   - Q/ESC: Quit

use cubeview_core::{SceneConfig, SceneError};
use cubeview_terminal::TerminalApp;

fn main() -> Result<(), SceneError> {
    env_logger::init();

    println!("CubeView Terminal Renderer - Loading...");

    let config = SceneConfig::default();
    log::info!("texture '{}' resolved under ./resources", config.texture_name);

    let mut app = TerminalApp::new(config, "resources")?;

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    app.run()?;

    println!("Thank you for using CubeView!");
    Ok(())
}
