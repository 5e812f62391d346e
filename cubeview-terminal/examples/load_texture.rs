/// Example: Render the scene with a texture of your choice
/// 
/// Usage: cargo run --example load_texture -- path/to/texture.png

use std::env;
use std::path::Path;

use cubeview_core::{SceneConfig, SceneError};
use cubeview_terminal::TerminalApp;

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <texture-file>", args[0]);
        eprintln!("\nNo texture provided, using the default scene...");
        let mut app = TerminalApp::new(SceneConfig::default(), "resources")?;
        return app.run();
    }

    let path = Path::new(&args[1]);
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!("Loading texture: {}", path.display());

    let mut app = TerminalApp::new(SceneConfig::default().with_texture(name), root)?;

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    app.run()?;

    println!("Thank you for using CubeView!");
    Ok(())
}
