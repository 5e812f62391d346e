/// Terminal front end for the transform-pipeline scene
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use cubeview_core::{
    CameraInput, DebugTextRenderer, LineRenderer, ModelRenderer, Scene, SceneConfig, SceneError,
    TextureHandle,
};
use nalgebra::{Matrix4, Point3};
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod mesh;
pub mod renderer;
pub mod textures;

pub use mesh::{Mesh, ModelMesh};
pub use renderer::AsciiRenderer;
pub use textures::TextureRegistry;

const ORBIT_STEP: f32 = 0.1;
const ZOOM_STEP: f32 = 0.9;

/// Rows above the debug text: the status line
const OVERLAY_ROW: u16 = 1;

/// One frame's view of the renderer and the resources it draws with
pub struct Frame<'a> {
    pub renderer: &'a mut AsciiRenderer,
    pub model: &'a ModelMesh,
    pub textures: &'a TextureRegistry,
}

impl LineRenderer for Frame<'_> {
    fn draw_line_3d(&mut self, start: &Point3<f32>, end: &Point3<f32>, color: cubeview_core::Color) {
        self.renderer
            .draw_line(start, end, renderer::terminal_color(color));
    }
}

impl ModelRenderer for Frame<'_> {
    fn draw_model(
        &mut self,
        world: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        texture: TextureHandle,
    ) {
        let tint = renderer::terminal_color(self.textures.tint(texture));
        let triangles = self.model.triangles(world);
        self.renderer
            .draw_triangles(&triangles, view_projection, tint);
    }
}

impl DebugTextRenderer for Frame<'_> {
    fn draw_text(&mut self, line: usize, text: &str) {
        self.renderer.push_text(line, text);
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    model: ModelMesh,
    textures: TextureRegistry,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Build the scene for the current terminal size, resolving textures
    /// under `texture_root`
    pub fn new(config: SceneConfig, texture_root: impl Into<PathBuf>) -> Result<Self, SceneError> {
        let (width, height) = terminal::size()?;
        let config = config.with_viewport(width as u32, height as u32);

        let mut textures = TextureRegistry::new(texture_root);
        let mut model = ModelMesh::new(Mesh::cube(2.0));
        let scene = Scene::initialize(config, &mut textures, &mut model)?;

        Ok(Self {
            scene,
            model,
            textures,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<(), SceneError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<(), SceneError> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> Result<(), SceneError> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => {
                if let Some(input) = camera_input(code) {
                    self.scene.update(&input);
                } else if toggles_projection(code) {
                    self.scene.camera_mut().toggle_mode();
                } else if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.running = false;
                }
            }
            Event::Resize(width, height) => {
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.scene
                    .camera_mut()
                    .set_aspect(width as u32, height as u32);
                log::debug!("terminal resized to {}x{}", width, height);
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), SceneError> {
        self.renderer.clear();
        self.renderer
            .set_view_projection(self.scene.camera().view_projection());

        let mut frame = Frame {
            renderer: &mut self.renderer,
            model: &self.model,
            textures: &self.textures,
        };
        self.scene.draw(&mut frame);

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, OVERLAY_ROW)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "CubeView | FPS: {:.1} | white=original red=scale green=rotate blue=translate | WASD/Arrows=Orbit +/-=Zoom P=Projection Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Camera movement bound to `code`, if any
pub fn camera_input(code: KeyCode) -> Option<CameraInput> {
    let input = match code {
        KeyCode::Char('w') | KeyCode::Up => CameraInput::orbit(0.0, ORBIT_STEP),
        KeyCode::Char('s') | KeyCode::Down => CameraInput::orbit(0.0, -ORBIT_STEP),
        KeyCode::Char('a') | KeyCode::Left => CameraInput::orbit(-ORBIT_STEP, 0.0),
        KeyCode::Char('d') | KeyCode::Right => CameraInput::orbit(ORBIT_STEP, 0.0),
        KeyCode::Char('+') | KeyCode::Char('=') => CameraInput::zoom(ZOOM_STEP),
        KeyCode::Char('-') => CameraInput::zoom(1.0 / ZOOM_STEP),
        _ => return None,
    };
    Some(input)
}

/// Whether `code` switches the camera between perspective and orthographic
pub fn toggles_projection(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('p') | KeyCode::Char('P'))
}
