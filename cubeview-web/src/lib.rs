/// CubeView Web - WASM bindings for the transform-pipeline scene
///
/// The browser side owns the canvas and the GPU; this module hands it the
/// world matrix and flat line buffers for the four wireframes.

use cubeview_core::{
    Color, MatrixTransfer, Scene, SceneConfig, SceneError, Stage, TextureHandle, TextureLoader,
};
use nalgebra::Matrix4;
use wasm_bindgen::prelude::*;

/// Hands out handles by name; the page fetches the image itself
#[derive(Default)]
struct NamedTextures {
    names: Vec<String>,
}

impl TextureLoader for NamedTextures {
    fn load(&mut self, name: &str) -> Result<TextureHandle, SceneError> {
        if name.is_empty() {
            return Err(SceneError::TextureLoad {
                name: name.to_string(),
                reason: "empty texture name".to_string(),
            });
        }
        self.names.push(name.to_string());
        Ok(TextureHandle((self.names.len() - 1) as u32))
    }
}

/// Keeps the last transferred world matrix for upload by the page
#[derive(Default)]
struct UniformSlot {
    world: Option<Matrix4<f32>>,
}

impl MatrixTransfer for UniformSlot {
    fn transfer_world_matrix(&mut self, world: &Matrix4<f32>) {
        self.world = Some(*world);
    }
}

#[wasm_bindgen]
pub struct WebScene {
    scene: Scene,
    textures: NamedTextures,
    uniforms: UniformSlot,
}

#[wasm_bindgen]
impl WebScene {
    #[wasm_bindgen(constructor)]
    pub fn new(texture_name: &str) -> Result<WebScene, JsValue> {
        let mut textures = NamedTextures::default();
        let mut uniforms = UniformSlot::default();
        let config = SceneConfig::default().with_texture(texture_name);
        let scene = Scene::initialize(config, &mut textures, &mut uniforms)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WebScene {
            scene,
            textures,
            uniforms,
        })
    }

    /// World matrix as 16 floats, row by row
    pub fn world_matrix(&self) -> Vec<f32> {
        let world = self.uniforms.world.unwrap_or(*self.scene.world_matrix());
        row_major(&world)
    }

    /// Endpoints of every line, xyz per vertex, in draw order: each edge
    /// at the original, scaled, rotated and translated stage in turn
    pub fn line_positions(&self) -> Vec<f32> {
        let stages = self.scene.stages();
        let mut positions = Vec::new();
        for &[a, b] in self.scene.wireframe().edges() {
            for stage in Stage::ALL {
                let vertices = stages.get(stage);
                positions.extend_from_slice(vertices[a].coords.as_slice());
                positions.extend_from_slice(vertices[b].coords.as_slice());
            }
        }
        positions
    }

    /// RGBA per line vertex, aligned with [`line_positions`](Self::line_positions)
    pub fn line_colors(&self) -> Vec<f32> {
        let layers = self.scene.layers();
        let mut colors = Vec::new();
        for _ in self.scene.wireframe().edges() {
            for layer in &layers {
                push_color(&mut colors, layer.color);
                push_color(&mut colors, layer.color);
            }
        }
        colors
    }

    pub fn texture_name(&self) -> String {
        let handle = self.scene.texture();
        self.textures
            .names
            .get(handle.0 as usize)
            .cloned()
            .unwrap_or_default()
    }

    /// Orbit the debug camera by the given angles in radians
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        self.scene
            .update(&cubeview_core::CameraInput::orbit(yaw, pitch));
    }

    /// View-projection matrix as 16 floats, column by column (WebGL order)
    pub fn view_projection(&self) -> Vec<f32> {
        self.scene.camera().view_projection().as_slice().to_vec()
    }
}

fn row_major(matrix: &Matrix4<f32>) -> Vec<f32> {
    matrix.transpose().as_slice().to_vec()
}

fn push_color(out: &mut Vec<f32>, color: Color) {
    out.extend_from_slice(&color.to_array());
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    log::debug!("cubeview-web loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_matrix_is_row_major() {
        let scene = WebScene::new("mario.jpg").unwrap_or_else(|_| panic!("scene"));
        let world = scene.world_matrix();
        assert_eq!(world.len(), 16);
        assert_eq!(&world[12..], &[10.0, 10.0, 10.0, 1.0]);
    }

    #[test]
    fn test_line_buffers_are_aligned() {
        let scene = WebScene::new("mario.jpg").unwrap_or_else(|_| panic!("scene"));
        let positions = scene.line_positions();
        let colors = scene.line_colors();

        // 12 edges, 4 stages, 2 endpoints
        assert_eq!(positions.len(), 12 * 4 * 2 * 3);
        assert_eq!(colors.len() / 4, positions.len() / 3);
        assert_eq!(&colors[..4], &Color::WHITE.to_array());
        assert_eq!(&colors[8..12], &Color::RED.to_array());
    }

    #[test]
    fn test_texture_name() {
        let scene = WebScene::new("crate.png").unwrap_or_else(|_| panic!("scene"));
        assert_eq!(scene.texture_name(), "crate.png");
    }
}
