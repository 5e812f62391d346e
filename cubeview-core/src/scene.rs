/// The transform-pipeline demo scene and the collaborators it draws through
use nalgebra::{Matrix4, Point3};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::{Color, Stage, StageBuffers, StageColors, Wireframe, WireframeLayer};
use crate::projection::{CameraInput, DebugCamera};
use crate::transform::{TransformParams, TransformPipeline};

/// Opaque texture id handed out by a [`TextureLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Resolves texture names to handles
pub trait TextureLoader {
    fn load(&mut self, name: &str) -> Result<TextureHandle, SceneError>;
}

/// Receives the world matrix whenever it is recomposed
pub trait MatrixTransfer {
    fn transfer_world_matrix(&mut self, world: &Matrix4<f32>);
}

pub trait LineRenderer {
    fn draw_line_3d(&mut self, start: &Point3<f32>, end: &Point3<f32>, color: Color);
}

pub trait ModelRenderer {
    /// `world` uses the row-vector convention; `view_projection` is
    /// column-vector (`clip = view_projection * world^T * p`).
    fn draw_model(
        &mut self,
        world: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        texture: TextureHandle,
    );
}

pub trait DebugTextRenderer {
    fn draw_text(&mut self, line: usize, text: &str);
}

/// Everything [`Scene::draw`] needs from a frame
pub trait SceneRenderer: LineRenderer + ModelRenderer + DebugTextRenderer {}

impl<T: LineRenderer + ModelRenderer + DebugTextRenderer> SceneRenderer for T {}

/// Scene state built once at initialization
pub struct Scene {
    params: TransformParams,
    pipeline: TransformPipeline,
    wireframe: Wireframe,
    stages: StageBuffers,
    colors: StageColors,
    texture: TextureHandle,
    camera: DebugCamera,
}

impl Scene {
    /// Load the texture, compose and transfer the world matrix, and compute
    /// the per-stage vertex buffers
    pub fn initialize(
        config: SceneConfig,
        textures: &mut dyn TextureLoader,
        transfer: &mut dyn MatrixTransfer,
    ) -> Result<Self, SceneError> {
        let texture = textures.load(&config.texture_name)?;
        log::info!("loaded texture '{}' as {:?}", config.texture_name, texture);

        let (width, height) = config.viewport;
        let camera = DebugCamera::new(width, height, config.camera_distance);

        let pipeline = TransformPipeline::new(&config.transform);
        transfer.transfer_world_matrix(&pipeline.world);

        if config.preview_offset_diverges() {
            log::warn!(
                "translated wireframe uses offset {:?}, not the world translation {:?}",
                config.translation_preview_offset.as_slice(),
                config.transform.translation.as_slice()
            );
        }

        let stages = StageBuffers::compute(
            &config.wireframe,
            &pipeline,
            &config.translation_preview_offset,
        );

        log::info!(
            "scene initialized: {} vertices, {} edges",
            config.wireframe.vertices().len(),
            config.wireframe.edges().len()
        );

        Ok(Self {
            params: config.transform,
            pipeline,
            wireframe: config.wireframe,
            stages,
            colors: config.colors,
            texture,
            camera,
        })
    }

    pub fn update(&mut self, input: &CameraInput) {
        self.camera.update(input);
    }

    /// Draw the model, then every edge at each stage, then the debug text
    pub fn draw(&self, renderer: &mut dyn SceneRenderer) {
        let view_projection = self.camera.view_projection();
        renderer.draw_model(&self.pipeline.world, &view_projection, self.texture);

        for &[a, b] in self.wireframe.edges() {
            for stage in Stage::ALL {
                let vertices = self.stages.get(stage);
                renderer.draw_line_3d(&vertices[a], &vertices[b], self.colors.get(stage));
            }
        }

        for (line, text) in self.debug_lines().iter().enumerate() {
            renderer.draw_text(line, text);
        }
    }

    pub fn debug_lines(&self) -> Vec<String> {
        let s = self.params.scale;
        let r = self.params.rotation.map(f32::to_degrees);
        let t = self.params.translation;
        vec![
            format!("scale:       ({:.2}, {:.2}, {:.2})", s.x, s.y, s.z),
            format!("rotation:    ({:.1}, {:.1}, {:.1}) deg", r.x, r.y, r.z),
            format!("translation: ({:.2}, {:.2}, {:.2})", t.x, t.y, t.z),
            format!(
                "camera: {:?}, distance {:.1}",
                self.camera.mode(),
                self.camera.distance()
            ),
        ]
    }

    pub fn world_matrix(&self) -> &Matrix4<f32> {
        &self.pipeline.world
    }

    pub fn pipeline(&self) -> &TransformPipeline {
        &self.pipeline
    }

    pub fn stages(&self) -> &StageBuffers {
        &self.stages
    }

    pub fn wireframe(&self) -> &Wireframe {
        &self.wireframe
    }

    pub fn layers(&self) -> [WireframeLayer; 4] {
        self.stages.layers(&self.wireframe, &self.colors)
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn camera(&self) -> &DebugCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut DebugCamera {
        &mut self.camera
    }
}
