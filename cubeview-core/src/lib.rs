/// CubeView Core Library - Transform pipeline for the cube demo scene
/// 
/// This library builds the scale, rotation and translation matrices of the
/// demo, composes them into a world matrix, and derives the per-stage
/// wireframes drawn by the front ends through the traits in `scene`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use config::SceneConfig;
pub use error::SceneError;
pub use geometry::{Color, LineSegment, Stage, StageBuffers, StageColors, Wireframe, WireframeLayer};
pub use projection::{Camera, CameraInput, DebugCamera, ProjectionMode, ScreenPoint};
pub use scene::{
    DebugTextRenderer, LineRenderer, MatrixTransfer, ModelRenderer, Scene, SceneRenderer,
    TextureHandle, TextureLoader,
};
pub use transform::{Transform, TransformParams, TransformPipeline};
