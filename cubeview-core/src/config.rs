/// Scene configuration
///
/// The defaults reproduce the tutorial scene: a size-2 cube scaled by 2,
/// rotated 45 degrees about every axis and translated by 10 units.
use nalgebra::Vector3;

use crate::geometry::{StageColors, Wireframe};
use crate::transform::TransformParams;

/// Offset applied to the translated-stage wireframe.
///
/// Independent of the configured translation: the translated cube is
/// previewed at 5 units while the world matrix moves the model by 10.
pub const TRANSLATION_PREVIEW_OFFSET: [f32; 3] = [5.0, 5.0, 5.0];

/// Everything a scene needs at construction
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Texture applied to the model, resolved by the texture loader
    pub texture_name: String,

    /// Scale, rotation and translation of the model
    pub transform: TransformParams,

    /// Offset of the translated-stage wireframe
    pub translation_preview_offset: Vector3<f32>,

    /// Base geometry drawn at every stage
    pub wireframe: Wireframe,

    pub colors: StageColors,

    /// Viewport the debug camera is created for
    pub viewport: (u32, u32),

    /// Initial distance between the debug camera and its target
    pub camera_distance: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let angle = 45f32.to_radians();
        Self {
            texture_name: "mario.jpg".to_string(),
            transform: TransformParams::new(
                Vector3::new(2.0, 2.0, 2.0),
                Vector3::new(angle, angle, angle),
                Vector3::new(10.0, 10.0, 10.0),
            ),
            translation_preview_offset: Vector3::from(TRANSLATION_PREVIEW_OFFSET),
            wireframe: Wireframe::cube(2.0),
            colors: StageColors::default(),
            viewport: (1280, 800),
            camera_distance: 50.0,
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texture(mut self, name: impl Into<String>) -> Self {
        self.texture_name = name.into();
        self
    }

    pub fn with_transform(mut self, transform: TransformParams) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_wireframe(mut self, wireframe: Wireframe) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    /// True when the translated-stage wireframe will not sit where the
    /// world matrix puts the model
    pub fn preview_offset_diverges(&self) -> bool {
        self.translation_preview_offset != self.transform.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.texture_name, "mario.jpg");
        assert_eq!(config.transform.scale, Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(config.transform.translation, Vector3::new(10.0, 10.0, 10.0));
        assert!((config.transform.rotation.x - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(config.translation_preview_offset, Vector3::new(5.0, 5.0, 5.0));
        assert_eq!(config.wireframe.vertices().len(), 8);
        assert_eq!(config.viewport, (1280, 800));
    }

    #[test]
    fn test_preview_offset_divergence() {
        let config = SceneConfig::default();
        assert!(config.preview_offset_diverges());

        let mut aligned = config.clone();
        aligned.translation_preview_offset = aligned.transform.translation;
        assert!(!aligned.preview_offset_diverges());
    }

    #[test]
    fn test_builders() {
        let config = SceneConfig::new()
            .with_texture("crate.png")
            .with_viewport(80, 24)
            .with_transform(TransformParams::identity());
        assert_eq!(config.texture_name, "crate.png");
        assert_eq!(config.viewport, (80, 24));
        assert_eq!(config.transform, TransformParams::identity());
    }
}
