/// Wireframe geometry and the per-stage vertex buffers drawn from it
use nalgebra::{Point3, Vector3};

use crate::error::SceneError;
use crate::transform::{Transform, TransformPipeline};

/// Edges of the cube returned by [`Wireframe::cube`]
pub const CUBE_EDGES: [[usize; 2]; 12] = [
    // Back face (z = -half)
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    // Front face (z = +half)
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    // Connecting edges
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A line between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

/// Vertices plus edges referencing them by index
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    vertices: Vec<Point3<f32>>,
    edges: Vec<[usize; 2]>,
}

impl Wireframe {
    /// Build a wireframe, rejecting edges that point past the vertex list
    pub fn new(vertices: Vec<Point3<f32>>, edges: Vec<[usize; 2]>) -> Result<Self, SceneError> {
        let vertex_count = vertices.len();
        for (edge, pair) in edges.iter().enumerate() {
            if let Some(&index) = pair.iter().find(|&&index| index >= vertex_count) {
                return Err(SceneError::EdgeOutOfRange {
                    edge,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self { vertices, edges })
    }

    /// Create an axis-aligned cube of edge length `size` centered at the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];

        Self {
            vertices,
            edges: CUBE_EDGES.to_vec(),
        }
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Line segments for `positions`, which must be index-aligned with
    /// this wireframe's vertices
    pub fn segments(&self, positions: &[Point3<f32>]) -> Result<Vec<LineSegment>, SceneError> {
        if positions.len() != self.vertices.len() {
            return Err(SceneError::VertexCountMismatch {
                expected: self.vertices.len(),
                actual: positions.len(),
            });
        }
        Ok(self.aligned_segments(positions))
    }

    /// Caller guarantees `positions` has one entry per vertex
    fn aligned_segments(&self, positions: &[Point3<f32>]) -> Vec<LineSegment> {
        self.edges
            .iter()
            .map(|&[a, b]| LineSegment {
                start: positions[a],
                end: positions[b],
            })
            .collect()
    }
}

/// Pipeline stage shown by a vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Original,
    Scaled,
    Rotated,
    Translated,
}

impl Stage {
    /// Draw order within each edge
    pub const ALL: [Stage; 4] = [Stage::Original, Stage::Scaled, Stage::Rotated, Stage::Translated];
}

/// One color per pipeline stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageColors {
    pub original: Color,
    pub scaled: Color,
    pub rotated: Color,
    pub translated: Color,
}

impl StageColors {
    pub fn get(&self, stage: Stage) -> Color {
        match stage {
            Stage::Original => self.original,
            Stage::Scaled => self.scaled,
            Stage::Rotated => self.rotated,
            Stage::Translated => self.translated,
        }
    }
}

impl Default for StageColors {
    fn default() -> Self {
        Self {
            original: Color::WHITE,
            scaled: Color::RED,
            rotated: Color::GREEN,
            translated: Color::BLUE,
        }
    }
}

/// The wireframe of one stage, ready for a line renderer
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeLayer {
    pub stage: Stage,
    pub color: Color,
    pub segments: Vec<LineSegment>,
}

/// Vertex positions of the cube at each pipeline stage
///
/// All four buffers are index-aligned with the base wireframe; they are
/// only built by [`StageBuffers::compute`].
#[derive(Debug, Clone, PartialEq)]
pub struct StageBuffers {
    original: Vec<Point3<f32>>,
    scaled: Vec<Point3<f32>>,
    rotated: Vec<Point3<f32>>,
    translated: Vec<Point3<f32>>,
}

impl StageBuffers {
    /// Scale and rotation use only the linear part of their matrices; the
    /// translated buffer is the original shifted by `preview_offset`.
    pub fn compute(
        wireframe: &Wireframe,
        pipeline: &TransformPipeline,
        preview_offset: &Vector3<f32>,
    ) -> Self {
        let original = wireframe.vertices().to_vec();
        let scaled = Transform::apply_linear(&original, &pipeline.scale);
        let rotated = Transform::apply_linear(&original, &pipeline.rotation);
        let translated = Transform::apply_offset(&original, preview_offset);

        Self {
            original,
            scaled,
            rotated,
            translated,
        }
    }

    pub fn get(&self, stage: Stage) -> &[Point3<f32>] {
        match stage {
            Stage::Original => &self.original,
            Stage::Scaled => &self.scaled,
            Stage::Rotated => &self.rotated,
            Stage::Translated => &self.translated,
        }
    }

    pub fn layers(&self, wireframe: &Wireframe, colors: &StageColors) -> [WireframeLayer; 4] {
        Stage::ALL.map(|stage| WireframeLayer {
            stage,
            color: colors.get(stage),
            segments: wireframe.aligned_segments(self.get(stage)),
        })
    }
}
