/// Triangle mesh standing in for the textured model
use std::borrow::Cow;

use cubeview_core::{MatrixTransfer, Transform, Wireframe};
use nalgebra::{Matrix4, Point3, Vector3};

/// Corner indices of each cube face, in winding order
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit face normal; its sign depends on winding
    pub fn normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(&(v2 - v0)).normalize()
    }

    fn transformed(&self, world: &Matrix4<f32>) -> Self {
        Self {
            vertices: self.vertices.map(|v| Transform::transform_point(&v, world)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Two triangles per face of a cube of edge length `size`
    pub fn cube(size: f32) -> Self {
        let corners = Wireframe::cube(size).vertices().to_vec();
        let triangles = CUBE_FACES
            .iter()
            .flat_map(|&[a, b, c, d]| {
                [
                    Triangle::new(corners[a], corners[b], corners[c]),
                    Triangle::new(corners[a], corners[c], corners[d]),
                ]
            })
            .collect();

        Self { triangles }
    }
}

/// A mesh plus its triangles baked into world space by the last
/// transferred world matrix
pub struct ModelMesh {
    local: Mesh,
    world: Matrix4<f32>,
    baked: Vec<Triangle>,
}

impl ModelMesh {
    pub fn new(local: Mesh) -> Self {
        let baked = local.triangles.clone();
        Self {
            local,
            world: Matrix4::identity(),
            baked,
        }
    }

    /// World-space triangles for `world`, reusing the baked set when it matches
    pub fn triangles(&self, world: &Matrix4<f32>) -> Cow<'_, [Triangle]> {
        if *world == self.world {
            Cow::Borrowed(&self.baked)
        } else {
            Cow::Owned(self.bake(world))
        }
    }

    fn bake(&self, world: &Matrix4<f32>) -> Vec<Triangle> {
        self.local
            .triangles
            .iter()
            .map(|triangle| triangle.transformed(world))
            .collect()
    }
}

impl MatrixTransfer for ModelMesh {
    fn transfer_world_matrix(&mut self, world: &Matrix4<f32>) {
        self.baked = self.bake(world);
        self.world = *world;
        log::debug!("model baked with {} triangles", self.baked.len());
    }
}
