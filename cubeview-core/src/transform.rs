/// Affine transform matrices for the row-vector convention (`p' = p * M`)
use nalgebra::{Matrix4, Point3, RowVector4, Vector3};

/// Scale, rotation (Euler radians) and translation of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub scale: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl TransformParams {
    pub fn new(scale: Vector3<f32>, rotation: Vector3<f32>, translation: Vector3<f32>) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::zeros(),
            translation: Vector3::zeros(),
        }
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform builder for 3D transformations
///
/// Matrices are laid out for row vectors: translation sits in the fourth
/// row and composites read left to right in application order.
pub struct Transform;

impl Transform {
    /// Create a scale matrix with `(sx, sy, sz, 1)` on the diagonal
    #[rustfmt::skip]
    pub fn scale_matrix(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0, 0.0, 0.0,
            0.0, scale.y, 0.0, 0.0,
            0.0, 0.0, scale.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_x(angle: f32) -> Matrix4<f32> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create the composite rotation matrix `Rz * (Rx * Ry)`
    ///
    /// The order is fixed; changing it changes the resulting orientation.
    pub fn rotation_matrix(rotation: &Vector3<f32>) -> Matrix4<f32> {
        let rx = Self::rotation_x(rotation.x);
        let ry = Self::rotation_y(rotation.y);
        let rz = Self::rotation_z(rotation.z);

        rz * (rx * ry)
    }

    /// Create a translation matrix with the offset in the fourth row
    #[rustfmt::skip]
    pub fn translation_matrix(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            translation.x, translation.y, translation.z, 1.0,
        )
    }

    /// Create the world matrix `I * S * R * T` (scale, then rotate, then translate)
    pub fn world_matrix(params: &TransformParams) -> Matrix4<f32> {
        let mut world = Matrix4::identity();
        world *= Self::scale_matrix(&params.scale);
        world *= Self::rotation_matrix(&params.rotation);
        world *= Self::translation_matrix(&params.translation);
        world
    }

    /// Transform a point as the row vector `[x y z 1]`, translation included
    pub fn transform_point(point: &Point3<f32>, matrix: &Matrix4<f32>) -> Point3<f32> {
        let row = RowVector4::new(point.x, point.y, point.z, 1.0) * matrix;
        Point3::new(row[0], row[1], row[2])
    }

    /// Apply the upper-left 3x3 block of `matrix` to every vertex
    ///
    /// Output component `i` is the dot product of the vertex with row `i`
    /// of the block, i.e. `block * v` for a column vector `v`. Under the
    /// row-vector convention this applies the transpose, so a rotated
    /// buffer shows `R^T`, matching the reference visualizer. The
    /// translation row is ignored.
    pub fn apply_linear(vertices: &[Point3<f32>], matrix: &Matrix4<f32>) -> Vec<Point3<f32>> {
        let linear = matrix.fixed_view::<3, 3>(0, 0);
        vertices
            .iter()
            .map(|vertex| Point3::from(linear * vertex.coords))
            .collect()
    }

    /// Offset every vertex by `offset`
    pub fn apply_offset(vertices: &[Point3<f32>], offset: &Vector3<f32>) -> Vec<Point3<f32>> {
        vertices.iter().map(|vertex| vertex + offset).collect()
    }
}

/// The matrices built for one set of transform parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TransformPipeline {
    pub scale: Matrix4<f32>,
    pub rotation: Matrix4<f32>,
    pub translation: Matrix4<f32>,
    pub world: Matrix4<f32>,
}

impl TransformPipeline {
    pub fn new(params: &TransformParams) -> Self {
        let scale = Transform::scale_matrix(&params.scale);
        let rotation = Transform::rotation_matrix(&params.rotation);
        let translation = Transform::translation_matrix(&params.translation);
        let world = Transform::world_matrix(params);

        log::debug!("composed world matrix: {}", world);

        Self {
            scale,
            rotation,
            translation,
            world,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn cube_vertices() -> Vec<Point3<f32>> {
        crate::geometry::Wireframe::cube(2.0).vertices().to_vec()
    }

    #[test]
    fn test_scale_matrix_is_diagonal() {
        let m = Transform::scale_matrix(&Vector3::new(2.0, 3.0, 4.0));
        for row in 0..4 {
            for col in 0..4 {
                let expected = match (row, col) {
                    (0, 0) => 2.0,
                    (1, 1) => 3.0,
                    (2, 2) => 4.0,
                    (3, 3) => 1.0,
                    _ => 0.0,
                };
                assert_eq!(m[(row, col)], expected, "entry ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_rotation_matches_reference_at_45_degrees() {
        let m = Transform::rotation_matrix(&Vector3::new(FRAC_PI_4, FRAC_PI_4, FRAC_PI_4));

        // Rz * Rx * Ry worked out by hand for c = s = sqrt(2) / 2
        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.853_553_4, 0.5, -0.146_446_6, 0.0,
            -0.146_446_6, 0.5, 0.853_553_4, 0.0,
            0.5, -0.707_106_8, 0.5, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        assert!((m - expected).norm() < 1e-5, "got {}", m);
    }

    #[test]
    fn test_rotation_order_is_z_x_y() {
        let angles = Vector3::new(0.3, -0.7, 1.1);
        let m = Transform::rotation_matrix(&angles);
        let zxy = Transform::rotation_z(angles.z)
            * Transform::rotation_x(angles.x)
            * Transform::rotation_y(angles.y);
        let xyz = Transform::rotation_x(angles.x)
            * Transform::rotation_y(angles.y)
            * Transform::rotation_z(angles.z);

        assert!((m - zxy).norm() < 1e-6);
        assert!((m - xyz).norm() > 1e-3);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&Vector3::zeros());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_translation_moves_origin() {
        let m = Transform::translation_matrix(&Vector3::new(10.0, 10.0, 10.0));
        let moved = Transform::transform_point(&Point3::origin(), &m);
        assert_eq!(moved, Point3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_world_matrix_is_scale_rotate_translate() {
        let params = TransformParams::new(
            Vector3::new(2.0, 2.0, 2.0),
            Vector3::new(FRAC_PI_4, FRAC_PI_4, FRAC_PI_4),
            Vector3::new(10.0, 10.0, 10.0),
        );
        let world = Transform::world_matrix(&params);
        let rotation = Transform::rotation_matrix(&params.rotation);

        for row in 0..3 {
            for col in 0..3 {
                assert!((world[(row, col)] - 2.0 * rotation[(row, col)]).abs() < 1e-6);
            }
            assert_eq!(world[(row, 3)], 0.0);
        }
        assert_eq!(world[(3, 0)], 10.0);
        assert_eq!(world[(3, 1)], 10.0);
        assert_eq!(world[(3, 2)], 10.0);
        assert_eq!(world[(3, 3)], 1.0);

        let p = Transform::transform_point(&Point3::new(1.0, 0.0, 0.0), &world);
        assert!((p.x - (10.0 + 2.0 * rotation[(0, 0)])).abs() < 1e-5);
        assert!((p.y - (10.0 + 2.0 * rotation[(0, 1)])).abs() < 1e-5);
        assert!((p.z - (10.0 + 2.0 * rotation[(0, 2)])).abs() < 1e-5);
    }

    #[test]
    fn test_world_matrix_is_deterministic() {
        let params = TransformParams::new(
            Vector3::new(2.0, 2.0, 2.0),
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(10.0, 10.0, 10.0),
        );
        let first = Transform::world_matrix(&params);
        let second = Transform::world_matrix(&params);
        assert_eq!(first, second);
        assert_eq!(TransformPipeline::new(&params).world, first);
    }

    #[test]
    fn test_apply_linear_identity_is_noop() {
        let vertices = cube_vertices();
        let transformed = Transform::apply_linear(&vertices, &Matrix4::identity());
        assert_eq!(transformed, vertices);
    }

    #[test]
    fn test_apply_linear_scale() {
        let vertices = cube_vertices();
        let scale = Transform::scale_matrix(&Vector3::new(2.0, 2.0, 2.0));
        let scaled = Transform::apply_linear(&vertices, &scale);

        let corner = vertices
            .iter()
            .position(|v| *v == Point3::new(1.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(scaled[corner], Point3::new(2.0, 2.0, 2.0));
        assert_eq!(scaled.len(), vertices.len());
    }

    #[test]
    fn test_apply_linear_uses_matrix_rows() {
        let rotation = Transform::rotation_matrix(&Vector3::new(FRAC_PI_4, FRAC_PI_4, FRAC_PI_4));
        let rotated = Transform::apply_linear(&[Point3::new(1.0, 0.0, 0.0)], &rotation);

        assert!((rotated[0].x - rotation[(0, 0)]).abs() < 1e-6);
        assert!((rotated[0].y - rotation[(1, 0)]).abs() < 1e-6);
        assert!((rotated[0].z - rotation[(2, 0)]).abs() < 1e-6);
    }

    #[test]
    fn test_apply_linear_rotation_is_transpose_of_row_transform() {
        let rotation = Transform::rotation_matrix(&Vector3::new(FRAC_PI_4, FRAC_PI_4, FRAC_PI_4));
        let point = Point3::new(1.0, 0.0, 0.0);
        let linear = Transform::apply_linear(&[point], &rotation)[0];
        let transposed = Transform::transform_point(&point, &rotation.transpose());
        let row = Transform::transform_point(&point, &rotation);

        assert!((linear - transposed).norm() < 1e-6);
        assert!((linear - row).norm() > 0.5);
    }

    #[test]
    fn test_pipeline_world_matches_world_matrix() {
        let params = TransformParams::new(
            Vector3::new(2.0, 3.0, 4.0),
            Vector3::new(FRAC_PI_4, 0.2, -0.9),
            Vector3::new(10.0, -5.0, 1.0),
        );
        let pipeline = TransformPipeline::new(&params);
        let expected = pipeline.scale * pipeline.rotation * pipeline.translation;

        assert_eq!(pipeline.world, Transform::world_matrix(&params));
        assert!((pipeline.world - expected).norm() < 1e-5);
    }

    #[test]
    fn test_apply_linear_ignores_translation() {
        let translation = Transform::translation_matrix(&Vector3::new(10.0, 10.0, 10.0));
        let vertices = cube_vertices();
        assert_eq!(Transform::apply_linear(&vertices, &translation), vertices);
    }

    #[test]
    fn test_apply_offset() {
        let vertices = cube_vertices();
        let offset = Vector3::new(5.0, 5.0, 5.0);
        let moved = Transform::apply_offset(&vertices, &offset);
        for (before, after) in vertices.iter().zip(&moved) {
            assert_eq!(after - before, offset);
        }
    }

    #[test]
    fn test_nan_propagates() {
        let m = Transform::scale_matrix(&Vector3::new(f32::NAN, 1.0, 1.0));
        let out = Transform::apply_linear(&[Point3::new(1.0, 1.0, 1.0)], &m);
        assert!(out[0].x.is_nan());
        assert_eq!(out[0].y, 1.0);
    }
}
