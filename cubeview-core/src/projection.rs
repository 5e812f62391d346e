/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
///
/// Matrices follow nalgebra's column-vector convention.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

/// A point projected onto a viewport, in pixels, with its clip-space depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, -50.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 1000.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to screen space through `clip_from_world`
    ///
    /// Returns `None` for points at or behind the camera plane. Points
    /// outside the viewport are returned as-is; callers clip per pixel.
    pub fn project_to_screen(
        point: &Point3<f32>,
        clip_from_world: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let clip = clip_from_world * point.to_homogeneous();

        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc_y) * 0.5 * height as f32,
            depth,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// Camera movement requested by the input layer for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    /// Radians around the vertical axis
    pub yaw: f32,
    /// Radians toward the poles
    pub pitch: f32,
    /// Multiplier applied to the orbit distance; 1.0 keeps it
    pub zoom: f32,
}

impl CameraInput {
    pub fn orbit(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            zoom: 1.0,
        }
    }

    pub fn zoom(factor: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            zoom: factor,
        }
    }
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const MIN_DISTANCE: f32 = 1.0;

/// Orbit camera used to inspect the scene
#[derive(Debug, Clone)]
pub struct DebugCamera {
    camera: Camera,
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl DebugCamera {
    /// Looks at the origin from `distance` units down the negative Z axis
    pub fn new(width: u32, height: u32, distance: f32) -> Self {
        let mut debug = Self {
            camera: Camera::new(width, height),
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.max(MIN_DISTANCE),
        };
        debug.sync_position();
        debug
    }

    pub fn update(&mut self, input: &CameraInput) {
        if *input == CameraInput::default() {
            return;
        }

        self.yaw += input.yaw;
        self.pitch = (self.pitch + input.pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        if input.zoom > 0.0 {
            self.distance = (self.distance * input.zoom).max(MIN_DISTANCE);
        }
        self.sync_position();

        log::trace!(
            "debug camera yaw={:.2} pitch={:.2} distance={:.1}",
            self.yaw,
            self.pitch,
            self.distance
        );
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> ProjectionMode {
        self.camera.mode
    }

    pub fn set_mode(&mut self, mode: ProjectionMode) {
        self.camera.mode = mode;
    }

    /// Switch between perspective and orthographic, returning the new mode
    pub fn toggle_mode(&mut self) -> ProjectionMode {
        let mode = match self.camera.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
        self.set_mode(mode);
        log::debug!("debug camera projection: {:?}", mode);
        mode
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.camera.view_projection()
    }

    fn sync_position(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vector3::new(
            self.distance * cos_pitch * sin_yaw,
            self.distance * sin_pitch,
            -self.distance * cos_pitch * cos_yaw,
        );
        self.camera.position = self.camera.target + offset;
    }
}
