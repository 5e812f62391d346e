/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cubeview_core::{Camera, ScreenPoint};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;

use crate::mesh::Triangle;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

const LINE_CHAR: char = 'o';

/// Pulls lines in front of the faces they lie on
const LINE_DEPTH_BIAS: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub character: char,
    pub color: Color,
}

impl Cell {
    const EMPTY: Cell = Cell {
        character: ' ',
        color: Color::Reset,
    };
}

/// ASCII renderer that converts 3D primitives to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
    view_projection: Matrix4<f32>,
    overlay: Vec<(usize, String)>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![Cell::EMPTY; size],
            view_projection: Matrix4::identity(),
            overlay: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::EMPTY);
        self.overlay.clear();
    }

    /// Camera used by [`draw_line`](Self::draw_line) until changed
    pub fn set_view_projection(&mut self, view_projection: Matrix4<f32>) {
        self.view_projection = view_projection;
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn overlay(&self) -> &[(usize, String)] {
        &self.overlay
    }

    pub fn push_text(&mut self, line: usize, text: &str) {
        self.overlay.push((line, text.to_string()));
    }

    /// Draw a depth-tested line, clipped to the near plane and the viewport
    pub fn draw_line(&mut self, start: &Point3<f32>, end: &Point3<f32>, color: Color) {
        let Some((start, end)) = clip_near(start, end, &self.view_projection) else {
            return;
        };
        let (Some(a), Some(b)) = (
            self.project(&start, &self.view_projection),
            self.project(&end, &self.view_projection),
        ) else {
            return;
        };
        let Some((a, b)) = clip_to_viewport(a, b, self.width as f32, self.height as f32) else {
            return;
        };

        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let steps = (dx.abs().max(dy.abs()).ceil() as usize).max(1);

        let cell = Cell {
            character: LINE_CHAR,
            color,
        };
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let depth = a.depth + (b.depth - a.depth) * t - LINE_DEPTH_BIAS;
            self.plot(a.x + dx * t, a.y + dy * t, depth, cell);
        }
    }

    /// Rasterize world-space triangles shaded by a fixed light and tinted by `tint`
    pub fn draw_triangles(&mut self, triangles: &[Triangle], view_projection: &Matrix4<f32>, tint: Color) {
        let light_dir = Vector3::new(0.3, 0.8, -0.5).normalize();

        for triangle in triangles {
            let mut screen_coords = [ScreenPoint { x: 0.0, y: 0.0, depth: 0.0 }; 3];
            let mut visible = true;
            for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
                match self.project(vertex, view_projection) {
                    Some(point) => *slot = point,
                    None => visible = false,
                }
            }
            if !visible {
                continue; // Triangle is clipped
            }

            let brightness = triangle.normal().dot(&light_dir).abs();
            let char_index = 1 + (brightness * (LUMINOSITY_RAMP.len() - 2) as f32) as usize;
            let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);

            let cell = Cell {
                character: LUMINOSITY_RAMP[char_index],
                color: tint,
            };
            self.rasterize_triangle(&screen_coords, cell);
        }
    }

    fn project(&self, point: &Point3<f32>, view_projection: &Matrix4<f32>) -> Option<ScreenPoint> {
        Camera::project_to_screen(point, view_projection, self.width as u32, self.height as u32)
    }

    fn plot(&mut self, x: f32, y: f32, depth: f32, cell: Cell) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.cells[idx] = cell;
        }
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenPoint; 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) = barycentric(
                    (v0.x, v0.y),
                    (v1.x, v1.y),
                    (v2.x, v2.y),
                    (px, py),
                ) else {
                    continue;
                };

                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                    self.plot(px, py, depth, cell);
                }
            }
        }
    }

    /// Write the frame, then the overlay text starting at terminal row `overlay_row`
    pub fn draw<W: Write>(&self, writer: &mut W, overlay_row: u16) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.character))?;
            }
        }

        writer.queue(SetForegroundColor(Color::Grey))?;
        for (line, text) in &self.overlay {
            writer.queue(cursor::MoveTo(0, overlay_row + *line as u16))?;
            writer.queue(Print(text))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Convert an RGBA color to a terminal color, ignoring alpha
pub fn terminal_color(color: cubeview_core::Color) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Cut a world-space segment to the part in front of the near plane
/// (`z + w >= 0` in clip space)
fn clip_near(
    start: &Point3<f32>,
    end: &Point3<f32>,
    view_projection: &Matrix4<f32>,
) -> Option<(Point3<f32>, Point3<f32>)> {
    let distance = |p: &Point3<f32>| {
        let clip = view_projection * p.to_homogeneous();
        clip.z + clip.w
    };
    let (d0, d1) = (distance(start), distance(end));
    let cut = |t: f32| *start + (*end - *start) * t;

    match (d0 >= 0.0, d1 >= 0.0) {
        (true, true) => Some((*start, *end)),
        (false, false) => None,
        (true, false) => Some((*start, cut(d0 / (d0 - d1)))),
        (false, true) => Some((cut(d0 / (d0 - d1)), *end)),
    }
}

/// Liang-Barsky clip of a screen segment to `[0, width] x [0, height]`
fn clip_to_viewport(
    a: ScreenPoint,
    b: ScreenPoint,
    width: f32,
    height: f32,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;

    for (p, q) in [(-dx, a.x), (dx, width - a.x), (-dy, a.y), (dy, height - a.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }

    let at = |t: f32| ScreenPoint {
        x: a.x + dx * t,
        y: a.y + dy * t,
        depth: a.depth + (b.depth - a.depth) * t,
    };
    Some((at(t0), at(t1)))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
