/// Texture loading for the terminal front end
///
/// A terminal cell cannot show texels, so each texture is reduced to its
/// mean color, which tints the ASCII model.
use std::path::{Path, PathBuf};

use cubeview_core::{Color, SceneError, TextureHandle, TextureLoader};

#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tint: Color,
}

impl Texture {
    /// Flat white stand-in for a texture file that does not exist
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            width: 1,
            height: 1,
            tint: Color::WHITE,
        }
    }

    pub fn open(name: &str, path: &Path) -> Result<Self, SceneError> {
        let image = image::open(path).map_err(|e| SceneError::TextureLoad {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let rgb = image.to_rgb8();

        let mut sum = [0u64; 3];
        for pixel in rgb.pixels() {
            for (total, channel) in sum.iter_mut().zip(pixel.0) {
                *total += channel as u64;
            }
        }
        let count = (rgb.width() as u64 * rgb.height() as u64).max(1);
        let [r, g, b] = sum.map(|total| (total / count) as f32 / 255.0);

        Ok(Self {
            name: name.to_string(),
            width: rgb.width(),
            height: rgb.height(),
            tint: Color::new(r, g, b, 1.0),
        })
    }
}

/// Textures resolved relative to a root directory, cached by name
pub struct TextureRegistry {
    root: PathBuf,
    textures: Vec<Texture>,
}

impl TextureRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: Vec::new(),
        }
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0 as usize)
    }

    /// Tint for `handle`, white when the handle is unknown
    pub fn tint(&self, handle: TextureHandle) -> Color {
        self.get(handle).map_or(Color::WHITE, |texture| texture.tint)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureLoader for TextureRegistry {
    fn load(&mut self, name: &str) -> Result<TextureHandle, SceneError> {
        if let Some(index) = self.textures.iter().position(|t| t.name == name) {
            return Ok(TextureHandle(index as u32));
        }

        let path = self.root.join(name);
        let texture = if path.exists() {
            Texture::open(name, &path)?
        } else {
            log::warn!("texture {} not found, using a flat placeholder", path.display());
            Texture::placeholder(name)
        };

        log::debug!(
            "texture '{}' {}x{} tint {:?}",
            texture.name,
            texture.width,
            texture.height,
            texture.tint
        );

        self.textures.push(texture);
        Ok(TextureHandle((self.textures.len() - 1) as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cubeview-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_texture_uses_placeholder() {
        let mut registry = TextureRegistry::new(scratch_dir("missing"));
        let handle = registry.load("mario.jpg").unwrap();
        assert_eq!(registry.get(handle), Some(&Texture::placeholder("mario.jpg")));
        assert_eq!(registry.tint(handle), Color::WHITE);
    }

    #[test]
    fn test_textures_are_cached_by_name() {
        let mut registry = TextureRegistry::new(scratch_dir("cached"));
        let first = registry.load("a.png").unwrap();
        let second = registry.load("b.png").unwrap();
        let again = registry.load("a.png").unwrap();
        assert_ne!(first, second);
        assert_eq!(first, again);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_tint_is_mean_color() {
        let dir = scratch_dir("tint");
        let image = image::RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([255, 255, 0])
            }
        });
        image.save(dir.join("tint.png")).unwrap();

        let mut registry = TextureRegistry::new(&dir);
        let handle = registry.load("tint.png").unwrap();
        let texture = registry.get(handle).unwrap();
        assert_eq!((texture.width, texture.height), (2, 1));
        assert!((texture.tint.r - 1.0).abs() < 1e-6);
        assert!((texture.tint.g - 127.0 / 255.0).abs() < 1e-6);
        assert_eq!(texture.tint.b, 0.0);
    }

    #[test]
    fn test_undecodable_texture_is_an_error() {
        let dir = scratch_dir("corrupt");
        fs::write(dir.join("broken.png"), b"not a png").unwrap();

        let mut registry = TextureRegistry::new(&dir);
        let result = registry.load("broken.png");
        assert!(matches!(result, Err(SceneError::TextureLoad { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_handle_is_white() {
        let registry = TextureRegistry::new(".");
        assert_eq!(registry.tint(TextureHandle(7)), Color::WHITE);
    }
}
