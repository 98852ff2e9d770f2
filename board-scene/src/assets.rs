//! Piece image resources.
//!
//! Every piece resolves to `<root>/<w|b><LETTER>.png`. Decoding goes through
//! [`PieceImageLoader`] so boards can be built without image files on disk.

use std::path::{Path, PathBuf};

use chess::{Piece, PieceColor};
use thiserror::Error;

/// Default directory for piece images, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "png_pieces";

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to load piece image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Image buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Not a piece image resource: {}", .0.display())]
    UnknownResource(PathBuf),
}

/// Decoded RGBA piece image.
///
/// The set of non-transparent pixels is captured when the image is created and
/// never changes afterwards, so opacity changes are reversible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    mask: Vec<bool>,
}

impl PieceImage {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ImageError::InvalidBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        let mask = pixels.chunks_exact(4).map(|px| px[3] != 0).collect();
        Ok(Self {
            width,
            height,
            pixels,
            mask,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.pixels.get(idx).copied()
    }

    /// Number of pixels that were non-transparent when the image was loaded.
    pub fn visible_pixels(&self) -> usize {
        self.mask.iter().filter(|m| **m).count()
    }

    /// Set every originally visible pixel's alpha to `opacity` (clamped to
    /// `[0, 1]`). Originally transparent pixels stay at zero.
    pub fn set_opacity(&mut self, opacity: f32) {
        let alpha = (255.0 * opacity.clamp(0.0, 1.0)).round() as u8;
        for (px, visible) in self.pixels.chunks_exact_mut(4).zip(&self.mask) {
            px[3] = if *visible { alpha } else { 0 };
        }
    }

    /// Mean alpha of the originally visible pixels, in `[0, 1]`.
    pub fn coverage(&self) -> f32 {
        let visible = self.visible_pixels();
        if visible == 0 {
            return 0.0;
        }
        let total: u64 = self
            .pixels
            .chunks_exact(4)
            .zip(&self.mask)
            .filter(|(_, visible)| **visible)
            .map(|(px, _)| u64::from(px[3]))
            .sum();
        total as f32 / (visible as f32 * 255.0)
    }
}

/// Turns a resource path into a decoded image.
pub trait PieceImageLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<PieceImage, ImageError>;
}

/// Decodes PNG files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageLoader;

impl PieceImageLoader for PngImageLoader {
    fn load(&self, path: &Path) -> Result<PieceImage, ImageError> {
        let decoded = image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        PieceImage::from_rgba(width, height, rgba.into_raw())
    }
}

/// Synthesises a filled disc for each piece instead of reading files.
///
/// White pieces are white discs, black pieces black discs. The path still has
/// to name a piece resource.
#[derive(Debug, Clone, Copy)]
pub struct SilhouetteLoader {
    size: u32,
}

impl SilhouetteLoader {
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }
}

impl Default for SilhouetteLoader {
    fn default() -> Self {
        Self::new(32)
    }
}

impl PieceImageLoader for SilhouetteLoader {
    fn load(&self, path: &Path) -> Result<PieceImage, ImageError> {
        let piece = piece_for_path(path)?;
        let shade = match piece.color {
            PieceColor::White => 0xff,
            PieceColor::Black => 0x00,
        };
        let size = self.size;
        let radius = size as f32 / 2.0;
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                let inside = dx * dx + dy * dy <= radius * radius;
                pixels.extend_from_slice(&[shade, shade, shade, if inside { 255 } else { 0 }]);
            }
        }
        PieceImage::from_rgba(size, size, pixels)
    }
}

/// Identify the piece an image resource path stands for.
pub fn piece_for_path(path: &Path) -> Result<Piece, ImageError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(Piece::from_resource_stem)
        .ok_or_else(|| ImageError::UnknownResource(path.to_path_buf()))
}

/// Resolves pieces to image resources and loads them.
pub struct AssetCatalog {
    root: PathBuf,
    loader: Box<dyn PieceImageLoader>,
}

impl AssetCatalog {
    pub fn new(root: impl Into<PathBuf>, loader: impl PieceImageLoader + 'static) -> Self {
        Self {
            root: root.into(),
            loader: Box::new(loader),
        }
    }

    /// PNG files under `root`.
    pub fn png(root: impl Into<PathBuf>) -> Self {
        Self::new(root, PngImageLoader)
    }

    /// Generated discs, no files needed.
    pub fn silhouettes() -> Self {
        Self::new(DEFAULT_ASSETS_DIR, SilhouetteLoader::default())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, piece: Piece) -> PathBuf {
        self.root.join(format!("{}.png", piece.resource_stem()))
    }

    /// Resolve and load the image for `piece`, returning the path it came from.
    pub fn load(&self, piece: Piece) -> Result<(PathBuf, PieceImage), ImageError> {
        let path = self.path_for(piece);
        let image = self.loader.load(&path)?;
        Ok((path, image))
    }
}

impl std::fmt::Debug for AssetCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCatalog")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::PieceKind;

    fn two_pixel_image() -> PieceImage {
        // One opaque pixel, one transparent.
        PieceImage::from_rgba(2, 1, vec![10, 20, 30, 255, 0, 0, 0, 0]).unwrap()
    }

    #[test]
    fn test_invalid_buffer_length() {
        let err = PieceImage::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidBuffer {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_set_opacity_keeps_transparent_pixels() {
        let mut img = two_pixel_image();
        img.set_opacity(0.0);
        assert_eq!(img.alpha_at(0, 0), Some(0));
        assert_eq!(img.alpha_at(1, 0), Some(0));

        img.set_opacity(1.0);
        assert_eq!(img.alpha_at(0, 0), Some(255));
        assert_eq!(img.alpha_at(1, 0), Some(0));

        img.set_opacity(0.5);
        assert_eq!(img.alpha_at(0, 0), Some(128));
        assert_eq!(img.visible_pixels(), 1);
    }

    #[test]
    fn test_set_opacity_clamps() {
        let mut img = two_pixel_image();
        img.set_opacity(3.0);
        assert_eq!(img.alpha_at(0, 0), Some(255));
        img.set_opacity(-1.0);
        assert_eq!(img.alpha_at(0, 0), Some(0));
    }

    #[test]
    fn test_coverage() {
        let mut img = two_pixel_image();
        assert!((img.coverage() - 1.0).abs() < f32::EPSILON);
        img.set_opacity(0.0);
        assert_eq!(img.coverage(), 0.0);
    }

    #[test]
    fn test_catalog_paths() {
        let catalog = AssetCatalog::silhouettes();
        let path = catalog.path_for(Piece::new(PieceKind::Knight, PieceColor::Black));
        assert_eq!(path, Path::new(DEFAULT_ASSETS_DIR).join("bN.png"));
    }

    #[test]
    fn test_silhouette_loader() {
        let catalog = AssetCatalog::silhouettes();
        let (path, img) = catalog
            .load(Piece::new(PieceKind::King, PieceColor::White))
            .unwrap();
        assert_eq!(piece_for_path(&path).unwrap().kind, PieceKind::King);
        assert_eq!(img.width(), 32);
        // Centre is inside the disc, corner is not.
        assert_eq!(img.alpha_at(16, 16), Some(255));
        assert_eq!(img.alpha_at(0, 0), Some(0));
    }

    #[test]
    fn test_silhouette_loader_rejects_unknown_resource() {
        let err = SilhouetteLoader::default()
            .load(Path::new("png_pieces/xZ.png"))
            .unwrap_err();
        assert!(matches!(err, ImageError::UnknownResource(_)));
    }

    #[test]
    fn test_png_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::png(dir.path());
        let err = catalog
            .load(Piece::new(PieceKind::Pawn, PieceColor::White))
            .unwrap_err();
        assert!(matches!(err, ImageError::Decode { .. }));
    }

    #[test]
    fn test_png_loader_reads_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let mut png = image::RgbaImage::new(4, 4);
        png.put_pixel(1, 1, image::Rgba([200, 0, 0, 255]));
        png.save(dir.path().join("bQ.png")).unwrap();

        let catalog = AssetCatalog::png(dir.path());
        let (_, img) = catalog
            .load(Piece::new(PieceKind::Queen, PieceColor::Black))
            .unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.visible_pixels(), 1);
        assert_eq!(img.alpha_at(1, 1), Some(255));
    }
}
