//! Image Generator - Cached Source, Recolor, Rasterize, Save
//!
//! Recoloring is plain text substitution on the SVG markup. Rasterization sits
//! behind the `Rasterizer` trait; `ResvgRasterizer` is the production backend.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use resvg::{tiny_skia, usvg};
use thiserror::Error;
use tracing::debug;

use crate::color;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Malformed SVG: {0}")]
    Parse(#[from] usvg::Error),

    #[error("Invalid output size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Invalid background color: {0}")]
    InvalidColor(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Failed to read source {0}: {1}")]
    Source(PathBuf, #[source] std::io::Error),

    #[error("Rasterization failed: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Vector-to-raster backend
pub trait Rasterizer {
    /// Render `svg` at `width` pixels; height follows the document's aspect ratio.
    /// Composites over `background` when given, else transparent.
    fn rasterize(
        &self,
        svg: &str,
        width: u32,
        background: Option<&str>,
    ) -> Result<Vec<u8>, RenderError>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(
        &self,
        svg: &str,
        width: u32,
        background: Option<&str>,
    ) -> Result<Vec<u8>, RenderError> {
        (**self).rasterize(svg, width, background)
    }
}

/// resvg-backed PNG rasterizer
pub struct ResvgRasterizer {
    options: usvg::Options<'static>,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(
        &self,
        svg: &str,
        width: u32,
        background: Option<&str>,
    ) -> Result<Vec<u8>, RenderError> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;
        let size = tree.size();

        let scale = width as f32 / size.width();
        let height = (size.height() * width as f32 / size.width()).round().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::InvalidSize { width, height })?;

        if let Some(bg) = background {
            let fill = color::to_skia(bg).ok_or_else(|| RenderError::InvalidColor(bg.to_string()))?;
            pixmap.fill(fill);
        }

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        pixmap.encode_png().map_err(|e| RenderError::Encode(e.to_string()))
    }
}

/// Recolors and rasterizes one source document
pub struct ImageGenerator<R: Rasterizer> {
    source: PathBuf,
    rasterizer: R,
    document: OnceCell<String>,
}

impl<R: Rasterizer> ImageGenerator<R> {
    pub fn new(source: impl Into<PathBuf>, rasterizer: R) -> Self {
        Self {
            source: source.into(),
            rasterizer,
            document: OnceCell::new(),
        }
    }

    /// Source markup, read on first call and cached for the generator's lifetime
    pub fn load_document(&self) -> Result<&str, GeneratorError> {
        if let Some(doc) = self.document.get() {
            return Ok(doc);
        }

        let text = fs::read_to_string(&self.source)
            .map_err(|e| GeneratorError::Source(self.source.clone(), e))?;
        debug!("loaded {} ({} bytes)", self.source.display(), text.len());
        Ok(self.document.get_or_init(|| text))
    }

    pub fn render(
        &self,
        text: &str,
        width: u32,
        background: Option<&str>,
    ) -> Result<Vec<u8>, GeneratorError> {
        Ok(self.rasterizer.rasterize(text, width, background)?)
    }

    /// Recolor, rasterize and write one variant; returns the written path
    pub fn generate(
        &self,
        color: &str,
        default_color: &str,
        output: &Path,
        width: u32,
        ext: &str,
        background: Option<&str>,
    ) -> Result<PathBuf, GeneratorError> {
        let text = recolor(self.load_document()?, color, default_color);
        let bytes = self.render(&text, width, background)?;
        save(&bytes, output, ext)
    }
}

/// Replace every literal occurrence of `default_color` with `target`
pub fn recolor(text: &str, target: &str, default_color: &str) -> String {
    if default_color.is_empty() {
        return text.to_string();
    }
    text.replace(default_color, target)
}

/// Write `bytes` to `<output>.<ext>`, creating parent directories as needed.
/// Existing files are overwritten.
pub fn save(bytes: &[u8], output: &Path, ext: &str) -> Result<PathBuf, GeneratorError> {
    let mut file_name = output.as_os_str().to_os_string();
    file_name.push(".");
    file_name.push(ext);
    let path = PathBuf::from(file_name);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::Write(parent.to_path_buf(), e))?;
    }
    fs::write(&path, bytes).map_err(|e| GeneratorError::Write(path.clone(), e))?;
    Ok(path)
}
