//! QR rasterization.
//!
//! The payload is encoded at error-correction level `L` into the smallest version that fits.
//! Each module becomes a `box_size` square and the symbol is surrounded by a `border`-module
//! quiet zone painted in the background color.

use crate::error::{GeneratorError, GeneratorErrorExt};
use crate::style::StyleConfig;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, Rgba};
use qrcode::{Color as Module, EcLevel, QrCode};
use std::io::Cursor;
use tracing::debug;

/// A rendered PNG plus its pixel dimensions.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Parses a CSS color string into RGBA.
///
/// # Errors
/// Returns [`GeneratorError::Color`] when the string is not a recognised color.
pub fn parse_color(value: &str) -> Result<[u8; 4], GeneratorError> {
    csscolorparser::parse(value.trim()).map(|color| color.to_rgba8()).map_err(|_| {
        GeneratorError::Color {
            message: format!("unknown color specifier: '{value}'").into(),
            context: None,
        }
    })
}

/// Encodes `link` and renders it to PNG with the given style.
///
/// The image is RGB unless either color carries transparency, in which case it is RGBA.
/// `style` is expected to come from [`crate::style::normalize_style`]; sizes outside its ranges
/// are rendered as given as long as the side length fits in `u32`.
///
/// # Errors
/// * [`GeneratorError::Encode`] when the data is too long for any QR version.
/// * [`GeneratorError::Color`] when either color cannot be parsed.
/// * [`GeneratorError::Internal`] when `box_size` and `border` overflow the image side.
/// * [`GeneratorError::Image`] if PNG encoding fails.
pub fn render_png(link: &str, style: &StyleConfig) -> Result<GeneratedImage, GeneratorError> {
    let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::L)
        .context("Encoding payload")?;

    let fill = parse_color(&style.fill_color).context("fillColor")?;
    let background = parse_color(&style.background_color).context("backgroundColor")?;

    let grid = ModuleGrid::new(&code, style);
    let side = grid.side().ok_or_else(|| GeneratorError::Internal {
        message: format!(
            "image side overflows for box size {} and border {}",
            style.box_size, style.border
        )
        .into(),
        context: None,
    })?;

    let image = if fill[3] == u8::MAX && background[3] == u8::MAX {
        let [r, g, b, _] = fill;
        let fill = Rgb([r, g, b]);
        let [r, g, b, _] = background;
        let background = Rgb([r, g, b]);
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(side, side, |x, y| {
            if grid.is_dark(x, y) { fill } else { background }
        }))
    } else {
        let (fill, background) = (Rgba(fill), Rgba(background));
        DynamicImage::ImageRgba8(ImageBuffer::from_fn(side, side, |x, y| {
            if grid.is_dark(x, y) { fill } else { background }
        }))
    };

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png).context("Writing PNG")?;

    debug!(
        version = ?code.version(),
        modules = grid.modules,
        side,
        bytes = png.get_ref().len(),
        "QR rendered"
    );

    Ok(GeneratedImage { png: png.into_inner(), width: side, height: side })
}

/// Pixel-to-module lookup over the encoded symbol.
struct ModuleGrid {
    colors: Vec<Module>,
    modules: u32,
    box_size: u32,
    border: u32,
}

impl ModuleGrid {
    fn new(code: &QrCode, style: &StyleConfig) -> Self {
        Self {
            colors: code.to_colors(),
            modules: code.width() as u32,
            box_size: style.box_size.max(1),
            border: style.border,
        }
    }

    /// `(modules + 2 * border) * box_size`, or `None` on overflow for unnormalized styles.
    fn side(&self) -> Option<u32> {
        self.border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(self.modules))
            .and_then(|span| span.checked_mul(self.box_size))
    }

    fn is_dark(&self, x: u32, y: u32) -> bool {
        let (mx, my) = (x / self.box_size, y / self.box_size);
        let inner = self.border..self.border + self.modules;
        if !inner.contains(&mx) || !inner.contains(&my) {
            return false;
        }
        let index = (my - self.border) * self.modules + (mx - self.border);
        self.colors.get(index as usize).is_some_and(|module| *module == Module::Dark)
    }
}
