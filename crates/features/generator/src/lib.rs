//! # QR Generator
//!
//! Turns a link or free text into a styled QR code PNG.
//!
//! * [`style`]: lenient normalization of the client supplied style.
//! * [`request`]: body parsing and link validation.
//! * [`render`]: QR encoding and rasterization to PNG.
//! * [`archive`]: on-disk copies of downloaded codes.
//!
//! The `server` feature adds the Axum handlers (`POST /generate`, `POST /generate-preview`).
//!
//! ```rust
//! use qrgen_generator::render::render_png;
//! use qrgen_generator::style::normalize_style;
//!
//! let style = normalize_style(Some(&serde_json::json!({ "boxSize": 8 })));
//! let image = render_png("https://example.com", &style).unwrap();
//! assert!(image.png.starts_with(b"\x89PNG"));
//! ```

pub mod archive;
mod error;
pub mod render;
pub mod request;
#[cfg(feature = "server")]
pub mod server;
pub mod style;

pub use crate::error::{GeneratorError, GeneratorErrorExt};
use qrgen_kernel::domain::config::{AppConfig, ArchiveConfig};
use qrgen_kernel::domain::registry::InitializedSlice;

/// Generator feature state.
#[qrgen_derive::qrgen_slice]
pub struct Generator {
    /// Where `POST /generate` keeps its copies.
    pub archive: ArchiveConfig,
}

/// Initialize the generator feature.
///
/// # Errors
/// Returns [`GeneratorError::Internal`] when the archive directory is set to an empty path.
pub fn init(config: &AppConfig) -> Result<InitializedSlice, GeneratorError> {
    let archive = config.archive.clone();
    if archive.enabled && archive.dir.as_os_str().is_empty() {
        return Err(GeneratorError::Internal {
            message: "archive.dir must not be empty".into(),
            context: Some("Generator init".into()),
        });
    }

    tracing::info!(
        archive = archive.enabled,
        dir = %archive.dir.display(),
        "Generator slice initialized"
    );

    Ok(InitializedSlice::new(Generator::new(GeneratorInner { archive })))
}
