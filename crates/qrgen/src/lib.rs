//! Facade crate for the QR generator service.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `qrgen` with the `server` feature to get the routers.
//! - Call `qrgen::init` to register feature slices; extend as new slices appear.

pub use qrgen_domain as domain;
use qrgen_domain::config::AppConfig;
use qrgen_domain::registry::InitializedSlice;
pub use qrgen_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        #[cfg(feature = "generator")]
        pub use qrgen_generator::server::router as generator_router;
        pub use qrgen_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "generator")]
    pub use qrgen_generator as generator;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "generator")]
        "generator",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled feature slices.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &AppConfig,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // QR generation
    #[cfg(feature = "generator")]
    slices.push(features::generator::init(config)?);

    #[cfg(not(feature = "generator"))]
    let _ = config;

    Ok(slices)
}
