//! Kernel utilities shared across slices: configuration loading, the API state registry
//! and the system routes (`/`, `/health`).
//!
//! ## Config loading
//! ```rust,no_run
//! use qrgen_kernel::config::load_config;
//! use qrgen_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("server")).unwrap();
//! println!("listening on {}", cfg.server.port);
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use qrgen_domain as domain;

pub mod prelude {
    pub use crate::config::{ConfigError, load_config};
    #[cfg(feature = "server")]
    pub use crate::server::{ApiState, ErrorBody};
    pub use qrgen_domain::config::AppConfig;
}
