//! Constants shared between the kernel and feature slices.

/// `OpenAPI` tag for service-level endpoints (health, index).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the QR generation endpoints.
pub const GENERATOR_TAG: &str = "Generator";

pub const DEFAULT_PORT: u16 = 5000;
/// Prefix for structured configuration overrides (`QRGEN__SERVER__PORT`).
pub const ENV_PREFIX: &str = "QRGEN";
/// Plain listen-port variable.
pub const PORT_ENV: &str = "PORT";
/// Plain debug switch; only the value `true` (any case) enables it.
pub const DEBUG_ENV: &str = "DEBUG";
