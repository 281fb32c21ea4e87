//! On-disk copies of downloaded QR codes.

use crate::error::{GeneratorError, GeneratorErrorExt};
use chrono::{DateTime, TimeZone};
use qrgen_kernel::domain::config::ArchiveConfig;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::info;

/// Download file name for a code generated at `at`: `qr_<YYYYMMDD_HHMMSS>.png`.
pub fn file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("qr_{}.png", at.format("%Y%m%d_%H%M%S"))
}

/// Writes `png` into the archive directory, creating it if needed.
///
/// Returns the written path, or `None` when archiving is disabled. A file from the same second
/// is overwritten.
///
/// # Errors
/// Returns [`GeneratorError::Archive`] if the directory or file cannot be written.
pub fn store(
    config: &ArchiveConfig,
    file_name: &str,
    png: &[u8],
) -> Result<Option<PathBuf>, GeneratorError> {
    if !config.enabled {
        return Ok(None);
    }

    std::fs::create_dir_all(&config.dir).context("Creating archive directory")?;
    let path = config.dir.join(file_name);
    std::fs::write(&path, png).context("Writing archived QR code")?;

    info!(path = %path.display(), bytes = png.len(), "QR code archived");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn file_name_uses_second_resolution_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(file_name(&at), "qr_20240309_070502.png");
    }

    #[test]
    fn store_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArchiveConfig { enabled: true, dir: dir.path().join("nested") };

        let path = store(&config, "qr_x.png", b"first").unwrap().unwrap();
        store(&config, "qr_x.png", b"second").unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }

    #[test]
    fn disabled_archive_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArchiveConfig { enabled: false, dir: dir.path().to_path_buf() };

        assert!(store(&config, "qr_x.png", b"png").unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn unwritable_target_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();
        let config = ArchiveConfig { enabled: true, dir: blocker };

        let err = store(&config, "qr_x.png", b"png").unwrap_err();
        assert!(matches!(err, GeneratorError::Archive { .. }));
    }
}
