//! Where to find the staged vendored library.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ctre_phoenix_sys::{PHOENIX_LIBRARY_NAME, PHOENIX_STAGED_DIR};
use serde::{Deserialize, Serialize};

use crate::error::{PhoenixError, Result};

/// Overrides the staged library directory at run time.
pub const ENV_LIB_DIR: &str = "PHOENIX_LIB_DIR";
/// Overrides the library base name at run time.
pub const ENV_LIB_NAME: &str = "PHOENIX_LIB_NAME";

/// Configuration for loading the vendored library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoenixConfig {
    /// Directory holding the staged shared library.
    ///
    /// `None` leaves the search to the platform loader.
    pub library_dir: Option<PathBuf>,
    /// Library base name without platform prefix or extension.
    pub library_name: String,
}

impl Default for PhoenixConfig {
    fn default() -> Self {
        Self {
            library_dir: Some(PathBuf::from(PHOENIX_STAGED_DIR)),
            library_name: PHOENIX_LIBRARY_NAME.to_string(),
        }
    }
}

impl PhoenixConfig {
    /// Load from `PHOENIX_LIB_DIR` / `PHOENIX_LIB_NAME`.
    ///
    /// Without `PHOENIX_LIB_DIR` the build-time staged directory is used if
    /// it exists, and the platform loader's search path otherwise. The
    /// library name falls back to the vendor's.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let library_dir =
            resolve_library_dir(std::env::var_os(ENV_LIB_DIR), Path::new(PHOENIX_STAGED_DIR));
        if library_dir.is_none() {
            tracing::debug!(
                staged_dir = PHOENIX_STAGED_DIR,
                "Staged directory missing, using the system search path"
            );
        }

        let library_name = std::env::var(ENV_LIB_NAME)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.library_name);

        Self {
            library_dir,
            library_name,
        }
    }

    /// Use the platform loader's search path instead of a fixed directory.
    pub fn system_search_path() -> Self {
        Self {
            library_dir: None,
            ..Self::default()
        }
    }

    /// Set the staged library directory.
    #[must_use]
    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    /// Set the library base name.
    #[must_use]
    pub fn with_library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = name.into();
        self
    }

    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::Config`] if the library name is empty or
    /// contains a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.library_name.trim().is_empty() {
            return Err(PhoenixError::config("library_name must not be empty"));
        }
        if self.library_name.contains(['/', '\\']) {
            return Err(PhoenixError::config(format!(
                "library_name must be a bare name, got {:?}",
                self.library_name
            )));
        }
        Ok(())
    }

    /// Platform file name of the library, e.g. `libCTRE_PhoenixCCI.so`.
    pub fn library_file_name(&self) -> PathBuf {
        PathBuf::from(libloading::library_filename(&self.library_name))
    }

    /// Full path handed to the loader.
    pub fn library_path(&self) -> PathBuf {
        match &self.library_dir {
            Some(dir) => dir.join(self.library_file_name()),
            None => self.library_file_name(),
        }
    }
}

/// An explicit directory wins; otherwise the staged one, if it exists.
fn resolve_library_dir(explicit: Option<OsString>, staged: &Path) -> Option<PathBuf> {
    if let Some(dir) = explicit.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    staged.is_dir().then(|| staged.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_vendor_name() {
        let config = PhoenixConfig::default();
        assert_eq!(config.library_name, "CTRE_PhoenixCCI");
        assert!(config.library_dir.is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_library_path_joins_dir() {
        let config = PhoenixConfig::default().with_library_dir("/opt/phoenix");
        let path = config.library_path();
        assert!(path.starts_with("/opt/phoenix"));
        let file = path.file_name().map(|f| f.to_string_lossy().into_owned());
        assert!(file.is_some_and(|f| f.contains("CTRE_PhoenixCCI")));
    }

    #[test]
    fn test_system_search_path_has_no_dir() {
        let config = PhoenixConfig::system_search_path();
        assert_eq!(config.library_path(), config.library_file_name());
    }

    #[test]
    fn test_explicit_dir_wins() -> std::io::Result<()> {
        let staged = tempfile::tempdir()?;
        let dir = resolve_library_dir(Some(OsString::from("/opt/phoenix")), staged.path());
        assert_eq!(dir, Some(PathBuf::from("/opt/phoenix")));
        Ok(())
    }

    #[test]
    fn test_existing_staged_dir_is_used() -> std::io::Result<()> {
        let staged = tempfile::tempdir()?;
        assert_eq!(
            resolve_library_dir(None, staged.path()),
            Some(staged.path().to_path_buf())
        );
        assert_eq!(
            resolve_library_dir(Some(OsString::new()), staged.path()),
            Some(staged.path().to_path_buf())
        );
        Ok(())
    }

    #[test]
    fn test_missing_staged_dir_falls_back_to_search_path() -> std::io::Result<()> {
        let staged = tempfile::tempdir()?;
        let gone = staged.path().join("not-staged");
        assert_eq!(resolve_library_dir(None, &gone), None);

        let config = PhoenixConfig {
            library_dir: resolve_library_dir(None, &gone),
            ..PhoenixConfig::default()
        };
        assert_eq!(config.library_path(), config.library_file_name());
        Ok(())
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let config = PhoenixConfig::default().with_library_name("  ");
        assert!(matches!(config.validate(), Err(PhoenixError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_path_in_name() {
        let config = PhoenixConfig::default().with_library_name("lib/CTRE_PhoenixCCI");
        assert!(matches!(config.validate(), Err(PhoenixError::Config(_))));
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = PhoenixConfig::from_json_str(r#"{"library_dir": "/usr/local/frc/lib"}"#);
        let config = match config {
            Ok(config) => config,
            Err(e) => panic!("valid JSON rejected: {e}"),
        };
        assert_eq!(config.library_dir, Some(PathBuf::from("/usr/local/frc/lib")));
        assert_eq!(config.library_name, "CTRE_PhoenixCCI");
    }

    #[test]
    fn test_from_json_rejects_invalid_name() {
        let result = PhoenixConfig::from_json_str(r#"{"library_name": ""}"#);
        assert!(matches!(result, Err(PhoenixError::Config(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = PhoenixConfig::from_json_str("{not json");
        assert!(matches!(result, Err(PhoenixError::Json(_))));
    }
}
