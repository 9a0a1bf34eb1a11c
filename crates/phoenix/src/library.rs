//! Loading the vendored shared library.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ctre_phoenix_sys::{Library, MotControllerApi, SYMBOLS};

use crate::config::PhoenixConfig;
use crate::error::{PhoenixError, Result};

/// The vendored library with its resolved function table.
///
/// Devices hold an `Arc` to this, so the library stays mapped until the
/// last device created from it has been released.
pub struct PhoenixLibrary {
    api: MotControllerApi,
    path: Option<PathBuf>,
    // Must outlive every pointer in `api`.
    _library: Option<Library>,
}

impl PhoenixLibrary {
    /// Open the staged library described by `config` and resolve every
    /// declared symbol.
    ///
    /// # Errors
    ///
    /// - [`PhoenixError::Config`] if the configuration is invalid
    /// - [`PhoenixError::LibraryLoad`] if the file cannot be opened as a library
    /// - [`PhoenixError::MissingSymbol`] if a declared symbol is not exported
    pub fn load(config: &PhoenixConfig) -> Result<Arc<Self>> {
        config.validate()?;
        Self::load_path(&config.library_path())
    }

    /// Open the library at `path` and resolve every declared symbol.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_path(path: &Path) -> Result<Arc<Self>> {
        // SAFETY: loading runs the library's initializers. The staged file
        // is the vendored Phoenix binary, whose initializers have no
        // preconditions.
        let library = unsafe { Library::new(path) }.map_err(|e| PhoenixError::LibraryLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // SAFETY: `MotControllerApi` is the ABI snapshot of this library, and
        // the table is stored next to the `Library` it points into.
        let api = unsafe { MotControllerApi::load(&library) }.inspect_err(|e| {
            tracing::error!(
                path = %path.display(),
                symbol = e.symbol,
                "Vendored library does not match the declared ABI"
            );
        })?;

        tracing::info!(
            path = %path.display(),
            symbols = SYMBOLS.len(),
            "Phoenix library loaded"
        );

        Ok(Arc::new(Self {
            api,
            path: Some(path.to_path_buf()),
            _library: Some(library),
        }))
    }

    /// Wrap a function table that is already resolved, such as a statically
    /// linked shim or a test double.
    ///
    /// # Safety
    ///
    /// Every pointer in `api` must stay valid for the lifetime of the
    /// returned value and must implement the vendored contract.
    pub unsafe fn from_api(api: MotControllerApi) -> Arc<Self> {
        Arc::new(Self {
            api,
            path: None,
            _library: None,
        })
    }

    /// The resolved function table.
    pub(crate) fn api(&self) -> &MotControllerApi {
        &self.api
    }

    /// Path the library was loaded from, if it was loaded from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl fmt::Debug for PhoenixLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoenixLibrary")
            .field("path", &self.path)
            .field("api", &self.api)
            .finish()
    }
}
