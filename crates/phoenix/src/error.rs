//! Error types for the Phoenix bindings.

use std::fmt;
use std::path::PathBuf;

use ctre_phoenix_sys::status;
use thiserror::Error;

/// Status code reported by the vendored library.
///
/// Zero is success; every other value is a failure whose meaning is listed
/// in the vendor documentation under the name returned by [`ErrorCode::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Success.
    pub const OK: Self = Self(status::OK);
    /// The device handle is not known to the vendored library.
    pub const INVALID_HANDLE: Self = Self(status::INVALID_HANDLE);
    /// No response from the device within the timeout.
    pub const RX_TIMEOUT: Self = Self(status::RX_TIMEOUT);
    /// A parameter was out of range.
    pub const INVALID_PARAM_VALUE: Self = Self(status::INVALID_PARAM_VALUE);

    /// Wrap a raw status code.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw status code, exactly as returned by the native call.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether this code is success.
    pub const fn is_ok(self) -> bool {
        self.0 == status::OK
    }

    /// Whether the vendor classifies this code as a warning rather than an error.
    pub const fn is_warning(self) -> bool {
        self.0 > 0
    }

    /// Vendor name of the code, if known.
    pub fn name(self) -> Option<&'static str> {
        status::name(self.0)
    }

    /// `Ok(())` for success, otherwise a [`PhoenixError::NativeCall`] naming `function`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] for any non-zero code.
    pub fn check(self, function: &'static str) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(PhoenixError::NativeCall {
                function,
                code: self,
            })
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "unknown ({})", self.0),
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

/// Error type for Phoenix operations.
#[derive(Error, Debug)]
pub enum PhoenixError {
    /// The vendored shared library could not be opened.
    #[error("Failed to load native library {path}: {reason}")]
    LibraryLoad {
        /// Path handed to the loader.
        path: PathBuf,
        /// Loader message.
        reason: String,
    },

    /// The vendored library does not export a declared symbol.
    #[error("Native library is missing symbol {symbol}: {reason}")]
    MissingSymbol {
        /// Symbol name from the vendored header.
        symbol: &'static str,
        /// Loader message.
        reason: String,
    },

    /// The native create call failed; no handle was produced.
    #[error("{function} failed for arbitration id {base_arb_id:#010x}: {code}")]
    Initialization {
        /// Native function that reported the failure.
        function: &'static str,
        /// Arbitration id the device was created for.
        base_arb_id: i32,
        /// Native status.
        code: ErrorCode,
    },

    /// A native call on a live device reported a failure.
    #[error("{function} returned {code}")]
    NativeCall {
        /// Native function that was called.
        function: &'static str,
        /// Native status, preserved as returned.
        code: ErrorCode,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The worker thread owning the controller has stopped.
    #[error("Controller worker has stopped")]
    WorkerStopped,

    /// A blocking wait was attempted on an async runtime thread.
    #[error("run_blocking called from inside an async runtime; use run instead")]
    BlockingInRuntime,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PhoenixError {
    /// Whether the error came from locating or linking the vendored library.
    ///
    /// Link errors are fatal and never worth retrying.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            PhoenixError::LibraryLoad { .. } | PhoenixError::MissingSymbol { .. }
        )
    }

    /// The native status carried by the error, if any.
    pub fn native_code(&self) -> Option<ErrorCode> {
        match self {
            PhoenixError::Initialization { code, .. } | PhoenixError::NativeCall { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }

    /// The native function that failed, if any.
    pub fn function(&self) -> Option<&'static str> {
        match self {
            PhoenixError::Initialization { function, .. }
            | PhoenixError::NativeCall { function, .. } => Some(*function),
            _ => None,
        }
    }

    pub(crate) fn config(reason: impl fmt::Display) -> Self {
        PhoenixError::Config(reason.to_string())
    }
}

impl From<ctre_phoenix_sys::SymbolError> for PhoenixError {
    fn from(err: ctre_phoenix_sys::SymbolError) -> Self {
        PhoenixError::MissingSymbol {
            symbol: err.symbol,
            reason: err.source.to_string(),
        }
    }
}

/// A specialized `Result` type for Phoenix operations.
pub type Result<T> = std::result::Result<T, PhoenixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display_known() {
        assert_eq!(ErrorCode::RX_TIMEOUT.to_string(), "RxTimeout (-3)");
    }

    #[test]
    fn test_error_code_display_unknown() {
        assert_eq!(ErrorCode::from_raw(4242).to_string(), "unknown (4242)");
    }

    #[test]
    fn test_check_ok() {
        assert!(ErrorCode::OK.check("c_MotController_Set_4").is_ok());
    }

    #[test]
    fn test_check_preserves_code() {
        let err = match ErrorCode::from_raw(1).check("c_MotController_Set_4") {
            Err(err) => err,
            Ok(()) => panic!("status 1 must be an error"),
        };
        assert_eq!(err.native_code(), Some(ErrorCode::from_raw(1)));
        assert_eq!(err.function(), Some("c_MotController_Set_4"));
    }

    #[test]
    fn test_warning_classification() {
        assert!(ErrorCode::from_raw(100).is_warning());
        assert!(!ErrorCode::from_raw(-3).is_warning());
        assert!(!ErrorCode::OK.is_warning());
    }

    #[test]
    fn test_link_error_classification() {
        let err = PhoenixError::LibraryLoad {
            path: PathBuf::from("lib/libCTRE_PhoenixCCI.so"),
            reason: "not found".to_string(),
        };
        assert!(err.is_link_error());
        assert_eq!(err.native_code(), None);

        let err = PhoenixError::NativeCall {
            function: "c_MotController_Destroy",
            code: ErrorCode::INVALID_HANDLE,
        };
        assert!(!err.is_link_error());
    }
}
