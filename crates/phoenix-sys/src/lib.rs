//! Raw ABI declarations for the vendored CTRE Phoenix motor controller library.
//!
//! This crate is the single place where the shape of the vendored C API is
//! written down. It exposes:
//! - [`MotControllerApi`]: a table of `extern "C"` function pointers, one per
//!   `c_MotController_*` symbol, resolved at run time from the staged
//!   shared library
//! - The vendor's integer enums as `#[repr(i32)]` Rust enums
//! - The vendor's status codes as [`ErrorCode`] constants
//!
//! **Most users should NOT use this crate directly.** The `ctre-phoenix`
//! crate wraps every declaration here in an owned device type that releases
//! its handle exactly once and translates status codes into typed errors.
//!
//! # Keeping the ABI in sync
//!
//! Every declaration must match the header shipped with the vendored library
//! byte for byte. A mismatch is undefined behaviour at call time, not a
//! recoverable error. Re-check this crate against the vendored header every
//! time the vendored submodule moves, and run `phoenixctl check-abi` against
//! the freshly staged binary.
//!
//! # Safety
//!
//! All function pointers in [`MotControllerApi`] are `unsafe` to call. The
//! caller must pass a handle returned by `c_MotController_Create1` that has
//! not yet been passed to `c_MotController_Destroy`, and out-pointers that
//! are valid for a single write of the declared type.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod error;
pub mod status;
pub mod types;

pub use api::{MotControllerApi, SYMBOLS, missing_symbols};
pub use error::SymbolError;
pub use status::ErrorCode;
pub use types::*;

use std::ffi::c_void;

/// Opaque device handle returned by `c_MotController_Create1`.
pub type Handle = *mut c_void;

/// Base name of the vendored shared library, without platform prefix or
/// extension. Pass through [`libloading::library_filename`] to get the file
/// name for the current platform.
pub const PHOENIX_LIBRARY_NAME: &str = "CTRE_PhoenixCCI";

/// Directory the build was configured to read the staged artifact from.
///
/// Taken from `PHOENIX_LIB_DIR` at build time, or `lib/` at the workspace
/// root when unset.
pub const PHOENIX_STAGED_DIR: &str = env!("PHOENIX_STAGED_DIR");

pub use libloading::Library;
