//! Safe Rust bindings for CTRE Phoenix CAN motor controllers.
//!
//! This crate wraps the vendored Phoenix C library (`CTRE_PhoenixCCI`) with:
//! - [`PhoenixLibrary`]: loads the staged shared library and checks that it
//!   exports every declared symbol
//! - [`Device`]: an exclusively owned native handle, released exactly once
//! - [`TalonSrx`] / [`VictorSpx`]: typed motor controller operations through
//!   the sealed [`BaseMotorController`] trait
//! - [`SharedController`] and [`ControllerWorker`]: the two supported ways
//!   to use one controller from several threads or from async code
//!
//! # Errors
//!
//! Every native status is checked. Zero is success; anything else becomes a
//! [`PhoenixError`] that names the native function and preserves the exact
//! [`ErrorCode`]. Failures to locate or link the library are reported as
//! link errors ([`PhoenixError::is_link_error`]) and are never retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use ctre_phoenix::prelude::*;
//!
//! fn main() -> ctre_phoenix::Result<()> {
//!     let library = PhoenixLibrary::load(&PhoenixConfig::from_env())?;
//!
//!     let left = TalonSrx::new(&library, 1)?;
//!     let right = VictorSpx::new(&library, 2)?;
//!     right.follow(&left, FollowerType::PercentOutput)?;
//!
//!     left.config_peak_output_forward(0.5, 10)?;
//!     left.set(ControlMode::PercentOutput, 0.25, DemandType::Neutral, 0.0)?;
//!     println!("bus voltage: {}", left.get_bus_voltage()?);
//!
//!     left.release()?;
//!     Ok(())
//! }
//! ```
//!
//! # Thread safety
//!
//! The vendored library is not assumed to be thread safe per handle.
//! Controllers are `Send` but not `Sync`; share them with
//! [`SharedController`] or hand them to a [`ControllerWorker`].

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod device;
pub mod error;
pub mod faults;
pub mod library;
pub mod motor;
pub mod prelude;
pub mod shared;
pub mod worker;

pub use config::PhoenixConfig;
pub use device::Device;
pub use error::{ErrorCode, PhoenixError, Result};
pub use faults::{Faults, StickyFaults};
pub use library::PhoenixLibrary;
pub use motor::{
    BaseMotorController, MotionProfileStatus, SensorCollection, TalonSrx, TrajectoryPoint, VictorSpx,
};
pub use shared::SharedController;
pub use worker::ControllerWorker;

pub use ctre_phoenix_sys::{
    ControlFrame, ControlMode, DemandType, FeedbackDevice, FollowerType, LimitSwitchNormal,
    LimitSwitchSource, NeutralMode, ParamEnum, RemoteFeedbackDevice, RemoteLimitSwitchSource,
    RemoteSensorSource, SensorTerm, SetValueMotionProfile, StatusFrame, StatusFrameEnhanced,
    TrajectoryDuration, VelocityMeasPeriod,
};

/// Names of every symbol the bindings resolve, in declaration order.
pub fn declared_symbols() -> &'static [&'static str] {
    ctre_phoenix_sys::SYMBOLS
}

/// Open the library at `path` and list every declared symbol it does not export.
///
/// Unlike [`PhoenixLibrary::load_path`] this does not stop at the first
/// missing symbol and never resolves a function for calling.
///
/// # Errors
///
/// Returns [`PhoenixError::LibraryLoad`] if the file cannot be opened.
pub fn missing_symbols(path: &std::path::Path) -> Result<Vec<&'static str>> {
    // SAFETY: loading runs the library's initializers, which for the staged
    // vendored binary have no preconditions. Nothing is called.
    let library = unsafe { ctre_phoenix_sys::Library::new(path) }.map_err(|e| {
        PhoenixError::LibraryLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    let missing = ctre_phoenix_sys::missing_symbols(&library);
    tracing::debug!(
        path = %path.display(),
        declared = ctre_phoenix_sys::SYMBOLS.len(),
        missing = missing.len(),
        "Checked library exports"
    );
    Ok(missing)
}
