//! In-process stand-in for the vendored Phoenix library.
//!
//! Exports every `c_MotController_*` symbol with the vendored signature and
//! records what it was called with. Use it two ways:
//! - in tests, wrap [`api`] with `PhoenixLibrary::from_api`
//! - off-robot, build the `cdylib` and point `PHOENIX_LIB_DIR` /
//!   `PHOENIX_LIB_NAME` at it (`ctre_phoenix_mock`)
//!
//! Behaviour is scripted per thread through [`MockSession`]: handle
//! allocation, failing or null creates, injected statuses and getter values.
//! Counters and the call log let tests assert that every handle opened was
//! closed exactly once and that arguments arrived unchanged.

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(non_snake_case, clippy::missing_safety_doc)]
#![warn(rust_2018_idioms)]

mod exports;
mod state;

pub use exports::*;
pub use state::{MOTION_PROFILE_CAPACITY, MockArg, MockCall, MockSession};
