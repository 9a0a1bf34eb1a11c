//! Owned device handle.
//!
//! A [`Device`] is the only place a raw vendor handle lives. It is created by
//! [`Device::initialize`] and torn down exactly once, either by
//! [`Device::release`] or when it is dropped. Native calls are forwarded only
//! from inside this crate; the handle and the function table never leave it.
//!
//! Releasing consumes the device, so a second release does not compile:
//!
//! ```compile_fail
//! use ctre_phoenix::{Device, PhoenixLibrary};
//!
//! fn twice(device: Device) {
//!     let _ = device.release();
//!     let _ = device.release();
//! }
//! ```
//!
//! A device may move to another thread but cannot be shared between threads
//! without external synchronization:
//!
//! ```compile_fail
//! use ctre_phoenix::Device;
//!
//! fn assert_sync<T: Sync>() {}
//! assert_sync::<Device>();
//! ```

use std::ffi::{c_int, c_void};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use ctre_phoenix_sys::{Handle, MotControllerApi};

use crate::error::{ErrorCode, PhoenixError, Result};
use crate::library::PhoenixLibrary;

/// An initialized device handle, exclusively owned.
pub struct Device {
    library: Arc<PhoenixLibrary>,
    // `None` once released.
    handle: Option<NonNull<c_void>>,
    base_arb_id: i32,
}

// SAFETY: the vendored library does not tie a handle to the thread that
// created it. `Device` is deliberately not `Sync`, so calls on one handle
// are never made from two threads at once.
unsafe impl Send for Device {}

impl Device {
    /// Create the native device object for `base_arb_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::Initialization`] if the create call returns a
    /// null handle or records a non-zero error against the new handle. In
    /// the latter case the half-created handle is destroyed before
    /// returning.
    pub fn initialize(library: &Arc<PhoenixLibrary>, base_arb_id: i32) -> Result<Self> {
        let api = library.api();

        // SAFETY: `c_MotController_Create1` takes a plain integer.
        let raw = unsafe { (api.c_MotController_Create1)(base_arb_id as c_int) };

        let Some(handle) = NonNull::new(raw) else {
            tracing::warn!(base_arb_id, "c_MotController_Create1 returned a null handle");
            return Err(PhoenixError::Initialization {
                function: "c_MotController_Create1",
                base_arb_id,
                code: ErrorCode::INVALID_HANDLE,
            });
        };

        // SAFETY: `handle` was just returned by the create call.
        let code = ErrorCode::from_raw(unsafe { (api.c_MotController_GetLastError)(handle.as_ptr()) });
        if !code.is_ok() {
            // SAFETY: the handle is live and never used again after this.
            let destroyed = unsafe { (api.c_MotController_Destroy)(handle.as_ptr()) };
            tracing::warn!(
                base_arb_id,
                code = %code,
                destroy_status = destroyed,
                "Device creation reported an error"
            );
            return Err(PhoenixError::Initialization {
                function: "c_MotController_Create1",
                base_arb_id,
                code,
            });
        }

        tracing::info!(
            base_arb_id,
            handle = handle.as_ptr() as usize,
            "Device initialized"
        );

        Ok(Self {
            library: Arc::clone(library),
            handle: Some(handle),
            base_arb_id,
        })
    }

    /// Arbitration id the device was created for.
    pub fn base_arb_id(&self) -> i32 {
        self.base_arb_id
    }

    /// Numeric value of the native handle, for diagnostics only.
    pub fn handle_id(&self) -> usize {
        self.handle.map_or(0, |h| h.as_ptr() as usize)
    }

    /// The library this device was created from.
    pub fn library(&self) -> &Arc<PhoenixLibrary> {
        &self.library
    }

    fn raw(&self) -> Handle {
        // `handle` is only `None` inside `release`/`drop`, after which the
        // device is gone.
        self.handle.map_or(std::ptr::null_mut(), NonNull::as_ptr)
    }

    /// Forward a native call that returns a status code.
    ///
    /// `function` names the native symbol for diagnostics. `call` receives
    /// the function table and the live handle and must call exactly one
    /// native function with them.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] carrying the exact status if it
    /// is non-zero.
    pub(crate) fn invoke<F>(&self, function: &'static str, call: F) -> Result<()>
    where
        F: FnOnce(&MotControllerApi, Handle) -> c_int,
    {
        let status = ErrorCode::from_raw(call(self.library.api(), self.raw()));
        tracing::trace!(function, handle = self.handle_id(), status = status.raw(), "native call");
        status.check(function).inspect_err(|_| {
            tracing::warn!(
                function,
                base_arb_id = self.base_arb_id,
                code = %status,
                "Native call failed"
            );
        })
    }

    /// Forward a native call that writes its result through an out-pointer.
    ///
    /// `call` receives a pointer valid for one write of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] if the status is non-zero; the
    /// out value is discarded in that case.
    pub(crate) fn query<T, F>(&self, function: &'static str, call: F) -> Result<T>
    where
        T: Copy + Default,
        F: FnOnce(&MotControllerApi, Handle, *mut T) -> c_int,
    {
        let mut value = T::default();
        self.invoke(function, |api, handle| call(api, handle, &raw mut value))?;
        Ok(value)
    }

    /// Forward a native call that reports nothing.
    ///
    /// Failures of such calls are only visible through [`last_error`](Self::last_error).
    pub(crate) fn invoke_void<F>(&self, function: &'static str, call: F)
    where
        F: FnOnce(&MotControllerApi, Handle),
    {
        call(self.library.api(), self.raw());
        tracing::trace!(function, handle = self.handle_id(), "native call");
    }

    /// Last error the vendored library recorded against this device.
    pub fn last_error(&self) -> ErrorCode {
        let api = self.library.api();
        // SAFETY: the handle is live while `self` is borrowed.
        ErrorCode::from_raw(unsafe { (api.c_MotController_GetLastError)(self.raw()) })
    }

    /// Destroy the native device object.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] if the destroy call reports a
    /// non-zero status. The handle is gone either way.
    pub fn release(mut self) -> Result<()> {
        self.destroy()
    }

    fn destroy(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let api = self.library.api();
        // SAFETY: `take` guarantees this is the only destroy call for the handle.
        let status = ErrorCode::from_raw(unsafe { (api.c_MotController_Destroy)(handle.as_ptr()) });
        tracing::debug!(
            base_arb_id = self.base_arb_id,
            handle = handle.as_ptr() as usize,
            status = status.raw(),
            "Device released"
        );
        status.check("c_MotController_Destroy")
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        if let Err(e) = self.destroy() {
            tracing::warn!(
                base_arb_id = self.base_arb_id,
                error = %e,
                "Device teardown failed during drop"
            );
        }
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("base_arb_id", &format_args!("{:#010x}", self.base_arb_id))
            .field("handle", &self.handle_id())
            .finish()
    }
}
