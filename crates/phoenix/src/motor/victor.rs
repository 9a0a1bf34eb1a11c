//! Victor SPX.

use std::fmt;
use std::sync::Arc;

use crate::device::Device;
use crate::error::Result;
use crate::library::PhoenixLibrary;

use super::{BaseMotorController, Sealed, arbitration_id};

/// Arbitration id base of a Victor SPX; the device number fills the low bits.
pub const VICTOR_SPX_BASE_ARB_ID: i32 = 0x0104_0000;

/// A Victor SPX motor controller.
///
/// Has no local sensor inputs or current limiting; everything it supports
/// is on [`BaseMotorController`].
pub struct VictorSpx {
    device: Device,
    device_number: i32,
}

impl VictorSpx {
    /// Create the controller with CAN device number `device_number`, `[0, 62]`.
    ///
    /// # Errors
    ///
    /// - [`PhoenixError::Config`](crate::PhoenixError::Config) if the device number is out of range
    /// - [`PhoenixError::Initialization`](crate::PhoenixError::Initialization) if the native create call fails
    pub fn new(library: &Arc<PhoenixLibrary>, device_number: i32) -> Result<Self> {
        let arb_id = arbitration_id(device_number, VICTOR_SPX_BASE_ARB_ID)?;
        let device = Device::initialize(library, arb_id)?;
        Ok(Self {
            device,
            device_number,
        })
    }

    /// Device number the controller was created with.
    pub fn device_number(&self) -> i32 {
        self.device_number
    }

    /// Release the native handle.
    ///
    /// # Errors
    ///
    /// See [`Device::release`].
    pub fn release(self) -> Result<()> {
        self.device.release()
    }
}

impl Sealed for VictorSpx {
    fn device(&self) -> &Device {
        &self.device
    }
}

impl BaseMotorController for VictorSpx {}

impl fmt::Debug for VictorSpx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VictorSpx")
            .field("device_number", &self.device_number)
            .field("device", &self.device)
            .finish()
    }
}

impl fmt::Display for VictorSpx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VictorSPX(id={})", self.device_number)
    }
}
