//! Raw sensor readings of a Talon SRX.

use crate::device::Device;
use crate::error::Result;

use super::{cci_call, cci_get};

/// Direct access to the sensors wired into a Talon SRX, bypassing the
/// selected feedback device.
///
/// Obtained from [`TalonSrx::sensor_collection`](super::TalonSrx::sensor_collection)
/// and borrows the controller for as long as it lives.
#[derive(Debug, Clone, Copy)]
pub struct SensorCollection<'a> {
    device: &'a Device,
}

impl<'a> SensorCollection<'a> {
    pub(crate) fn new(device: &'a Device) -> Self {
        Self { device }
    }

    /// Analog input position, 10 bits with overflow tracking.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_analog_in(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetAnalogIn())
    }

    /// Overwrite the analog input position.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn set_analog_position(&self, new_position: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_SetAnalogPosition(new_position, timeout_ms)
        )
    }

    /// Analog input as a raw 10-bit sample, `[0, 1023]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_analog_in_raw(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetAnalogInRaw())
    }

    /// Analog input velocity in units per 100 ms.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_analog_in_vel(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetAnalogInVel())
    }

    /// Quadrature encoder position.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_quadrature_position(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetQuadraturePosition())
    }

    /// Overwrite the quadrature encoder position.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn set_quadrature_position(&self, new_position: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_SetQuadraturePosition(new_position, timeout_ms)
        )
    }

    /// Quadrature encoder velocity in units per 100 ms.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_quadrature_velocity(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetQuadratureVelocity())
    }

    /// Pulse width position, 12 bits with overflow tracking.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_pulse_width_position(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetPulseWidthPosition())
    }

    /// Overwrite the pulse width position.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn set_pulse_width_position(&self, new_position: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_SetPulseWidthPosition(new_position, timeout_ms)
        )
    }

    /// Pulse width velocity in units per 100 ms.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_pulse_width_velocity(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetPulseWidthVelocity())
    }

    /// Time from rising to falling edge of the pulse width signal, in microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_pulse_width_rise_to_fall_us(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetPulseWidthRiseToFallUs())
    }

    /// Period of the pulse width signal, in microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_pulse_width_rise_to_rise_us(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetPulseWidthRiseToRiseUs())
    }

    /// Level of the quadrature A pin, 1 when high.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_pin_state_quad_a(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetPinStateQuadA())
    }

    /// Level of the quadrature B pin, 1 when high.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_pin_state_quad_b(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetPinStateQuadB())
    }

    /// Level of the quadrature index pin, 1 when high.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_pin_state_quad_idx(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_GetPinStateQuadIdx())
    }

    /// 1 if the forward limit switch is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn is_fwd_limit_switch_closed(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_IsFwdLimitSwitchClosed())
    }

    /// 1 if the reverse limit switch is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn is_rev_limit_switch_closed(&self) -> Result<i32> {
        cci_get!(self.device, c_MotController_IsRevLimitSwitchClosed())
    }
}
