//! Talon SRX.

use std::fmt;
use std::sync::Arc;

use ctre_phoenix_sys::{
    FeedbackDevice, LimitSwitchNormal, LimitSwitchSource, StatusFrameEnhanced, VelocityMeasPeriod,
};

use crate::device::Device;
use crate::error::Result;
use crate::library::PhoenixLibrary;

use super::{
    BaseMotorController, SensorCollection, Sealed, arbitration_id, cci_call, cci_void,
    status_frame_period,
};

/// Arbitration id base of a Talon SRX; the device number fills the low bits.
pub const TALON_SRX_BASE_ARB_ID: i32 = 0x0204_0000;

/// A Talon SRX motor controller.
///
/// Owns its [`Device`]; dropping the controller releases the native handle.
pub struct TalonSrx {
    device: Device,
    device_number: i32,
}

impl TalonSrx {
    /// Create the controller with CAN device number `device_number`, `[0, 62]`.
    ///
    /// # Errors
    ///
    /// - [`PhoenixError::Config`](crate::PhoenixError::Config) if the device number is out of range
    /// - [`PhoenixError::Initialization`](crate::PhoenixError::Initialization) if the native create call fails
    pub fn new(library: &Arc<PhoenixLibrary>, device_number: i32) -> Result<Self> {
        let arb_id = arbitration_id(device_number, TALON_SRX_BASE_ARB_ID)?;
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

    /// Raw readings of the sensors wired into this controller.
    pub fn sensor_collection(&self) -> SensorCollection<'_> {
        SensorCollection::new(&self.device)
    }

    /// Select a local feedback device for a PID loop.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_local_feedback_sensor(
        &self,
        feedback_device: FeedbackDevice,
        pid_idx: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigSelectedFeedbackSensor(feedback_device.raw(), pid_idx, timeout_ms)
        )
    }

    /// Period of a Talon SRX status frame.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn set_enhanced_status_frame_period(
        &self,
        frame: StatusFrameEnhanced,
        period_ms: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_SetStatusFramePeriod(frame.raw(), period_ms, timeout_ms)
        )
    }

    /// Current period of a Talon SRX status frame.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn get_enhanced_status_frame_period(
        &self,
        frame: StatusFrameEnhanced,
        timeout_ms: i32,
    ) -> Result<i32> {
        status_frame_period(&self.device, frame.raw(), timeout_ms)
    }

    /// Sample period of the velocity measurement.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_velocity_measurement_period(
        &self,
        period: VelocityMeasPeriod,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigVelocityMeasurementPeriod(period.raw(), timeout_ms)
        )
    }

    /// Number of samples in the rolling velocity average, a power of two up to 64.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_velocity_measurement_window(&self, window_size: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigVelocityMeasurementWindow(window_size, timeout_ms)
        )
    }

    /// Forward limit switch wired to this controller or a neighbour.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_local_forward_limit_switch_source(
        &self,
        source: LimitSwitchSource,
        normal_open_or_close: LimitSwitchNormal,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigForwardLimitSwitchSource(
                source.raw(),
                normal_open_or_close.raw(),
                0,
                timeout_ms,
            )
        )
    }

    /// Reverse limit switch wired to this controller or a neighbour.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_local_reverse_limit_switch_source(
        &self,
        source: LimitSwitchSource,
        normal_open_or_close: LimitSwitchNormal,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigReverseLimitSwitchSource(
                source.raw(),
                normal_open_or_close.raw(),
                0,
                timeout_ms,
            )
        )
    }

    /// Current above which the peak limit starts counting, in amperes.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_peak_current_limit(&self, amps: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigPeakCurrentLimit(amps, timeout_ms)
        )
    }

    /// How long the peak current may last before the continuous limit applies.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_peak_current_duration(&self, milliseconds: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigPeakCurrentDuration(milliseconds, timeout_ms)
        )
    }

    /// Current held once the peak duration has elapsed, in amperes.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall) on a non-zero status.
    pub fn config_continuous_current_limit(&self, amps: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device,
            c_MotController_ConfigContinuousCurrentLimit(amps, timeout_ms)
        )
    }

    /// Enable current limiting.
    pub fn enable_current_limit(&self, enable: bool) {
        cci_void!(self.device, c_MotController_EnableCurrentLimit(enable));
    }
}

impl Sealed for TalonSrx {
    fn device(&self) -> &Device {
        &self.device
    }
}

impl BaseMotorController for TalonSrx {}

impl fmt::Debug for TalonSrx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TalonSrx")
            .field("device_number", &self.device_number)
            .field("device", &self.device)
            .finish()
    }
}

impl fmt::Display for TalonSrx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TalonSRX(id={})", self.device_number)
    }
}
