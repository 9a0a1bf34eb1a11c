//! Typed operations on CAN motor controllers.
//!
//! [`BaseMotorController`] carries every operation shared by the Talon SRX
//! and the Victor SPX. Each method forwards to exactly one native call on
//! the controller's [`Device`], except where noted, and reports a non-zero
//! status as [`PhoenixError::NativeCall`](crate::PhoenixError::NativeCall).
//!
//! Methods taking `timeout_ms` wait up to that long for the device to
//! confirm the write when it is non-zero. Zero sends the write without
//! waiting or checking.

mod motion;
mod sensors;
mod talon;
mod victor;

pub use motion::{MotionProfileStatus, TrajectoryPoint};
pub use sensors::SensorCollection;
pub use talon::{TALON_SRX_BASE_ARB_ID, TalonSrx};
pub use victor::{VICTOR_SPX_BASE_ARB_ID, VictorSpx};

use std::ffi::c_int;

use ctre_phoenix_sys::{
    ControlFrame, ControlMode, DemandType, FeedbackDevice, FollowerType, LimitSwitchNormal,
    NeutralMode, ParamEnum, RemoteFeedbackDevice, RemoteLimitSwitchSource, RemoteSensorSource,
    SensorTerm, StatusFrame,
};

use crate::device::Device;
use crate::error::{ErrorCode, PhoenixError, Result};
use crate::faults::{Faults, StickyFaults};

/// Highest device number a CAN motor controller accepts.
pub const MAX_DEVICE_NUMBER: i32 = 62;

/// Forward a status-returning native call on a device.
macro_rules! cci_call {
    ($device:expr, $func:ident($($arg:expr),* $(,)?)) => {
        $device.invoke(stringify!($func), |api, handle| {
            // SAFETY: `handle` is live for the duration of the call and the
            // arguments match the declared signature.
            unsafe { (api.$func)(handle, $($arg),*) }
        })
    };
}

/// Forward a native getter whose out-pointer directly follows the handle.
macro_rules! cci_get {
    ($device:expr, $func:ident($($arg:expr),* $(,)?)) => {
        $device.query(stringify!($func), |api, handle, out| {
            // SAFETY: `handle` is live, `out` is valid for one write of the
            // declared type, and the arguments match the declared signature.
            unsafe { (api.$func)(handle, out, $($arg),*) }
        })
    };
}

/// Forward a native call that returns nothing.
macro_rules! cci_void {
    ($device:expr, $func:ident($($arg:expr),* $(,)?)) => {
        $device.invoke_void(stringify!($func), |api, handle| {
            // SAFETY: `handle` is live for the duration of the call and the
            // arguments match the declared signature.
            unsafe { (api.$func)(handle, $($arg),*) }
        })
    };
}

pub(crate) use cci_call;
pub(crate) use cci_get;
pub(crate) use cci_void;

mod private {
    pub trait Sealed {
        /// The owned device handle behind this controller.
        fn device(&self) -> &crate::device::Device;
    }
}

pub(crate) use private::Sealed;

/// Check a device number and combine it with a model's arbitration base.
pub(crate) fn arbitration_id(device_number: i32, base: i32) -> Result<i32> {
    if !(0..=MAX_DEVICE_NUMBER).contains(&device_number) {
        return Err(PhoenixError::config(format!(
            "device number must be in [0, {MAX_DEVICE_NUMBER}], got {device_number}"
        )));
    }
    Ok(device_number | base)
}

/// Compact 24-bit form of an arbitration id, as a follower expects it.
///
/// Keeps the model/manufacturer word and the device number byte.
pub fn follower_id24(base_arb_id: i32) -> i32 {
    ((base_arb_id >> 16) << 8) | (base_arb_id & 0xFF)
}

/// Demand sent in follower mode.
///
/// A bare device number in `[0, 62]` is widened with the follower's own
/// model bits, so it follows a controller of the same model. Anything else
/// is already a packed id and passes through.
pub(crate) fn follower_demand(own_base_arb_id: i32, demand0: f64) -> f64 {
    // Truncation to an integer id is the protocol's intent.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let requested = demand0 as u32;
    let work = if (0.0..=f64::from(MAX_DEVICE_NUMBER)).contains(&demand0) {
        ((own_base_arb_id.cast_unsigned() >> 16) << 8) | requested
    } else {
        requested
    };
    f64::from(work)
}

/// Current demand in milliamps.
pub(crate) fn milliamps(amps: f64) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let milliamps = (1000.0 * amps) as i32;
    milliamps
}

/// Operations shared by every CTRE CAN motor controller.
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait BaseMotorController: Sealed {
    /// Arbitration id the controller was created with.
    fn base_id(&self) -> i32 {
        self.device().base_arb_id()
    }

    /// Device number as reported by the controller.
    fn device_id(&self) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetDeviceNumber())
    }

    /// Set the output.
    ///
    /// `demand0` is interpreted per `mode`:
    /// - `PercentOutput`: fraction of full output in `[-1, 1]`
    /// - `Current`: amperes, sent to the device as milliamps
    /// - `Velocity`: sensor units per 100 ms
    /// - `Position`, `MotionMagic`: sensor units
    /// - `Follower`: device number of the master, or a packed 24-bit id
    /// - `Disabled`: ignored, the device is sent a zero demand
    ///
    /// `demand1` is applied according to `demand1_type`; it is ignored in
    /// `Current` and `Disabled` modes.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] if the device rejects the demand.
    fn set(
        &self,
        mode: ControlMode,
        demand0: f64,
        demand1_type: DemandType,
        demand1: f64,
    ) -> Result<()> {
        let device = self.device();
        match mode {
            ControlMode::Follower => {
                let work = follower_demand(self.base_id(), demand0);
                cci_call!(
                    device,
                    c_MotController_Set_4(mode.raw(), work, demand1, demand1_type.raw())
                )
            }
            ControlMode::Current => cci_call!(
                device,
                c_MotController_SetDemand(mode.raw(), milliamps(demand0), 0)
            ),
            ControlMode::Disabled => {
                cci_call!(device, c_MotController_SetDemand(mode.raw(), 0, 0))
            }
            ControlMode::PercentOutput
            | ControlMode::Position
            | ControlMode::Velocity
            | ControlMode::MotionProfile
            | ControlMode::MotionMagic
            | ControlMode::MotionProfileArc => cci_call!(
                device,
                c_MotController_Set_4(mode.raw(), demand0, demand1, demand1_type.raw())
            ),
        }
    }

    /// Neutral the output by switching to `Disabled`.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set).
    fn neutral_output(&self) -> Result<()> {
        self.set(ControlMode::Disabled, 0.0, DemandType::Neutral, 0.0)
    }

    /// Mode of operation during neutral output.
    fn set_neutral_mode(&self, neutral_mode: NeutralMode) {
        cci_void!(self.device(), c_MotController_SetNeutralMode(neutral_mode.raw()));
    }

    /// Invert the sensor so that positive output moves the sensor positively.
    fn set_sensor_phase(&self, phase_sensor: bool) {
        cci_void!(self.device(), c_MotController_SetSensorPhase(phase_sensor));
    }

    /// Invert the motor output.
    fn set_inverted(&self, invert: bool) {
        cci_void!(self.device(), c_MotController_SetInverted(invert));
    }

    /// Seconds to ramp from neutral to full output in open loop. Zero disables ramping.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_open_loop_ramp(
        &self,
        seconds_from_neutral_to_full: f64,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigOpenLoopRamp(seconds_from_neutral_to_full, timeout_ms)
        )
    }

    /// Seconds to ramp from neutral to full output in closed loop. Zero disables ramping.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_closed_loop_ramp(
        &self,
        seconds_from_neutral_to_full: f64,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigClosedLoopRamp(seconds_from_neutral_to_full, timeout_ms)
        )
    }

    /// Forward peak output, `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_peak_output_forward(&self, percent_out: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigPeakOutputForward(percent_out, timeout_ms)
        )
    }

    /// Reverse peak output, `[-1, 0]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_peak_output_reverse(&self, percent_out: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigPeakOutputReverse(percent_out, timeout_ms)
        )
    }

    /// Forward nominal output, `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_nominal_output_forward(&self, percent_out: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigNominalOutputForward(percent_out, timeout_ms)
        )
    }

    /// Reverse nominal output, `[-1, 0]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_nominal_output_reverse(&self, percent_out: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigNominalOutputReverse(percent_out, timeout_ms)
        )
    }

    /// Output below this fraction is treated as neutral. The device clamps
    /// it to `[0.001, 0.25]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_neutral_deadband(&self, percent_deadband: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigNeutralDeadband(percent_deadband, timeout_ms)
        )
    }

    /// Voltage that full output maps to while compensation is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_voltage_comp_saturation(&self, voltage: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigVoltageCompSaturation(voltage, timeout_ms)
        )
    }

    /// Number of samples in the bus voltage filter.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_voltage_measurement_filter(
        &self,
        filter_window_samples: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigVoltageMeasurementFilter(filter_window_samples, timeout_ms)
        )
    }

    /// Enable voltage compensation.
    fn enable_voltage_compensation(&self, enable: bool) {
        cci_void!(self.device(), c_MotController_EnableVoltageCompensation(enable));
    }

    /// Bus voltage seen by the controller, in volts.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_bus_voltage(&self) -> Result<f64> {
        cci_get!(self.device(), c_MotController_GetBusVoltage())
    }

    /// Applied output as a fraction in `[-1, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_motor_output_percent(&self) -> Result<f64> {
        cci_get!(self.device(), c_MotController_GetMotorOutputPercent())
    }

    /// Applied output in volts: bus voltage times output percent.
    ///
    /// Makes two native calls.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's error.
    fn get_motor_output_voltage(&self) -> Result<f64> {
        Ok(self.get_bus_voltage()? * self.get_motor_output_percent()?)
    }

    /// Output current in amperes.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_output_current(&self) -> Result<f64> {
        cci_get!(self.device(), c_MotController_GetOutputCurrent())
    }

    /// Controller temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_temperature(&self) -> Result<f64> {
        cci_get!(self.device(), c_MotController_GetTemperature())
    }

    /// Select a remote or virtual feedback device for a PID loop.
    ///
    /// `pid_idx` is 0 for the primary loop and 1 for the auxiliary loop.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_selected_feedback_sensor(
        &self,
        feedback_device: RemoteFeedbackDevice,
        pid_idx: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigSelectedFeedbackSensor(feedback_device.raw(), pid_idx, timeout_ms)
        )
    }

    /// Scale the selected feedback sensor by `coefficient`, `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_selected_feedback_coefficient(
        &self,
        coefficient: f64,
        pid_idx: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigSelectedFeedbackCoefficient(coefficient, pid_idx, timeout_ms)
        )
    }

    /// Bind remote sensor slot `remote_ordinal` (0 or 1) to a signal on
    /// another CAN device.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_remote_feedback_filter(
        &self,
        device_id: i32,
        remote_sensor_source: RemoteSensorSource,
        remote_ordinal: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigRemoteFeedbackFilter(
                device_id,
                remote_sensor_source.raw(),
                remote_ordinal,
                timeout_ms,
            )
        )
    }

    /// Feed `feedback_device` into one term of the sensor sum or difference.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_sensor_term(
        &self,
        sensor_term: SensorTerm,
        feedback_device: FeedbackDevice,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigSensorTerm(sensor_term.raw(), feedback_device.raw(), timeout_ms)
        )
    }

    /// Selected sensor position in raw units.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_selected_sensor_position(&self, pid_idx: i32) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetSelectedSensorPosition(pid_idx))
    }

    /// Selected sensor velocity in raw units per 100 ms.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_selected_sensor_velocity(&self, pid_idx: i32) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetSelectedSensorVelocity(pid_idx))
    }

    /// Overwrite the selected sensor position.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn set_selected_sensor_position(
        &self,
        sensor_pos: i32,
        pid_idx: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_SetSelectedSensorPosition(sensor_pos, pid_idx, timeout_ms)
        )
    }

    /// Period of an outgoing control frame.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn set_control_frame_period(&self, frame: ControlFrame, period_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_SetControlFramePeriod(frame.raw(), period_ms)
        )
    }

    /// Period of an incoming status frame.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn set_status_frame_period(
        &self,
        frame: StatusFrame,
        period_ms: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_SetStatusFramePeriod(frame.raw(), period_ms, timeout_ms)
        )
    }

    /// Current period of an incoming status frame.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_status_frame_period(&self, frame: StatusFrame, timeout_ms: i32) -> Result<i32> {
        status_frame_period(self.device(), frame.raw(), timeout_ms)
    }

    /// Use a limit switch on another CAN device as the forward limit.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_forward_limit_switch_source(
        &self,
        source: RemoteLimitSwitchSource,
        normal_open_or_close: LimitSwitchNormal,
        device_id: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigForwardLimitSwitchSource(
                source.raw(),
                normal_open_or_close.raw(),
                device_id,
                timeout_ms,
            )
        )
    }

    /// Use a limit switch on another CAN device as the reverse limit.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_reverse_limit_switch_source(
        &self,
        source: RemoteLimitSwitchSource,
        normal_open_or_close: LimitSwitchNormal,
        device_id: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigReverseLimitSwitchSource(
                source.raw(),
                normal_open_or_close.raw(),
                device_id,
                timeout_ms,
            )
        )
    }

    /// Enable or disable both limit switches without touching their configuration.
    fn override_limit_switches_enable(&self, enable: bool) {
        cci_void!(self.device(), c_MotController_OverrideLimitSwitchesEnable(enable));
    }

    /// Forward soft limit in raw sensor units.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_forward_soft_limit_threshold(
        &self,
        forward_sensor_limit: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigForwardSoftLimitThreshold(forward_sensor_limit, timeout_ms)
        )
    }

    /// Reverse soft limit in raw sensor units.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_reverse_soft_limit_threshold(
        &self,
        reverse_sensor_limit: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigReverseSoftLimitThreshold(reverse_sensor_limit, timeout_ms)
        )
    }

    /// Enable the forward soft limit.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_forward_soft_limit_enable(&self, enable: bool, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigForwardSoftLimitEnable(enable, timeout_ms)
        )
    }

    /// Enable the reverse soft limit.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_reverse_soft_limit_enable(&self, enable: bool, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigReverseSoftLimitEnable(enable, timeout_ms)
        )
    }

    /// Enable or disable both soft limits without touching their configuration.
    fn override_soft_limits_enable(&self, enable: bool) {
        cci_void!(self.device(), c_MotController_OverrideSoftLimitsEnable(enable));
    }

    /// Proportional gain of a profile slot.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_kp(&self, slot_idx: i32, value: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_Config_kP(slot_idx, value, timeout_ms))
    }

    /// Integral gain of a profile slot.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_ki(&self, slot_idx: i32, value: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_Config_kI(slot_idx, value, timeout_ms))
    }

    /// Derivative gain of a profile slot.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_kd(&self, slot_idx: i32, value: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_Config_kD(slot_idx, value, timeout_ms))
    }

    /// Feed-forward gain of a profile slot.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_kf(&self, slot_idx: i32, value: f64, timeout_ms: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_Config_kF(slot_idx, value, timeout_ms))
    }

    /// Integral zone of a profile slot, in closed-loop error units.
    ///
    /// The native call takes a double; whole units are the only meaningful values.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_integral_zone(&self, slot_idx: i32, izone: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_Config_IntegralZone(slot_idx, f64::from(izone), timeout_ms)
        )
    }

    /// Closed-loop error below which the output is neutral.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_allowable_closed_loop_error(
        &self,
        slot_idx: i32,
        allowable_closed_loop_error: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigAllowableClosedloopError(
                slot_idx,
                allowable_closed_loop_error,
                timeout_ms,
            )
        )
    }

    /// Cap on the integral accumulator of a profile slot.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_max_integral_accumulator(
        &self,
        slot_idx: i32,
        iaccum: f64,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigMaxIntegralAccumulator(slot_idx, iaccum, timeout_ms)
        )
    }

    /// Peak absolute output of a profile slot, `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_closed_loop_peak_output(
        &self,
        slot_idx: i32,
        percent_out: f64,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigClosedLoopPeakOutput(slot_idx, percent_out, timeout_ms)
        )
    }

    /// Loop period of a profile slot in milliseconds, `[1, 64]`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_closed_loop_period(
        &self,
        slot_idx: i32,
        loop_time_ms: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigClosedLoopPeriod(slot_idx, loop_time_ms, timeout_ms)
        )
    }

    /// Overwrite the integral accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn set_integral_accumulator(&self, iaccum: f64, pid_idx: i32, timeout_ms: i32) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_SetIntegralAccumulator(iaccum, pid_idx, timeout_ms)
        )
    }

    /// Current closed-loop error.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_closed_loop_error(&self, pid_idx: i32) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetClosedLoopError(pid_idx))
    }

    /// Current integral accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_integral_accumulator(&self, pid_idx: i32) -> Result<f64> {
        cci_get!(self.device(), c_MotController_GetIntegralAccumulator(pid_idx))
    }

    /// Derivative of the closed-loop error.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_error_derivative(&self, pid_idx: i32) -> Result<f64> {
        cci_get!(self.device(), c_MotController_GetErrorDerivative(pid_idx))
    }

    /// Choose which profile slot a PID loop uses.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn select_profile_slot(&self, slot_idx: i32, pid_idx: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_SelectProfileSlot(slot_idx, pid_idx))
    }

    /// Current closed-loop target.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_closed_loop_target(&self, pid_idx: i32) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetClosedLoopTarget(pid_idx))
    }

    /// Position of the active motion magic trajectory point.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_active_trajectory_position(&self) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetActiveTrajectoryPosition())
    }

    /// Velocity of the active motion magic trajectory point.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_active_trajectory_velocity(&self) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetActiveTrajectoryVelocity())
    }

    /// Heading of the active motion magic trajectory point, in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_active_trajectory_heading(&self) -> Result<f64> {
        cci_get!(self.device(), c_MotController_GetActiveTrajectoryHeading())
    }

    /// Motion magic cruise velocity in sensor units per 100 ms.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_motion_cruise_velocity(
        &self,
        sensor_units_per_100ms: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigMotionCruiseVelocity(sensor_units_per_100ms, timeout_ms)
        )
    }

    /// Motion magic acceleration in sensor units per 100 ms per second.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_motion_acceleration(
        &self,
        sensor_units_per_100ms_per_sec: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigMotionAcceleration(sensor_units_per_100ms_per_sec, timeout_ms)
        )
    }

    /// Drop every point in the top-level buffer and in the controller.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn clear_motion_profile_trajectories(&self) -> Result<()> {
        cci_call!(self.device(), c_MotController_ClearMotionProfileTrajectories())
    }

    /// Points waiting in the top-level buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_motion_profile_top_level_buffer_count(&self) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetMotionProfileTopLevelBufferCount())
    }

    /// Append one point to the top-level buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status, including
    /// when the buffer is full.
    fn push_motion_profile_trajectory(&self, point: &TrajectoryPoint) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_PushMotionProfileTrajectory_2(
                point.position,
                point.velocity,
                point.auxiliary_pos,
                motion::slot_select(point.profile_slot_select0),
                motion::slot_select(point.profile_slot_select1),
                point.is_last_point,
                point.zero_pos,
                point.time_dur.raw(),
            )
        )
    }

    /// Whether the top-level buffer has no room for another point.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn is_motion_profile_top_level_buffer_full(&self) -> Result<bool> {
        cci_get!(self.device(), c_MotController_IsMotionProfileTopLevelBufferFull())
    }

    /// Move points from the top-level buffer into the controller.
    ///
    /// Call this at least twice as often as points are consumed.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn process_motion_profile_buffer(&self) -> Result<()> {
        cci_call!(self.device(), c_MotController_ProcessMotionProfileBuffer())
    }

    /// Buffer levels and the active point of the running motion profile.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_motion_profile_status(&self) -> Result<MotionProfileStatus> {
        motion::motion_profile_status(self.device())
    }

    /// Clear the latched underrun flag.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn clear_motion_profile_has_underrun(&self, timeout_ms: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_ClearMotionProfileHasUnderrun(timeout_ms))
    }

    /// How often points are streamed to the controller while a profile runs.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn change_motion_control_frame_period(&self, period_ms: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_ChangeMotionControlFramePeriod(period_ms))
    }

    /// Base period added to each point's own duration.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_motion_profile_trajectory_period(
        &self,
        base_traj_duration_ms: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigMotionProfileTrajectoryPeriod(base_traj_duration_ms, timeout_ms)
        )
    }

    /// Last error the vendored library recorded against this controller.
    fn last_error(&self) -> ErrorCode {
        self.device().last_error()
    }

    /// Faults currently asserted.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_faults(&self) -> Result<Faults> {
        cci_get!(self.device(), c_MotController_GetFaults()).map(Faults::from_raw)
    }

    /// Faults latched since they were last cleared.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_sticky_faults(&self) -> Result<StickyFaults> {
        cci_get!(self.device(), c_MotController_GetStickyFaults()).map(StickyFaults::from_raw)
    }

    /// Clear every sticky fault.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn clear_sticky_faults(&self, timeout_ms: i32) -> Result<()> {
        cci_call!(self.device(), c_MotController_ClearStickyFaults(timeout_ms))
    }

    /// Firmware version, e.g. `0x0102` for 1.2.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn get_firmware_version(&self) -> Result<i32> {
        cci_get!(self.device(), c_MotController_GetFirmwareVersion())
    }

    /// Whether the device has reset since this was last called.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn has_reset_occurred(&self) -> Result<bool> {
        cci_get!(self.device(), c_MotController_HasResetOccurred())
    }

    /// Store a value in one of the user-defined persistent parameters (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_set_custom_param(
        &self,
        new_value: i32,
        param_index: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigSetCustomParam(new_value, param_index, timeout_ms)
        )
    }

    /// Read back a user-defined persistent parameter.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_get_custom_param(&self, param_index: i32, timeout_ms: i32) -> Result<i32> {
        cci_get!(
            self.device(),
            c_MotController_ConfigGetCustomParam(param_index, timeout_ms)
        )
    }

    /// Write a raw persistent parameter.
    ///
    /// `ordinal` selects the slot or loop the parameter applies to.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_set_parameter(
        &self,
        param: ParamEnum,
        value: f64,
        sub_value: u8,
        ordinal: i32,
        timeout_ms: i32,
    ) -> Result<()> {
        cci_call!(
            self.device(),
            c_MotController_ConfigSetParameter(
                param.raw(),
                value,
                c_int::from(sub_value),
                ordinal,
                timeout_ms,
            )
        )
    }

    /// Read back a raw persistent parameter.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_get_parameter(&self, param: ParamEnum, ordinal: i32, timeout_ms: i32) -> Result<f64> {
        let param = param.raw();
        self.device()
            .query("c_MotController_ConfigGetParameter", |api, handle, out| {
                // SAFETY: `handle` is live and `out` is valid for one write of `f64`.
                unsafe {
                    (api.c_MotController_ConfigGetParameter)(handle, param, out, ordinal, timeout_ms)
                }
            })
    }

    /// Invert the polarity of the auxiliary PID loop.
    ///
    /// # Errors
    ///
    /// Returns [`PhoenixError::NativeCall`] on a non-zero status.
    fn config_aux_pid_polarity(&self, invert: bool, timeout_ms: i32) -> Result<()> {
        self.config_set_parameter(
            ParamEnum::PidLoopPolarity,
            f64::from(u8::from(invert)),
            0,
            1,
            timeout_ms,
        )
    }

    /// Mirror the output of `master`.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set).
    fn follow<M>(&self, master: &M, follower_type: FollowerType) -> Result<()>
    where
        M: BaseMotorController + ?Sized,
        Self: Sized,
    {
        let id24 = f64::from(follower_id24(master.base_id()));
        let demand1_type = match follower_type {
            FollowerType::PercentOutput => DemandType::Neutral,
            FollowerType::AuxOutput1 => DemandType::AuxPid,
        };
        self.set(ControlMode::Follower, id24, demand1_type, 0.0)
    }
}

/// `GetStatusFramePeriod` takes the frame before its out-pointer.
pub(crate) fn status_frame_period(device: &Device, frame: i32, timeout_ms: i32) -> Result<i32> {
    device.query("c_MotController_GetStatusFramePeriod", |api, handle, out| {
        // SAFETY: `handle` is live and `out` is valid for one write of `c_int`.
        unsafe { (api.c_MotController_GetStatusFramePeriod)(handle, frame, out, timeout_ms) }
    })
}
