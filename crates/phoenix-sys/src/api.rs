//! Function table of the vendored `c_MotController_*` API.
//!
//! Field names are the exported C symbol names so a declaration can be
//! checked against the vendored header by eye. Argument order and types
//! follow the header exactly, including where out-pointers sit.

#![allow(non_snake_case)]

use std::ffi::{c_int, c_void};
use std::fmt;

use libloading::Library;

use crate::Handle;
use crate::error::SymbolError;
use crate::status::ErrorCode;

macro_rules! phoenix_api {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;
        )*
    ) => {
        /// Resolved function pointers of the vendored library.
        ///
        /// A value of this type is only as valid as the library it was
        /// resolved from; keep that library loaded for as long as the table
        /// is in use.
        #[derive(Clone, Copy)]
        pub struct MotControllerApi {
            $(
                $(#[$meta])*
                pub $name: unsafe extern "C" fn($($arg: $ty),*) $(-> $ret)?,
            )*
        }

        /// Every symbol declared by [`MotControllerApi`], in declaration order.
        pub const SYMBOLS: &[&str] = &[$(stringify!($name)),*];

        impl MotControllerApi {
            /// Resolve every declared symbol from `library`.
            ///
            /// # Errors
            ///
            /// Returns the first symbol the library does not export.
            ///
            /// # Safety
            ///
            /// `library` must be the vendored Phoenix library whose header
            /// this table was written against. The returned pointers dangle
            /// once `library` is unloaded.
            pub unsafe fn load(library: &Library) -> Result<Self, SymbolError> {
                Ok(Self {
                    $(
                        // SAFETY: the caller vouches for the declared signature.
                        $name: unsafe { resolve(library, stringify!($name))? },
                    )*
                })
            }
        }
    };
}

/// Resolve one symbol and copy the function pointer out of the library.
///
/// # Safety
///
/// `T` must be the exact function pointer type of the exported symbol.
unsafe fn resolve<T: Copy>(library: &Library, symbol: &'static str) -> Result<T, SymbolError> {
    // SAFETY: forwarded from the caller.
    let resolved = unsafe { library.get::<T>(symbol.as_bytes()) }
        .map_err(|source| SymbolError { symbol, source })?;
    Ok(*resolved)
}

/// Names of every declared symbol that `library` does not export.
///
/// Unlike [`MotControllerApi::load`] this keeps going after the first miss,
/// which is what an ABI check wants to print.
pub fn missing_symbols(library: &Library) -> Vec<&'static str> {
    SYMBOLS
        .iter()
        .copied()
        .filter(|symbol| {
            // SAFETY: the symbol is only looked up, never called or read.
            unsafe { library.get::<*const c_void>(symbol.as_bytes()) }.is_err()
        })
        .collect()
}

impl fmt::Debug for MotControllerApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotControllerApi")
            .field("symbols", &SYMBOLS.len())
            .finish_non_exhaustive()
    }
}

phoenix_api! {
    // Lifecycle
    /// Creates the device object for a base arbitration id. Returns the handle.
    fn c_MotController_Create1(base_arb_id: c_int) -> Handle;
    /// Destroys a device object created by `c_MotController_Create1`.
    fn c_MotController_Destroy(handle: Handle) -> ErrorCode;
    /// Last error recorded against the device.
    fn c_MotController_GetLastError(handle: Handle) -> ErrorCode;
    fn c_MotController_GetDeviceNumber(handle: Handle, device_number: *mut c_int) -> ErrorCode;
    fn c_MotController_GetFirmwareVersion(handle: Handle, version: *mut c_int) -> ErrorCode;
    fn c_MotController_HasResetOccurred(handle: Handle, has_reset: *mut bool) -> ErrorCode;

    // Output
    fn c_MotController_SetDemand(handle: Handle, mode: c_int, demand0: c_int, demand1: c_int) -> ErrorCode;
    fn c_MotController_Set_4(handle: Handle, mode: c_int, demand0: f64, demand1: f64, demand1_type: c_int) -> ErrorCode;
    fn c_MotController_SetNeutralMode(handle: Handle, neutral_mode: c_int);
    fn c_MotController_SetSensorPhase(handle: Handle, phase_sensor: bool);
    fn c_MotController_SetInverted(handle: Handle, invert: bool);
    fn c_MotController_ConfigOpenLoopRamp(handle: Handle, seconds_from_neutral_to_full: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigClosedLoopRamp(handle: Handle, seconds_from_neutral_to_full: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigPeakOutputForward(handle: Handle, percent_out: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigPeakOutputReverse(handle: Handle, percent_out: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigNominalOutputForward(handle: Handle, percent_out: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigNominalOutputReverse(handle: Handle, percent_out: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigNeutralDeadband(handle: Handle, percent_deadband: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigVoltageCompSaturation(handle: Handle, voltage: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigVoltageMeasurementFilter(handle: Handle, filter_window_samples: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_EnableVoltageCompensation(handle: Handle, enable: bool);

    // Telemetry
    fn c_MotController_GetBusVoltage(handle: Handle, voltage: *mut f64) -> ErrorCode;
    fn c_MotController_GetMotorOutputPercent(handle: Handle, percent_output: *mut f64) -> ErrorCode;
    fn c_MotController_GetOutputCurrent(handle: Handle, current: *mut f64) -> ErrorCode;
    fn c_MotController_GetTemperature(handle: Handle, temperature: *mut f64) -> ErrorCode;

    // Feedback
    fn c_MotController_ConfigSelectedFeedbackSensor(handle: Handle, feedback_device: c_int, pid_idx: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigSelectedFeedbackCoefficient(handle: Handle, coefficient: f64, pid_idx: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigRemoteFeedbackFilter(handle: Handle, device_id: c_int, remote_sensor_source: c_int, remote_ordinal: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigSensorTerm(handle: Handle, sensor_term: c_int, feedback_device: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_GetSelectedSensorPosition(handle: Handle, position: *mut c_int, pid_idx: c_int) -> ErrorCode;
    fn c_MotController_GetSelectedSensorVelocity(handle: Handle, velocity: *mut c_int, pid_idx: c_int) -> ErrorCode;
    fn c_MotController_SetSelectedSensorPosition(handle: Handle, sensor_pos: c_int, pid_idx: c_int, timeout_ms: c_int) -> ErrorCode;

    // Frames
    fn c_MotController_SetControlFramePeriod(handle: Handle, frame: c_int, period_ms: c_int) -> ErrorCode;
    fn c_MotController_SetStatusFramePeriod(handle: Handle, frame: c_int, period_ms: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_GetStatusFramePeriod(handle: Handle, frame: c_int, period_ms: *mut c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigVelocityMeasurementPeriod(handle: Handle, period: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigVelocityMeasurementWindow(handle: Handle, window_size: c_int, timeout_ms: c_int) -> ErrorCode;

    // Limits
    fn c_MotController_ConfigForwardLimitSwitchSource(handle: Handle, source: c_int, normal_open_or_close: c_int, device_id: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigReverseLimitSwitchSource(handle: Handle, source: c_int, normal_open_or_close: c_int, device_id: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_OverrideLimitSwitchesEnable(handle: Handle, enable: bool);
    fn c_MotController_ConfigForwardSoftLimitThreshold(handle: Handle, forward_sensor_limit: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigReverseSoftLimitThreshold(handle: Handle, reverse_sensor_limit: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigForwardSoftLimitEnable(handle: Handle, enable: bool, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigReverseSoftLimitEnable(handle: Handle, enable: bool, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_OverrideSoftLimitsEnable(handle: Handle, enable: bool);

    // Current limiting (Talon SRX)
    fn c_MotController_ConfigPeakCurrentLimit(handle: Handle, amps: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigPeakCurrentDuration(handle: Handle, milliseconds: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigContinuousCurrentLimit(handle: Handle, amps: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_EnableCurrentLimit(handle: Handle, enable: bool);

    // Closed loop
    fn c_MotController_Config_kP(handle: Handle, slot_idx: c_int, value: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_Config_kI(handle: Handle, slot_idx: c_int, value: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_Config_kD(handle: Handle, slot_idx: c_int, value: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_Config_kF(handle: Handle, slot_idx: c_int, value: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_Config_IntegralZone(handle: Handle, slot_idx: c_int, izone: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigAllowableClosedloopError(handle: Handle, slot_idx: c_int, allowable_closed_loop_error: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigMaxIntegralAccumulator(handle: Handle, slot_idx: c_int, iaccum: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigClosedLoopPeakOutput(handle: Handle, slot_idx: c_int, percent_out: f64, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigClosedLoopPeriod(handle: Handle, slot_idx: c_int, loop_time_ms: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_SetIntegralAccumulator(handle: Handle, iaccum: f64, pid_idx: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_GetClosedLoopError(handle: Handle, closed_loop_error: *mut c_int, pid_idx: c_int) -> ErrorCode;
    fn c_MotController_GetIntegralAccumulator(handle: Handle, iaccum: *mut f64, pid_idx: c_int) -> ErrorCode;
    fn c_MotController_GetErrorDerivative(handle: Handle, derror: *mut f64, pid_idx: c_int) -> ErrorCode;
    fn c_MotController_SelectProfileSlot(handle: Handle, slot_idx: c_int, pid_idx: c_int) -> ErrorCode;
    fn c_MotController_GetClosedLoopTarget(handle: Handle, target: *mut c_int, pid_idx: c_int) -> ErrorCode;

    // Motion magic
    fn c_MotController_GetActiveTrajectoryPosition(handle: Handle, position: *mut c_int) -> ErrorCode;
    fn c_MotController_GetActiveTrajectoryVelocity(handle: Handle, velocity: *mut c_int) -> ErrorCode;
    fn c_MotController_GetActiveTrajectoryHeading(handle: Handle, heading: *mut f64) -> ErrorCode;
    fn c_MotController_ConfigMotionCruiseVelocity(handle: Handle, sensor_units_per_100ms: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigMotionAcceleration(handle: Handle, sensor_units_per_100ms_per_sec: c_int, timeout_ms: c_int) -> ErrorCode;

    // Motion profile
    fn c_MotController_ClearMotionProfileTrajectories(handle: Handle) -> ErrorCode;
    fn c_MotController_GetMotionProfileTopLevelBufferCount(handle: Handle, value: *mut c_int) -> ErrorCode;
    /// Appends one point to the top-level buffer.
    fn c_MotController_PushMotionProfileTrajectory_2(
        handle: Handle,
        position: f64,
        velocity: f64,
        auxiliary_pos: f64,
        profile_slot_select0: c_int,
        profile_slot_select1: c_int,
        is_last_point: bool,
        zero_pos: bool,
        duration_ms: c_int,
    ) -> ErrorCode;
    fn c_MotController_IsMotionProfileTopLevelBufferFull(handle: Handle, value: *mut bool) -> ErrorCode;
    /// Moves points from the top-level buffer into the controller.
    fn c_MotController_ProcessMotionProfileBuffer(handle: Handle) -> ErrorCode;
    fn c_MotController_GetMotionProfileStatus_2(
        handle: Handle,
        top_buffer_rem: *mut c_int,
        top_buffer_cnt: *mut c_int,
        btm_buffer_cnt: *mut c_int,
        has_underrun: *mut bool,
        is_underrun: *mut bool,
        active_point_valid: *mut bool,
        is_last: *mut bool,
        profile_slot_select0: *mut c_int,
        output_enable: *mut c_int,
        time_dur_ms: *mut c_int,
        profile_slot_select1: *mut c_int,
    ) -> ErrorCode;
    fn c_MotController_ClearMotionProfileHasUnderrun(handle: Handle, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ChangeMotionControlFramePeriod(handle: Handle, period_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigMotionProfileTrajectoryPeriod(handle: Handle, base_traj_duration_ms: c_int, timeout_ms: c_int) -> ErrorCode;

    // Faults
    fn c_MotController_GetFaults(handle: Handle, fault_bits: *mut c_int) -> ErrorCode;
    fn c_MotController_GetStickyFaults(handle: Handle, fault_bits: *mut c_int) -> ErrorCode;
    fn c_MotController_ClearStickyFaults(handle: Handle, timeout_ms: c_int) -> ErrorCode;

    // Custom parameters
    fn c_MotController_ConfigSetCustomParam(handle: Handle, new_value: c_int, param_index: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_ConfigGetCustomParam(handle: Handle, read_value: *mut c_int, param_index: c_int, timeout_ms: c_int) -> ErrorCode;

    // Raw parameters
    fn c_MotController_ConfigSetParameter(
        handle: Handle,
        param: c_int,
        value: f64,
        sub_value: c_int,
        ordinal: c_int,
        timeout_ms: c_int,
    ) -> ErrorCode;
    fn c_MotController_ConfigGetParameter(
        handle: Handle,
        param: c_int,
        value: *mut f64,
        ordinal: c_int,
        timeout_ms: c_int,
    ) -> ErrorCode;

    // Sensor collection (Talon SRX)
    fn c_MotController_GetAnalogIn(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_SetAnalogPosition(handle: Handle, new_position: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_GetAnalogInRaw(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetAnalogInVel(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetQuadraturePosition(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_SetQuadraturePosition(handle: Handle, new_position: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_GetQuadratureVelocity(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetPulseWidthPosition(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_SetPulseWidthPosition(handle: Handle, new_position: c_int, timeout_ms: c_int) -> ErrorCode;
    fn c_MotController_GetPulseWidthVelocity(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetPulseWidthRiseToFallUs(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetPulseWidthRiseToRiseUs(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetPinStateQuadA(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetPinStateQuadB(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_GetPinStateQuadIdx(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_IsFwdLimitSwitchClosed(handle: Handle, value: *mut c_int) -> ErrorCode;
    fn c_MotController_IsRevLimitSwitchClosed(handle: Handle, value: *mut c_int) -> ErrorCode;
}
