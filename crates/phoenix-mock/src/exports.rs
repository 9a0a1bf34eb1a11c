//! Exported `c_MotController_*` functions.
//!
//! Signatures mirror `MotControllerApi` exactly; the table returned by
//! [`api`] points at these very functions.

use std::ffi::c_int;

use ctre_phoenix_sys::{ErrorCode, Handle, MotControllerApi, status};

use crate::state::{self, MockArg, MotionProfile, PushedPoint};

/// Conversion from the stored `f64` to a getter's out type.
trait FromStored: Copy {
    fn from_stored(value: f64) -> Self;
}

impl FromStored for f64 {
    fn from_stored(value: f64) -> Self {
        value
    }
}

impl FromStored for c_int {
    #[allow(clippy::cast_possible_truncation)]
    fn from_stored(value: f64) -> Self {
        value as c_int
    }
}

impl FromStored for bool {
    fn from_stored(value: f64) -> Self {
        value != 0.0
    }
}

/// Write a getter result if the call succeeded.
///
/// # Safety
///
/// `out` must be null or valid for one write of `T`.
unsafe fn write_out<T: FromStored>(out: *mut T, (code, value): (c_int, f64)) -> ErrorCode {
    if code == status::OK && !out.is_null() {
        // SAFETY: non-null and valid for one write per the caller.
        unsafe { out.write(T::from_stored(value)) };
    }
    code
}

macro_rules! mock_status {
    ($(
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?)
            $(=> $getter:ident[$key:tt] = $value:expr)?;
    )*) => {
        $(
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(handle: Handle, $($arg: $ty),*) -> ErrorCode {
                state::call(
                    handle,
                    stringify!($name),
                    vec![$(MockArg::from($arg)),*],
                    |_device| {
                        $( _device.store(stringify!($getter), $key, f64::from($value)); )?
                    },
                )
            }
        )*
    };
}

macro_rules! mock_void {
    ($(fn $name:ident($($arg:ident: $ty:ty),* $(,)?);)*) => {
        $(
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(handle: Handle, $($arg: $ty),*) {
                state::call(handle, stringify!($name), vec![$(MockArg::from($arg)),*], |_| ());
            }
        )*
    };
}

macro_rules! mock_get {
    ($(fn $name:ident($($arg:ident: $ty:ty),* $(,)?) -> $out:ty;)*) => {
        $(
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(handle: Handle, out: *mut $out, $($arg: $ty),*) -> ErrorCode {
                let args = vec![$(MockArg::from($arg)),*];
                let key = state::key_of(&args);
                let result = state::read(handle, stringify!($name), key, args);
                // SAFETY: the caller passes an out-pointer valid for one write.
                unsafe { write_out(out, result) }
            }
        )*
    };
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_Create1(base_arb_id: c_int) -> Handle {
    state::create(base_arb_id)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_Destroy(handle: Handle) -> ErrorCode {
    state::destroy(handle)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_GetLastError(handle: Handle) -> ErrorCode {
    state::last_error(handle)
}

// The frame comes before the out-pointer here.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_GetStatusFramePeriod(
    handle: Handle,
    frame: c_int,
    period_ms: *mut c_int,
    timeout_ms: c_int,
) -> ErrorCode {
    let args = vec![MockArg::from(frame), MockArg::from(timeout_ms)];
    let result = state::read(handle, "c_MotController_GetStatusFramePeriod", frame, args);
    // SAFETY: the caller passes an out-pointer valid for one write.
    unsafe { write_out(period_ms, result) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_ConfigGetParameter(
    handle: Handle,
    param: c_int,
    value: *mut f64,
    ordinal: c_int,
    timeout_ms: c_int,
) -> ErrorCode {
    let args = vec![MockArg::from(param), MockArg::from(ordinal), MockArg::from(timeout_ms)];
    let result = state::read(handle, "c_MotController_ConfigGetParameter", param, args);
    // SAFETY: the caller passes an out-pointer valid for one write.
    unsafe { write_out(value, result) }
}

/// Record a getter answered from the device's motion profile buffers.
///
/// # Safety
///
/// `out` must be null or valid for one write of `T`.
unsafe fn motion_get<T: FromStored>(
    handle: Handle,
    function: &'static str,
    out: *mut T,
    read: impl FnOnce(&MotionProfile) -> f64,
) -> ErrorCode {
    let mut value = 0.0;
    let code = state::call(handle, function, Vec::new(), |device| {
        value = read(&device.motion_profile);
    });
    // SAFETY: forwarded from the caller.
    unsafe { write_out(out, (code, value)) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_ClearMotionProfileTrajectories(handle: Handle) -> ErrorCode {
    state::call(handle, "c_MotController_ClearMotionProfileTrajectories", Vec::new(), |device| {
        device.motion_profile.clear();
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_GetMotionProfileTopLevelBufferCount(
    handle: Handle,
    value: *mut c_int,
) -> ErrorCode {
    // SAFETY: the caller passes an out-pointer valid for one write.
    unsafe {
        motion_get(handle, "c_MotController_GetMotionProfileTopLevelBufferCount", value, |mp| {
            f64::from(mp.top)
        })
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_IsMotionProfileTopLevelBufferFull(
    handle: Handle,
    value: *mut bool,
) -> ErrorCode {
    // SAFETY: the caller passes an out-pointer valid for one write.
    unsafe {
        motion_get(handle, "c_MotController_IsMotionProfileTopLevelBufferFull", value, |mp| {
            f64::from(u8::from(mp.top >= state::MOTION_PROFILE_CAPACITY))
        })
    }
}

#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn c_MotController_PushMotionProfileTrajectory_2(
    handle: Handle,
    position: f64,
    velocity: f64,
    auxiliary_pos: f64,
    profile_slot_select0: c_int,
    profile_slot_select1: c_int,
    is_last_point: bool,
    zero_pos: bool,
    duration_ms: c_int,
) -> ErrorCode {
    let args = vec![
        MockArg::from(position),
        MockArg::from(velocity),
        MockArg::from(auxiliary_pos),
        MockArg::from(profile_slot_select0),
        MockArg::from(profile_slot_select1),
        MockArg::from(is_last_point),
        MockArg::from(zero_pos),
        MockArg::from(duration_ms),
    ];
    let point = PushedPoint {
        slot0: profile_slot_select0,
        slot1: profile_slot_select1,
        is_last: is_last_point,
        duration_ms,
    };
    state::call_status(handle, "c_MotController_PushMotionProfileTrajectory_2", args, |device| {
        device.motion_profile.push(point)
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_ProcessMotionProfileBuffer(handle: Handle) -> ErrorCode {
    state::call(handle, "c_MotController_ProcessMotionProfileBuffer", Vec::new(), |device| {
        device.motion_profile.process();
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn c_MotController_ClearMotionProfileHasUnderrun(
    handle: Handle,
    timeout_ms: c_int,
) -> ErrorCode {
    let args = vec![MockArg::from(timeout_ms)];
    state::call(handle, "c_MotController_ClearMotionProfileHasUnderrun", args, |device| {
        device.motion_profile.has_underrun = false;
    })
}

/// Write one status field.
///
/// # Safety
///
/// `out` must be null or valid for one write of `T`.
unsafe fn put<T>(out: *mut T, value: T) {
    if !out.is_null() {
        // SAFETY: non-null and valid for one write per the caller.
        unsafe { out.write(value) };
    }
}

// Output enable is scripted through `MockSession::set_value`; the rest
// reflects the device's buffers.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn c_MotController_GetMotionProfileStatus_2(
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
) -> ErrorCode {
    const NAME: &str = "c_MotController_GetMotionProfileStatus_2";
    let mut profile = MotionProfile::default();
    let code = state::call(handle, NAME, Vec::new(), |device| profile = device.motion_profile);
    if code != status::OK {
        return code;
    }
    let enable = c_int::from_stored(state::value(handle, NAME, 0));
    let active = profile.active;
    // SAFETY: the caller passes eleven out-pointers, each valid for one write.
    unsafe {
        put(top_buffer_rem, state::MOTION_PROFILE_CAPACITY - profile.top);
        put(top_buffer_cnt, profile.top);
        put(btm_buffer_cnt, profile.bottom);
        put(has_underrun, profile.has_underrun);
        put(is_underrun, profile.is_underrun());
        put(active_point_valid, active.is_some());
        put(is_last, active.is_some_and(|p| p.is_last));
        put(profile_slot_select0, active.map_or(0, |p| p.slot0));
        put(output_enable, enable);
        put(time_dur_ms, active.map_or(0, |p| p.duration_ms));
        put(profile_slot_select1, active.map_or(0, |p| p.slot1));
    }
    code
}

mock_status! {
    fn c_MotController_SetDemand(mode: c_int, demand0: c_int, demand1: c_int);
    fn c_MotController_Set_4(mode: c_int, demand0: f64, demand1: f64, demand1_type: c_int);
    fn c_MotController_ConfigOpenLoopRamp(seconds_from_neutral_to_full: f64, timeout_ms: c_int);
    fn c_MotController_ConfigClosedLoopRamp(seconds_from_neutral_to_full: f64, timeout_ms: c_int);
    fn c_MotController_ConfigPeakOutputForward(percent_out: f64, timeout_ms: c_int);
    fn c_MotController_ConfigPeakOutputReverse(percent_out: f64, timeout_ms: c_int);
    fn c_MotController_ConfigNominalOutputForward(percent_out: f64, timeout_ms: c_int);
    fn c_MotController_ConfigNominalOutputReverse(percent_out: f64, timeout_ms: c_int);
    fn c_MotController_ConfigNeutralDeadband(percent_deadband: f64, timeout_ms: c_int);
    fn c_MotController_ConfigVoltageCompSaturation(voltage: f64, timeout_ms: c_int);
    fn c_MotController_ConfigVoltageMeasurementFilter(filter_window_samples: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigSelectedFeedbackSensor(feedback_device: c_int, pid_idx: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigSelectedFeedbackCoefficient(coefficient: f64, pid_idx: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigRemoteFeedbackFilter(device_id: c_int, remote_sensor_source: c_int, remote_ordinal: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigSensorTerm(sensor_term: c_int, feedback_device: c_int, timeout_ms: c_int);
    fn c_MotController_SetSelectedSensorPosition(sensor_pos: c_int, pid_idx: c_int, timeout_ms: c_int)
        => c_MotController_GetSelectedSensorPosition[pid_idx] = sensor_pos;
    fn c_MotController_SetControlFramePeriod(frame: c_int, period_ms: c_int);
    fn c_MotController_SetStatusFramePeriod(frame: c_int, period_ms: c_int, timeout_ms: c_int)
        => c_MotController_GetStatusFramePeriod[frame] = period_ms;
    fn c_MotController_ConfigVelocityMeasurementPeriod(period: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigVelocityMeasurementWindow(window_size: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigForwardLimitSwitchSource(source: c_int, normal_open_or_close: c_int, device_id: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigReverseLimitSwitchSource(source: c_int, normal_open_or_close: c_int, device_id: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigForwardSoftLimitThreshold(forward_sensor_limit: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigReverseSoftLimitThreshold(reverse_sensor_limit: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigForwardSoftLimitEnable(enable: bool, timeout_ms: c_int);
    fn c_MotController_ConfigReverseSoftLimitEnable(enable: bool, timeout_ms: c_int);
    fn c_MotController_ConfigPeakCurrentLimit(amps: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigPeakCurrentDuration(milliseconds: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigContinuousCurrentLimit(amps: c_int, timeout_ms: c_int);
    fn c_MotController_Config_kP(slot_idx: c_int, value: f64, timeout_ms: c_int);
    fn c_MotController_Config_kI(slot_idx: c_int, value: f64, timeout_ms: c_int);
    fn c_MotController_Config_kD(slot_idx: c_int, value: f64, timeout_ms: c_int);
    fn c_MotController_Config_kF(slot_idx: c_int, value: f64, timeout_ms: c_int);
    fn c_MotController_Config_IntegralZone(slot_idx: c_int, izone: f64, timeout_ms: c_int);
    fn c_MotController_ConfigAllowableClosedloopError(slot_idx: c_int, allowable_closed_loop_error: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigMaxIntegralAccumulator(slot_idx: c_int, iaccum: f64, timeout_ms: c_int);
    fn c_MotController_ConfigClosedLoopPeakOutput(slot_idx: c_int, percent_out: f64, timeout_ms: c_int);
    fn c_MotController_ConfigClosedLoopPeriod(slot_idx: c_int, loop_time_ms: c_int, timeout_ms: c_int);
    fn c_MotController_SetIntegralAccumulator(iaccum: f64, pid_idx: c_int, timeout_ms: c_int)
        => c_MotController_GetIntegralAccumulator[pid_idx] = iaccum;
    fn c_MotController_SelectProfileSlot(slot_idx: c_int, pid_idx: c_int);
    fn c_MotController_ConfigMotionCruiseVelocity(sensor_units_per_100ms: c_int, timeout_ms: c_int);
    fn c_MotController_ConfigMotionAcceleration(sensor_units_per_100ms_per_sec: c_int, timeout_ms: c_int);
    fn c_MotController_ChangeMotionControlFramePeriod(period_ms: c_int);
    fn c_MotController_ConfigMotionProfileTrajectoryPeriod(base_traj_duration_ms: c_int, timeout_ms: c_int);
    fn c_MotController_ClearStickyFaults(timeout_ms: c_int)
        => c_MotController_GetStickyFaults[0] = 0;
    fn c_MotController_ConfigSetCustomParam(new_value: c_int, param_index: c_int, timeout_ms: c_int)
        => c_MotController_ConfigGetCustomParam[param_index] = new_value;
    fn c_MotController_ConfigSetParameter(param: c_int, value: f64, sub_value: c_int, ordinal: c_int, timeout_ms: c_int)
        => c_MotController_ConfigGetParameter[param] = value;
    fn c_MotController_SetAnalogPosition(new_position: c_int, timeout_ms: c_int)
        => c_MotController_GetAnalogIn[0] = new_position;
    fn c_MotController_SetQuadraturePosition(new_position: c_int, timeout_ms: c_int)
        => c_MotController_GetQuadraturePosition[0] = new_position;
    fn c_MotController_SetPulseWidthPosition(new_position: c_int, timeout_ms: c_int)
        => c_MotController_GetPulseWidthPosition[0] = new_position;
}

mock_void! {
    fn c_MotController_SetNeutralMode(neutral_mode: c_int);
    fn c_MotController_SetSensorPhase(phase_sensor: bool);
    fn c_MotController_SetInverted(invert: bool);
    fn c_MotController_EnableVoltageCompensation(enable: bool);
    fn c_MotController_OverrideLimitSwitchesEnable(enable: bool);
    fn c_MotController_OverrideSoftLimitsEnable(enable: bool);
    fn c_MotController_EnableCurrentLimit(enable: bool);
}

mock_get! {
    fn c_MotController_GetDeviceNumber() -> c_int;
    fn c_MotController_GetFirmwareVersion() -> c_int;
    fn c_MotController_HasResetOccurred() -> bool;
    fn c_MotController_GetBusVoltage() -> f64;
    fn c_MotController_GetMotorOutputPercent() -> f64;
    fn c_MotController_GetOutputCurrent() -> f64;
    fn c_MotController_GetTemperature() -> f64;
    fn c_MotController_GetSelectedSensorPosition(pid_idx: c_int) -> c_int;
    fn c_MotController_GetSelectedSensorVelocity(pid_idx: c_int) -> c_int;
    fn c_MotController_GetClosedLoopError(pid_idx: c_int) -> c_int;
    fn c_MotController_GetIntegralAccumulator(pid_idx: c_int) -> f64;
    fn c_MotController_GetErrorDerivative(pid_idx: c_int) -> f64;
    fn c_MotController_GetClosedLoopTarget(pid_idx: c_int) -> c_int;
    fn c_MotController_GetActiveTrajectoryPosition() -> c_int;
    fn c_MotController_GetActiveTrajectoryVelocity() -> c_int;
    fn c_MotController_GetActiveTrajectoryHeading() -> f64;
    fn c_MotController_GetFaults() -> c_int;
    fn c_MotController_GetStickyFaults() -> c_int;
    fn c_MotController_ConfigGetCustomParam(param_index: c_int, timeout_ms: c_int) -> c_int;
    fn c_MotController_GetAnalogIn() -> c_int;
    fn c_MotController_GetAnalogInRaw() -> c_int;
    fn c_MotController_GetAnalogInVel() -> c_int;
    fn c_MotController_GetQuadraturePosition() -> c_int;
    fn c_MotController_GetQuadratureVelocity() -> c_int;
    fn c_MotController_GetPulseWidthPosition() -> c_int;
    fn c_MotController_GetPulseWidthVelocity() -> c_int;
    fn c_MotController_GetPulseWidthRiseToFallUs() -> c_int;
    fn c_MotController_GetPulseWidthRiseToRiseUs() -> c_int;
    fn c_MotController_GetPinStateQuadA() -> c_int;
    fn c_MotController_GetPinStateQuadB() -> c_int;
    fn c_MotController_GetPinStateQuadIdx() -> c_int;
    fn c_MotController_IsFwdLimitSwitchClosed() -> c_int;
    fn c_MotController_IsRevLimitSwitchClosed() -> c_int;
}

/// Function table pointing at the mock exports.
pub fn api() -> MotControllerApi {
    MotControllerApi {
        c_MotController_Create1,
        c_MotController_Destroy,
        c_MotController_GetLastError,
        c_MotController_GetDeviceNumber,
        c_MotController_GetFirmwareVersion,
        c_MotController_HasResetOccurred,
        c_MotController_SetDemand,
        c_MotController_Set_4,
        c_MotController_SetNeutralMode,
        c_MotController_SetSensorPhase,
        c_MotController_SetInverted,
        c_MotController_ConfigOpenLoopRamp,
        c_MotController_ConfigClosedLoopRamp,
        c_MotController_ConfigPeakOutputForward,
        c_MotController_ConfigPeakOutputReverse,
        c_MotController_ConfigNominalOutputForward,
        c_MotController_ConfigNominalOutputReverse,
        c_MotController_ConfigNeutralDeadband,
        c_MotController_ConfigVoltageCompSaturation,
        c_MotController_ConfigVoltageMeasurementFilter,
        c_MotController_EnableVoltageCompensation,
        c_MotController_GetBusVoltage,
        c_MotController_GetMotorOutputPercent,
        c_MotController_GetOutputCurrent,
        c_MotController_GetTemperature,
        c_MotController_ConfigSelectedFeedbackSensor,
        c_MotController_ConfigSelectedFeedbackCoefficient,
        c_MotController_ConfigRemoteFeedbackFilter,
        c_MotController_ConfigSensorTerm,
        c_MotController_GetSelectedSensorPosition,
        c_MotController_GetSelectedSensorVelocity,
        c_MotController_SetSelectedSensorPosition,
        c_MotController_SetControlFramePeriod,
        c_MotController_SetStatusFramePeriod,
        c_MotController_GetStatusFramePeriod,
        c_MotController_ConfigVelocityMeasurementPeriod,
        c_MotController_ConfigVelocityMeasurementWindow,
        c_MotController_ConfigForwardLimitSwitchSource,
        c_MotController_ConfigReverseLimitSwitchSource,
        c_MotController_OverrideLimitSwitchesEnable,
        c_MotController_ConfigForwardSoftLimitThreshold,
        c_MotController_ConfigReverseSoftLimitThreshold,
        c_MotController_ConfigForwardSoftLimitEnable,
        c_MotController_ConfigReverseSoftLimitEnable,
        c_MotController_OverrideSoftLimitsEnable,
        c_MotController_ConfigPeakCurrentLimit,
        c_MotController_ConfigPeakCurrentDuration,
        c_MotController_ConfigContinuousCurrentLimit,
        c_MotController_EnableCurrentLimit,
        c_MotController_Config_kP,
        c_MotController_Config_kI,
        c_MotController_Config_kD,
        c_MotController_Config_kF,
        c_MotController_Config_IntegralZone,
        c_MotController_ConfigAllowableClosedloopError,
        c_MotController_ConfigMaxIntegralAccumulator,
        c_MotController_ConfigClosedLoopPeakOutput,
        c_MotController_ConfigClosedLoopPeriod,
        c_MotController_SetIntegralAccumulator,
        c_MotController_GetClosedLoopError,
        c_MotController_GetIntegralAccumulator,
        c_MotController_GetErrorDerivative,
        c_MotController_SelectProfileSlot,
        c_MotController_GetClosedLoopTarget,
        c_MotController_GetActiveTrajectoryPosition,
        c_MotController_GetActiveTrajectoryVelocity,
        c_MotController_GetActiveTrajectoryHeading,
        c_MotController_ConfigMotionCruiseVelocity,
        c_MotController_ConfigMotionAcceleration,
        c_MotController_ClearMotionProfileTrajectories,
        c_MotController_GetMotionProfileTopLevelBufferCount,
        c_MotController_PushMotionProfileTrajectory_2,
        c_MotController_IsMotionProfileTopLevelBufferFull,
        c_MotController_ProcessMotionProfileBuffer,
        c_MotController_GetMotionProfileStatus_2,
        c_MotController_ClearMotionProfileHasUnderrun,
        c_MotController_ChangeMotionControlFramePeriod,
        c_MotController_ConfigMotionProfileTrajectoryPeriod,
        c_MotController_GetFaults,
        c_MotController_GetStickyFaults,
        c_MotController_ClearStickyFaults,
        c_MotController_ConfigSetCustomParam,
        c_MotController_ConfigGetCustomParam,
        c_MotController_ConfigSetParameter,
        c_MotController_ConfigGetParameter,
        c_MotController_GetAnalogIn,
        c_MotController_SetAnalogPosition,
        c_MotController_GetAnalogInRaw,
        c_MotController_GetAnalogInVel,
        c_MotController_GetQuadraturePosition,
        c_MotController_SetQuadraturePosition,
        c_MotController_GetQuadratureVelocity,
        c_MotController_GetPulseWidthPosition,
        c_MotController_SetPulseWidthPosition,
        c_MotController_GetPulseWidthVelocity,
        c_MotController_GetPulseWidthRiseToFallUs,
        c_MotController_GetPulseWidthRiseToRiseUs,
        c_MotController_GetPinStateQuadA,
        c_MotController_GetPinStateQuadB,
        c_MotController_GetPinStateQuadIdx,
        c_MotController_IsFwdLimitSwitchClosed,
        c_MotController_IsRevLimitSwitchClosed,
    }
}
