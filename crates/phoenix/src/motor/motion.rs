//! Motion profile points and buffer status.

use std::ffi::c_int;

use ctre_phoenix_sys::{SetValueMotionProfile, TrajectoryDuration};

use crate::device::Device;
use crate::error::Result;

/// One point of a motion profile, as pushed into the top-level buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    /// Position to servo to, in sensor units.
    pub position: f64,
    /// Velocity to feed forward, in sensor units per 100 ms.
    pub velocity: f64,
    /// Target of the auxiliary loop.
    pub auxiliary_pos: f64,
    /// Profile slot for the primary loop.
    pub profile_slot_select0: u32,
    /// Profile slot for the auxiliary loop.
    pub profile_slot_select1: u32,
    /// Set on the final point; the controller holds it once reached.
    pub is_last_point: bool,
    /// Zero the selected sensor when this point is processed.
    pub zero_pos: bool,
    /// Added to the base trajectory period configured on the controller.
    pub time_dur: TrajectoryDuration,
}

impl Default for TrajectoryPoint {
    fn default() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            auxiliary_pos: 0.0,
            profile_slot_select0: 0,
            profile_slot_select1: 0,
            is_last_point: false,
            zero_pos: false,
            time_dur: TrajectoryDuration::Ms0,
        }
    }
}

/// Snapshot of the motion profile buffers and the active point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionProfileStatus {
    /// Free slots in the top-level buffer.
    pub top_buffer_rem: i32,
    /// Points waiting in the top-level buffer.
    pub top_buffer_cnt: i32,
    /// Points already moved into the controller.
    pub btm_buffer_cnt: i32,
    /// Latched when the controller ran out of points; cleared explicitly.
    pub has_underrun: bool,
    /// The controller is out of points right now.
    pub is_underrun: bool,
    /// Whether the active point fields below are meaningful.
    pub active_point_valid: bool,
    /// The active point is the last one.
    pub is_last: bool,
    /// Profile slot of the active point's primary loop.
    pub profile_slot_select0: i32,
    /// Output state the controller applies.
    pub output_enable: SetValueMotionProfile,
    /// Duration of the active point in milliseconds.
    pub time_dur_ms: i32,
    /// Profile slot of the active point's auxiliary loop.
    pub profile_slot_select1: i32,
}

#[derive(Default)]
struct RawStatus {
    top_buffer_rem: c_int,
    top_buffer_cnt: c_int,
    btm_buffer_cnt: c_int,
    has_underrun: bool,
    is_underrun: bool,
    active_point_valid: bool,
    is_last: bool,
    profile_slot_select0: c_int,
    output_enable: c_int,
    time_dur_ms: c_int,
    profile_slot_select1: c_int,
}

/// `GetMotionProfileStatus_2` fills eleven out-pointers in one call.
pub(crate) fn motion_profile_status(device: &Device) -> Result<MotionProfileStatus> {
    let mut out = RawStatus::default();
    device.invoke("c_MotController_GetMotionProfileStatus_2", |api, handle| {
        // SAFETY: `handle` is live and every out-pointer refers to a distinct
        // field of `out`, valid for one write of its declared type.
        unsafe {
            (api.c_MotController_GetMotionProfileStatus_2)(
                handle,
                &raw mut out.top_buffer_rem,
                &raw mut out.top_buffer_cnt,
                &raw mut out.btm_buffer_cnt,
                &raw mut out.has_underrun,
                &raw mut out.is_underrun,
                &raw mut out.active_point_valid,
                &raw mut out.is_last,
                &raw mut out.profile_slot_select0,
                &raw mut out.output_enable,
                &raw mut out.time_dur_ms,
                &raw mut out.profile_slot_select1,
            )
        }
    })?;

    // Unknown output states are reported as disabled.
    let output_enable =
        SetValueMotionProfile::from_raw(out.output_enable).unwrap_or(SetValueMotionProfile::Disable);
    Ok(MotionProfileStatus {
        top_buffer_rem: out.top_buffer_rem,
        top_buffer_cnt: out.top_buffer_cnt,
        btm_buffer_cnt: out.btm_buffer_cnt,
        has_underrun: out.has_underrun,
        is_underrun: out.is_underrun,
        active_point_valid: out.active_point_valid,
        is_last: out.is_last,
        profile_slot_select0: out.profile_slot_select0,
        output_enable,
        time_dur_ms: out.time_dur_ms,
        profile_slot_select1: out.profile_slot_select1,
    })
}

/// Slot selectors cross the ABI as `c_int`; out-of-range values saturate.
pub(crate) fn slot_select(slot: u32) -> c_int {
    c_int::try_from(slot).unwrap_or(c_int::MAX)
}
