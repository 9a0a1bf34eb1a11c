//! Integration tests for the device lifecycle and the controller API,
//! driven through the in-process mock library.

mod common;

use ctre_phoenix::prelude::*;
use ctre_phoenix::{Result, motor};
use ctre_phoenix_mock::MockArg;
use ctre_phoenix_sys::status;

use common::mock_library;

// ============================================================================
// Device lifecycle
// ============================================================================

#[test]
fn test_initialize_then_release_balances() -> Result<()> {
    let (mock, library) = mock_library();
    let device = Device::initialize(&library, 0x0204_0001)?;
    assert_eq!(mock.live_handles(), vec![device.handle_id()]);
    device.release()?;
    assert_eq!(mock.opens(), 1);
    assert_eq!(mock.closes(), 1);
    assert!(mock.live_handles().is_empty());
    Ok(())
}

#[test]
fn test_drop_without_release_destroys_once() -> Result<()> {
    let (mock, library) = mock_library();
    let device = Device::initialize(&library, 0x0204_0001)?;
    let handle = device.handle_id();
    drop(device);
    assert_eq!(mock.destroy_count(handle), 1);
    assert_eq!(mock.opens(), mock.closes());
    Ok(())
}

#[test]
fn test_release_does_not_destroy_again_on_drop() -> Result<()> {
    let (mock, library) = mock_library();
    let device = Device::initialize(&library, 0x0204_0001)?;
    let handle = device.handle_id();
    device.release()?;
    assert_eq!(mock.destroy_count(handle), 1);
    Ok(())
}

#[test]
fn test_scenario_handle_42() -> Result<()> {
    let (mock, library) = mock_library();
    mock.set_next_handle(42);

    let talon = TalonSrx::new(&library, 1)?;
    talon.set(ControlMode::PercentOutput, 7.0, DemandType::Neutral, 0.0)?;

    let writes = mock.calls_to("c_MotController_Set_4");
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].handle, 42);
    assert_eq!(writes[0].args[1], MockArg::Double(7.0));

    talon.release()?;
    assert_eq!(mock.destroy_count(42), 1);
    assert_eq!(mock.calls_to("c_MotController_Destroy").len(), 1);
    Ok(())
}

#[test]
fn test_scenario_create_reports_error() {
    let (mock, library) = mock_library();
    mock.fail_next_create(status::TX_FAILED);

    let err = match Device::initialize(&library, 0x0204_0005) {
        Err(err) => err,
        Ok(device) => panic!("initialize must fail, got {device:?}"),
    };
    assert!(matches!(
        err,
        PhoenixError::Initialization {
            function: "c_MotController_Create1",
            base_arb_id: 0x0204_0005,
            ..
        }
    ));
    assert_eq!(err.native_code(), Some(ErrorCode::from_raw(-1)));
    // The half-created handle is torn down.
    assert_eq!(mock.opens(), 1);
    assert_eq!(mock.closes(), 1);
    assert!(mock.live_handles().is_empty());
}

#[test]
fn test_null_create_is_invalid_handle() {
    let (mock, library) = mock_library();
    mock.null_next_create();
    let result = Device::initialize(&library, 0x0104_0001);
    assert!(matches!(
        result,
        Err(PhoenixError::Initialization { code: ErrorCode::INVALID_HANDLE, .. })
    ));
    assert_eq!(mock.opens(), 0);
    assert!(mock.calls_to("c_MotController_Destroy").is_empty());
}

#[test]
fn test_release_reports_destroy_status() -> Result<()> {
    let (mock, library) = mock_library();
    let device = Device::initialize(&library, 0x0204_0001)?;
    mock.inject_status("c_MotController_Destroy", status::TX_TIMEOUT);
    let result = device.release();
    assert!(matches!(
        result,
        Err(PhoenixError::NativeCall {
            function: "c_MotController_Destroy",
            code,
        }) if code.raw() == status::TX_TIMEOUT
    ));
    assert_eq!(mock.opens(), mock.closes());
    Ok(())
}

// ============================================================================
// Status translation
// ============================================================================

#[test]
fn test_status_zero_is_ok() -> Result<()> {
    let (_mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;
    talon.clear_sticky_faults(0)?;
    assert!(talon.last_error().is_ok());
    Ok(())
}

#[test]
fn test_nonzero_status_preserved_exactly() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;

    for code in [status::CAN_MSG_STALE, status::TX_FAILED, status::FEATURE_REQUIRES_HIGHER_FIRM] {
        mock.inject_status("c_MotController_ClearStickyFaults", code);
        let err = match talon.clear_sticky_faults(0) {
            Err(err) => err,
            Ok(()) => panic!("status {code} must be an error"),
        };
        assert_eq!(err.native_code(), Some(ErrorCode::from_raw(code)));
        assert_eq!(err.function(), Some("c_MotController_ClearStickyFaults"));
        assert_eq!(talon.last_error().raw(), code);
    }

    mock.clear_status("c_MotController_ClearStickyFaults");
    talon.clear_sticky_faults(0)?;
    Ok(())
}

#[test]
fn test_failed_query_discards_value() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;
    mock.set_value("c_MotController_GetTemperature", 40.0);
    mock.inject_status("c_MotController_GetTemperature", status::RX_TIMEOUT);
    let result = talon.get_temperature();
    assert!(matches!(
        result,
        Err(PhoenixError::NativeCall { code: ErrorCode::RX_TIMEOUT, .. })
    ));
    Ok(())
}

// ============================================================================
// Motor controllers
// ============================================================================

#[test]
fn test_arbitration_ids() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 3)?;
    let victor = VictorSpx::new(&library, 62)?;
    assert_eq!(talon.base_id(), 0x0204_0003);
    assert_eq!(victor.base_id(), 0x0104_003E);
    assert_eq!(talon.device_id()?, 3);
    assert_eq!(victor.device_id()?, 62);
    assert_eq!(talon.to_string(), "TalonSRX(id=3)");
    assert_eq!(victor.to_string(), "VictorSPX(id=62)");

    let creates: Vec<_> = mock
        .calls_to("c_MotController_Create1")
        .into_iter()
        .map(|call| call.args)
        .collect();
    assert_eq!(
        creates,
        vec![vec![MockArg::Int(0x0204_0003)], vec![MockArg::Int(0x0104_003E)]]
    );
    Ok(())
}

#[test]
fn test_device_number_out_of_range() {
    let (mock, library) = mock_library();
    assert!(matches!(TalonSrx::new(&library, 63), Err(PhoenixError::Config(_))));
    assert!(matches!(VictorSpx::new(&library, -1), Err(PhoenixError::Config(_))));
    assert!(mock.calls().is_empty());
}

#[test]
fn test_set_modes() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;
    mock.clear_calls();

    talon.set(ControlMode::PercentOutput, 0.25, DemandType::ArbitraryFeedForward, 0.1)?;
    talon.set(ControlMode::Current, 1.5, DemandType::Neutral, 9.0)?;
    talon.set(ControlMode::Disabled, 0.8, DemandType::Neutral, 0.0)?;
    talon.set(ControlMode::Follower, 4.0, DemandType::Neutral, 0.0)?;

    let calls = mock.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0].function, "c_MotController_Set_4");
    assert_eq!(
        calls[0].args,
        vec![MockArg::Int(0), MockArg::Double(0.25), MockArg::Double(0.1), MockArg::Int(2)]
    );
    assert_eq!(calls[1].function, "c_MotController_SetDemand");
    assert_eq!(calls[1].args, vec![MockArg::Int(3), MockArg::Int(1500), MockArg::Int(0)]);
    assert_eq!(calls[2].args, vec![MockArg::Int(15), MockArg::Int(0), MockArg::Int(0)]);
    // A bare device number picks up the follower's own model bits.
    assert_eq!(calls[3].args[1], MockArg::Double(f64::from(0x02_0404)));
    Ok(())
}

#[test]
fn test_follow_and_demand_log_snapshot() -> Result<()> {
    let (mock, library) = mock_library();
    let master = TalonSrx::new(&library, 3)?;
    let follower = VictorSpx::new(&library, 4)?;
    mock.clear_calls();

    follower.follow(&master, FollowerType::PercentOutput)?;
    follower.follow(&master, FollowerType::AuxOutput1)?;
    follower.set(ControlMode::Current, 2.5, DemandType::Neutral, 0.0)?;
    follower.neutral_output()?;

    let log: Vec<String> = mock.calls().iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(log.join("\n"), @r"
    c_MotController_Set_4(5, 132099.0, 0.0, 0)
    c_MotController_Set_4(5, 132099.0, 0.0, 1)
    c_MotController_SetDemand(3, 2500, 0)
    c_MotController_SetDemand(15, 0, 0)
    ");
    Ok(())
}

#[test]
fn test_output_and_telemetry() -> Result<()> {
    let (mock, library) = mock_library();
    let victor = VictorSpx::new(&library, 2)?;
    mock.set_value("c_MotController_GetBusVoltage", 12.0);
    mock.set_value("c_MotController_GetMotorOutputPercent", 0.5);
    mock.set_value("c_MotController_GetOutputCurrent", 3.25);
    mock.set_value("c_MotController_GetFirmwareVersion", f64::from(0x0102));
    mock.set_value("c_MotController_HasResetOccurred", 1.0);

    assert_eq!(victor.get_bus_voltage()?.to_bits(), 12.0_f64.to_bits());
    assert_eq!(victor.get_motor_output_voltage()?.to_bits(), 6.0_f64.to_bits());
    assert_eq!(victor.get_output_current()?.to_bits(), 3.25_f64.to_bits());
    assert_eq!(victor.get_firmware_version()?, 0x0102);
    assert!(victor.has_reset_occurred()?);

    victor.set_inverted(true);
    victor.set_neutral_mode(NeutralMode::Brake);
    victor.enable_voltage_compensation(true);
    victor.config_voltage_comp_saturation(11.0, 10)?;
    victor.config_open_loop_ramp(0.5, 0)?;
    victor.config_peak_output_reverse(-0.75, 10)?;

    assert_eq!(
        mock.calls_to("c_MotController_SetInverted")[0].args,
        vec![MockArg::Bool(true)]
    );
    assert_eq!(
        mock.calls_to("c_MotController_SetNeutralMode")[0].args,
        vec![MockArg::Int(2)]
    );
    assert_eq!(
        mock.calls_to("c_MotController_ConfigPeakOutputReverse")[0].args,
        vec![MockArg::Double(-0.75), MockArg::Int(10)]
    );
    Ok(())
}

#[test]
fn test_feedback_and_closed_loop() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;

    talon.config_local_feedback_sensor(FeedbackDevice::QuadEncoder, 0, 10)?;
    talon.config_selected_feedback_sensor(RemoteFeedbackDevice::RemoteSensor0, 1, 10)?;
    talon.set_selected_sensor_position(1234, 0, 10)?;
    assert_eq!(talon.get_selected_sensor_position(0)?, 1234);
    assert_eq!(talon.get_selected_sensor_position(1)?, 0);

    talon.config_kp(0, 0.2, 10)?;
    talon.config_integral_zone(0, 50, 10)?;
    talon.select_profile_slot(0, 0)?;
    talon.set_integral_accumulator(2.5, 0, 10)?;
    assert_eq!(talon.get_integral_accumulator(0)?.to_bits(), 2.5_f64.to_bits());

    let feedback = mock.calls_to("c_MotController_ConfigSelectedFeedbackSensor");
    assert_eq!(feedback[0].args[0], MockArg::Int(0));
    assert_eq!(feedback[1].args[0], MockArg::Int(11));
    assert_eq!(
        mock.calls_to("c_MotController_Config_IntegralZone")[0].args,
        vec![MockArg::Int(0), MockArg::Double(50.0), MockArg::Int(10)]
    );
    Ok(())
}

#[test]
fn test_status_frames_and_custom_params() -> Result<()> {
    let (_mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;

    talon.set_status_frame_period(StatusFrame::Status1General, 5, 10)?;
    assert_eq!(talon.get_status_frame_period(StatusFrame::Status1General, 10)?, 5);

    talon.set_enhanced_status_frame_period(StatusFrameEnhanced::Status3Quadrature, 40, 10)?;
    assert_eq!(
        talon.get_enhanced_status_frame_period(StatusFrameEnhanced::Status3Quadrature, 10)?,
        40
    );

    talon.config_set_custom_param(99, 0, 10)?;
    talon.config_set_custom_param(-7, 1, 10)?;
    assert_eq!(talon.config_get_custom_param(0, 10)?, 99);
    assert_eq!(talon.config_get_custom_param(1, 10)?, -7);
    Ok(())
}

#[test]
fn test_motion_profile_buffer() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;

    talon.config_motion_profile_trajectory_period(10, 10)?;
    talon.change_motion_control_frame_period(5)?;
    for i in 0..3 {
        let point = TrajectoryPoint {
            position: f64::from(i) * 100.0,
            velocity: 250.0,
            profile_slot_select1: 1,
            is_last_point: i == 2,
            zero_pos: i == 0,
            time_dur: TrajectoryDuration::Ms20,
            ..TrajectoryPoint::default()
        };
        talon.push_motion_profile_trajectory(&point)?;
    }
    assert_eq!(talon.get_motion_profile_top_level_buffer_count()?, 3);
    assert!(!talon.is_motion_profile_top_level_buffer_full()?);

    let pushes = mock.calls_to("c_MotController_PushMotionProfileTrajectory_2");
    assert_eq!(
        pushes[0].args,
        vec![
            MockArg::Double(0.0),
            MockArg::Double(250.0),
            MockArg::Double(0.0),
            MockArg::Int(0),
            MockArg::Int(1),
            MockArg::Bool(false),
            MockArg::Bool(true),
            MockArg::Int(20),
        ]
    );

    talon.process_motion_profile_buffer()?;
    mock.set_value(
        "c_MotController_GetMotionProfileStatus_2",
        f64::from(SetValueMotionProfile::Enable.raw()),
    );
    let status = talon.get_motion_profile_status()?;
    assert_eq!(
        status,
        MotionProfileStatus {
            top_buffer_rem: ctre_phoenix_mock::MOTION_PROFILE_CAPACITY,
            top_buffer_cnt: 0,
            btm_buffer_cnt: 3,
            has_underrun: false,
            is_underrun: false,
            active_point_valid: true,
            is_last: true,
            profile_slot_select0: 0,
            output_enable: SetValueMotionProfile::Enable,
            time_dur_ms: 20,
            profile_slot_select1: 1,
        }
    );

    talon.clear_motion_profile_trajectories()?;
    assert_eq!(talon.get_motion_profile_status()?.btm_buffer_cnt, 0);
    Ok(())
}

#[test]
fn test_motion_profile_underrun_latches_until_cleared() -> Result<()> {
    let (_mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;

    talon.process_motion_profile_buffer()?;
    let status = talon.get_motion_profile_status()?;
    assert!(status.has_underrun);
    assert!(status.is_underrun);
    assert!(!status.active_point_valid);
    assert_eq!(status.output_enable, SetValueMotionProfile::Disable);

    talon.clear_motion_profile_has_underrun(10)?;
    assert!(!talon.get_motion_profile_status()?.has_underrun);
    Ok(())
}

#[test]
fn test_motion_profile_status_failure() -> Result<()> {
    let (mock, library) = mock_library();
    let victor = VictorSpx::new(&library, 1)?;
    mock.inject_status("c_MotController_GetMotionProfileStatus_2", status::RX_TIMEOUT);
    assert!(matches!(
        victor.get_motion_profile_status(),
        Err(PhoenixError::NativeCall {
            function: "c_MotController_GetMotionProfileStatus_2",
            code: ErrorCode::RX_TIMEOUT,
        })
    ));
    Ok(())
}

#[test]
fn test_raw_parameters() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;

    talon.config_set_parameter(ParamEnum::NeutralDeadband, 0.04, 0, 0, 10)?;
    assert_eq!(
        talon.config_get_parameter(ParamEnum::NeutralDeadband, 0, 10)?.to_bits(),
        0.04_f64.to_bits()
    );
    assert_eq!(
        talon.config_get_parameter(ParamEnum::PeakCurrentLimitAmps, 0, 10)?.to_bits(),
        0.0_f64.to_bits()
    );

    talon.config_aux_pid_polarity(true, 10)?;
    assert_eq!(
        mock.calls_to("c_MotController_ConfigSetParameter")[1].args,
        vec![
            MockArg::Int(337),
            MockArg::Double(1.0),
            MockArg::Int(0),
            MockArg::Int(1),
            MockArg::Int(10),
        ]
    );
    assert_eq!(
        talon.config_get_parameter(ParamEnum::PidLoopPolarity, 1, 10)?.to_bits(),
        1.0_f64.to_bits()
    );
    Ok(())
}

#[test]
fn test_faults() -> Result<()> {
    let (mock, library) = mock_library();
    let victor = VictorSpx::new(&library, 9)?;
    mock.set_value("c_MotController_GetFaults", f64::from(0b10_0001));
    mock.set_value("c_MotController_GetStickyFaults", f64::from(1 << 5));

    let faults = victor.get_faults()?;
    assert!(faults.contains(Faults::UNDER_VOLTAGE | Faults::HARDWARE_FAILURE));
    assert!(victor.get_sticky_faults()?.contains(StickyFaults::RESET_DURING_EN));

    victor.clear_sticky_faults(10)?;
    assert!(!victor.get_sticky_faults()?.has_any_fault());
    Ok(())
}

#[test]
fn test_talon_limits() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;

    talon.config_local_forward_limit_switch_source(
        LimitSwitchSource::FeedbackConnector,
        LimitSwitchNormal::NormallyOpen,
        10,
    )?;
    talon.config_reverse_limit_switch_source(
        RemoteLimitSwitchSource::RemoteCanifier,
        LimitSwitchNormal::NormallyClosed,
        7,
        10,
    )?;
    talon.config_forward_soft_limit_threshold(4096, 10)?;
    talon.config_forward_soft_limit_enable(true, 10)?;
    talon.override_soft_limits_enable(false);
    talon.config_peak_current_limit(40, 10)?;
    talon.config_peak_current_duration(200, 10)?;
    talon.config_continuous_current_limit(30, 10)?;
    talon.enable_current_limit(true);

    assert_eq!(
        mock.calls_to("c_MotController_ConfigForwardLimitSwitchSource")[0].args,
        vec![MockArg::Int(0), MockArg::Int(0), MockArg::Int(0), MockArg::Int(10)]
    );
    assert_eq!(
        mock.calls_to("c_MotController_ConfigReverseLimitSwitchSource")[0].args,
        vec![MockArg::Int(2), MockArg::Int(1), MockArg::Int(7), MockArg::Int(10)]
    );
    assert_eq!(
        mock.calls_to("c_MotController_EnableCurrentLimit")[0].args,
        vec![MockArg::Bool(true)]
    );
    Ok(())
}

#[test]
fn test_sensor_collection() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;
    let sensors = talon.sensor_collection();

    sensors.set_quadrature_position(-500, 10)?;
    sensors.set_pulse_width_position(2048, 10)?;
    sensors.set_analog_position(300, 10)?;
    mock.set_value("c_MotController_GetPinStateQuadA", 1.0);
    mock.set_value("c_MotController_IsFwdLimitSwitchClosed", 1.0);

    assert_eq!(sensors.get_quadrature_position()?, -500);
    assert_eq!(sensors.get_pulse_width_position()?, 2048);
    assert_eq!(sensors.get_analog_in()?, 300);
    assert_eq!(sensors.get_pin_state_quad_a()?, 1);
    assert_eq!(sensors.get_pin_state_quad_b()?, 0);
    assert_eq!(sensors.is_fwd_limit_switch_closed()?, 1);
    assert_eq!(sensors.is_rev_limit_switch_closed()?, 0);
    Ok(())
}

#[test]
fn test_controllers_release_their_devices() -> Result<()> {
    let (mock, library) = mock_library();
    let talon = TalonSrx::new(&library, 1)?;
    let victor = VictorSpx::new(&library, 2)?;
    talon.release()?;
    drop(victor);
    assert_eq!(mock.opens(), 2);
    assert_eq!(mock.closes(), 2);
    Ok(())
}

#[test]
fn test_trait_object_dispatch() -> Result<()> {
    let (_mock, library) = mock_library();
    let controllers: Vec<Box<dyn BaseMotorController>> = vec![
        Box::new(TalonSrx::new(&library, 1)?),
        Box::new(VictorSpx::new(&library, 1)?),
    ];
    let ids: Vec<i32> = controllers
        .iter()
        .map(|c| motor::follower_id24(c.base_id()))
        .collect();
    assert_eq!(ids, vec![0x02_0401, 0x01_0401]);
    for controller in &controllers {
        controller.neutral_output()?;
    }
    Ok(())
}

// ============================================================================
// Cross-thread use
// ============================================================================

#[test]
fn test_shared_controller_across_threads() -> Result<()> {
    let (mock, library) = mock_library();
    let shared = SharedController::new(TalonSrx::new(&library, 1)?);

    let threads: Vec<_> = (0..4)
        .map(|i| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let demand = f64::from(i) / 10.0;
                shared.with(|talon| {
                    talon.set(ControlMode::PercentOutput, demand, DemandType::Neutral, 0.0)
                })
            })
        })
        .collect();
    for thread in threads {
        match thread.join() {
            Ok(result) => result?,
            Err(_) => panic!("worker thread panicked"),
        }
    }

    assert_eq!(mock.calls_to("c_MotController_Set_4").len(), 4);
    drop(shared);
    assert_eq!(mock.opens(), mock.closes());
    Ok(())
}

#[tokio::test]
async fn test_worker_owns_controller() -> Result<()> {
    let (mock, library) = mock_library();
    mock.set_value("c_MotController_GetBusVoltage", 12.5);

    let worker = ControllerWorker::spawn("talon-1", TalonSrx::new(&library, 1)?)?;
    let volts = worker.run(|talon| talon.get_bus_voltage()).await??;
    assert_eq!(volts.to_bits(), 12.5_f64.to_bits());
    worker
        .run(|talon| talon.set(ControlMode::PercentOutput, 0.3, DemandType::Neutral, 0.0))
        .await??;

    worker.shutdown()?;
    assert_eq!(mock.opens(), 1);
    assert_eq!(mock.closes(), 1);
    Ok(())
}
