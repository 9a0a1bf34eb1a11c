//! Property-based tests for demand forwarding and status translation.

mod common;

use ctre_phoenix::prelude::*;
use ctre_phoenix::motor::{TALON_SRX_BASE_ARB_ID, VICTOR_SPX_BASE_ARB_ID};
use ctre_phoenix_mock::MockArg;
use proptest::prelude::*;

use common::mock_library;

fn control_mode() -> impl Strategy<Value = ControlMode> {
    prop_oneof![
        Just(ControlMode::PercentOutput),
        Just(ControlMode::Position),
        Just(ControlMode::Velocity),
        Just(ControlMode::MotionProfile),
        Just(ControlMode::MotionMagic),
        Just(ControlMode::MotionProfileArc),
    ]
}

fn demand_type() -> impl Strategy<Value = DemandType> {
    prop_oneof![
        Just(DemandType::Neutral),
        Just(DemandType::AuxPid),
        Just(DemandType::ArbitraryFeedForward),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_set_forwards_demands_bit_exact(
        mode in control_mode(),
        demand0 in any::<f64>(),
        demand1_type in demand_type(),
        demand1 in any::<f64>(),
    ) {
        let (mock, library) = mock_library();
        let talon = TalonSrx::new(&library, 1)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        mock.clear_calls();

        talon
            .set(mode, demand0, demand1_type, demand1)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let calls = mock.calls_to("c_MotController_Set_4");
        prop_assert_eq!(calls.len(), 1);
        prop_assert_eq!(
            &calls[0].args,
            &vec![
                MockArg::Int(mode.raw()),
                MockArg::Double(demand0),
                MockArg::Double(demand1),
                MockArg::Int(demand1_type.raw()),
            ]
        );
    }

    #[test]
    fn prop_nonzero_status_is_preserved(code in any::<i32>().prop_filter("non-zero", |c| *c != 0)) {
        let (mock, library) = mock_library();
        let victor = VictorSpx::new(&library, 7)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        mock.inject_status("c_MotController_ConfigPeakOutputForward", code);

        let err = match victor.config_peak_output_forward(1.0, 10) {
            Err(err) => err,
            Ok(()) => return Err(TestCaseError::fail(format!("status {code} accepted"))),
        };
        prop_assert_eq!(err.native_code(), Some(ErrorCode::from_raw(code)));
        prop_assert_eq!(err.function(), Some("c_MotController_ConfigPeakOutputForward"));
        prop_assert!(!err.is_link_error());
    }

    #[test]
    fn prop_device_numbers_in_range_are_accepted(device_number in 0i32..=62) {
        let (mock, library) = mock_library();
        let talon = TalonSrx::new(&library, device_number)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let victor = VictorSpx::new(&library, device_number)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(talon.base_id(), TALON_SRX_BASE_ARB_ID | device_number);
        prop_assert_eq!(victor.base_id(), VICTOR_SPX_BASE_ARB_ID | device_number);
        drop((talon, victor));
        prop_assert_eq!(mock.opens(), mock.closes());
    }

    #[test]
    fn prop_device_numbers_out_of_range_are_rejected(
        device_number in prop_oneof![i32::MIN..0, 63i32..=i32::MAX],
    ) {
        let (mock, library) = mock_library();
        prop_assert!(matches!(
            TalonSrx::new(&library, device_number),
            Err(PhoenixError::Config(_))
        ));
        prop_assert!(matches!(
            VictorSpx::new(&library, device_number),
            Err(PhoenixError::Config(_))
        ));
        prop_assert_eq!(mock.opens(), 0);
    }

    #[test]
    fn prop_follow_sends_packed_master_id(
        master_number in 0i32..=62,
        follower_number in 0i32..=62,
    ) {
        let (mock, library) = mock_library();
        let master = VictorSpx::new(&library, master_number)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let follower = TalonSrx::new(&library, follower_number)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        mock.clear_calls();

        follower
            .follow(&master, FollowerType::PercentOutput)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let expected = f64::from(0x01_0400 | master_number);
        let calls = mock.calls_to("c_MotController_Set_4");
        prop_assert_eq!(calls.len(), 1);
        prop_assert_eq!(&calls[0].args[1], &MockArg::Double(expected));
    }
}
