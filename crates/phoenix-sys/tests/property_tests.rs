//! Property-based tests for the raw enum mappings.

use ctre_phoenix_sys::{ControlMode, StatusFrameEnhanced, status};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_control_mode_from_raw_matches_declared(raw in any::<i32>()) {
        match ControlMode::from_raw(raw) {
            Some(mode) => prop_assert_eq!(mode.raw(), raw),
            None => prop_assert!(ControlMode::ALL.iter().all(|m| m.raw() != raw)),
        }
    }

    #[test]
    fn prop_status_frame_from_raw_matches_declared(raw in any::<i32>()) {
        if let Some(frame) = StatusFrameEnhanced::from_raw(raw) {
            prop_assert_eq!(frame.raw(), raw);
        }
    }

    #[test]
    fn prop_status_names_only_for_known_codes(code in 200i32..10_000) {
        prop_assert_eq!(status::name(code), None);
    }
}

#[test]
fn test_missing_library_is_loader_error() {
    // SAFETY: the path does not exist, so no initializer can run.
    let result = unsafe { ctre_phoenix_sys::Library::new("/nonexistent/libCTRE_PhoenixCCI.so") };
    assert!(result.is_err());
}
