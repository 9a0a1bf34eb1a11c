//! Status codes returned by the vendored library.
//!
//! Zero is success. Positive values are warnings, negative values are
//! errors; the binding layer treats every non-zero value as a failure.

use std::ffi::c_int;

/// Raw status code as returned across the C ABI.
pub type ErrorCode = c_int;

pub const OK: ErrorCode = 0;
pub const CAN_MSG_STALE: ErrorCode = 1;
pub const BUFFER_FULL: ErrorCode = 2;
pub const SENSOR_NOT_PRESENT: ErrorCode = 3;
pub const TX_FAILED: ErrorCode = -1;
pub const INVALID_PARAM_VALUE: ErrorCode = -2;
pub const RX_TIMEOUT: ErrorCode = -3;
pub const TX_TIMEOUT: ErrorCode = -4;
pub const UNEXPECTED_ARB_ID: ErrorCode = -5;
pub const GENERAL_ERROR: ErrorCode = -100;
pub const SIG_NOT_UPDATED: ErrorCode = -200;
pub const NOT_ALL_PID_VALUES_UPDATED: ErrorCode = -201;
pub const GEN_PORT_ERROR: ErrorCode = -300;
pub const PORT_MODULE_TYPE_MISMATCH: ErrorCode = -301;
pub const GEN_MODULE_ERROR: ErrorCode = -400;
pub const MODULE_NOT_INIT_SET_ERROR: ErrorCode = -401;
pub const MODULE_NOT_INIT_GET_ERROR: ErrorCode = -402;
pub const INCOMPATIBLE_MODE: ErrorCode = -600;
pub const INVALID_HANDLE: ErrorCode = -601;
pub const FEATURE_REQUIRES_HIGHER_FIRM: ErrorCode = -700;
pub const GENERAL_WARNING: ErrorCode = 100;
pub const FEATURE_NOT_SUPPORTED: ErrorCode = 101;
pub const NOT_IMPLEMENTED: ErrorCode = 102;
pub const FIRM_VERSION_COULD_NOT_BE_RETRIEVED: ErrorCode = 103;

/// Vendor name of a status code, if it is one this snapshot knows about.
pub fn name(code: ErrorCode) -> Option<&'static str> {
    let name = match code {
        OK => "OK",
        CAN_MSG_STALE => "CAN_MSG_STALE",
        BUFFER_FULL => "BufferFull",
        SENSOR_NOT_PRESENT => "SensorNotPresent",
        TX_FAILED => "TxFailed",
        INVALID_PARAM_VALUE => "InvalidParamValue",
        RX_TIMEOUT => "RxTimeout",
        TX_TIMEOUT => "TxTimeout",
        UNEXPECTED_ARB_ID => "UnexpectedArbId",
        GENERAL_ERROR => "GeneralError",
        SIG_NOT_UPDATED => "SigNotUpdated",
        NOT_ALL_PID_VALUES_UPDATED => "NotAllPIDValuesUpdated",
        GEN_PORT_ERROR => "GenPortError",
        PORT_MODULE_TYPE_MISMATCH => "PortModuleTypeMismatch",
        GEN_MODULE_ERROR => "GenModuleError",
        MODULE_NOT_INIT_SET_ERROR => "ModuleNotInitSetError",
        MODULE_NOT_INIT_GET_ERROR => "ModuleNotInitGetError",
        INCOMPATIBLE_MODE => "IncompatibleMode",
        INVALID_HANDLE => "InvalidHandle",
        FEATURE_REQUIRES_HIGHER_FIRM => "FeatureRequiresHigherFirm",
        GENERAL_WARNING => "GeneralWarning",
        FEATURE_NOT_SUPPORTED => "FeatureNotSupported",
        NOT_IMPLEMENTED => "NotImplemented",
        FIRM_VERSION_COULD_NOT_BE_RETRIEVED => "FirmVersionCouldNotBeRetrieved",
        _ => return None,
    };
    Some(name)
}
