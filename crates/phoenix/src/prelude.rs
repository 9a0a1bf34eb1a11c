//! Convenience re-exports for common types.

pub use crate::config::PhoenixConfig;
pub use crate::device::Device;
pub use crate::error::{ErrorCode, PhoenixError};
pub use crate::faults::{Faults, StickyFaults};
pub use crate::library::PhoenixLibrary;
pub use crate::motor::{
    BaseMotorController, MotionProfileStatus, SensorCollection, TalonSrx, TrajectoryPoint, VictorSpx,
};
pub use crate::shared::SharedController;
pub use crate::worker::ControllerWorker;

pub use ctre_phoenix_sys::{
    ControlFrame, ControlMode, DemandType, FeedbackDevice, FollowerType, LimitSwitchNormal,
    LimitSwitchSource, NeutralMode, ParamEnum, RemoteFeedbackDevice, RemoteLimitSwitchSource,
    RemoteSensorSource, SensorTerm, SetValueMotionProfile, StatusFrame, StatusFrameEnhanced,
    TrajectoryDuration, VelocityMeasPeriod,
};
