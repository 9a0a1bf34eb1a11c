//! Integer enums of the vendored API.
//!
//! Discriminants are the values the vendored header assigns; they cross the
//! ABI as `c_int`.

use std::ffi::c_int;

macro_rules! ffi_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Value passed across the C ABI.
            pub const fn raw(self) -> c_int {
                self as c_int
            }

            /// Look up the variant for a raw value.
            pub fn from_raw(raw: c_int) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.raw() == raw)
            }
        }
    };
}

ffi_enum! {
    /// Output mode of a motor controller.
    pub enum ControlMode {
        PercentOutput = 0,
        Position = 1,
        Velocity = 2,
        Current = 3,
        Follower = 5,
        MotionProfile = 6,
        MotionMagic = 7,
        MotionProfileArc = 10,
        Disabled = 15,
    }
}

ffi_enum! {
    /// How the secondary demand of a `set` call is interpreted.
    pub enum DemandType {
        Neutral = 0,
        AuxPid = 1,
        ArbitraryFeedForward = 2,
    }
}

ffi_enum! {
    /// Behaviour during neutral output.
    pub enum NeutralMode {
        /// Use the setting stored in flash.
        EepromSetting = 0,
        Coast = 1,
        Brake = 2,
    }
}

ffi_enum! {
    /// Local feedback devices selectable on a Talon SRX.
    pub enum FeedbackDevice {
        None = -1,
        QuadEncoder = 0,
        Analog = 2,
        Tachometer = 4,
        PulseWidthEncodedPosition = 8,
        SensorSum = 9,
        SensorDifference = 10,
        RemoteSensor0 = 11,
        RemoteSensor1 = 12,
        SoftwareEmulatedSensor = 15,
    }
}

impl FeedbackDevice {
    /// CTRE Mag Encoder in relative mode (quadrature).
    pub const CTRE_MAG_ENCODER_RELATIVE: Self = Self::QuadEncoder;
    /// CTRE Mag Encoder in absolute mode (pulse width).
    pub const CTRE_MAG_ENCODER_ABSOLUTE: Self = Self::PulseWidthEncodedPosition;
}

ffi_enum! {
    /// Feedback devices selectable on every CAN motor controller.
    pub enum RemoteFeedbackDevice {
        None = -1,
        SensorSum = 9,
        SensorDifference = 10,
        RemoteSensor0 = 11,
        RemoteSensor1 = 12,
        SoftwareEmulatedSensor = 15,
    }
}

ffi_enum! {
    /// Signal a remote sensor slot is bound to.
    pub enum RemoteSensorSource {
        Off = 0,
        TalonSrxSelectedSensor = 1,
        PigeonYaw = 2,
        PigeonPitch = 3,
        PigeonRoll = 4,
        CanifierQuadrature = 5,
        CanifierPwmInput0 = 6,
        CanifierPwmInput1 = 7,
        CanifierPwmInput2 = 8,
        CanifierPwmInput3 = 9,
        GadgeteerPigeonYaw = 10,
        GadgeteerPigeonPitch = 11,
        GadgeteerPigeonRoll = 12,
    }
}

ffi_enum! {
    /// Terms of the sensor sum and difference.
    pub enum SensorTerm {
        Sum0 = 0,
        Sum1 = 1,
        Diff0 = 2,
        Diff1 = 3,
    }
}

ffi_enum! {
    /// Limit switch source for a Talon SRX.
    pub enum LimitSwitchSource {
        FeedbackConnector = 0,
        RemoteTalonSrx = 1,
        RemoteCanifier = 2,
        Deactivated = 3,
    }
}

ffi_enum! {
    /// Limit switch source available to every CAN motor controller.
    pub enum RemoteLimitSwitchSource {
        RemoteTalonSrx = 1,
        RemoteCanifier = 2,
        Deactivated = 3,
    }
}

ffi_enum! {
    /// Limit switch wiring.
    pub enum LimitSwitchNormal {
        NormallyOpen = 0,
        NormallyClosed = 1,
        Disabled = 2,
    }
}

ffi_enum! {
    /// Status frames sent by every CAN motor controller.
    pub enum StatusFrame {
        Status1General = 0x1400,
        Status2Feedback0 = 0x1440,
        Status4AinTempVbat = 0x14C0,
        Status6Misc = 0x1540,
        Status7CommStatus = 0x1580,
        Status9MotProfBuffer = 0x1600,
        Status10MotionMagic = 0x1640,
        Status12Feedback1 = 0x16C0,
        Status13BasePidf0 = 0x1700,
        Status14TurnPidf1 = 0x1740,
        Status15FirmwareApiStatus = 0x1780,
    }
}

ffi_enum! {
    /// Status frames sent by a Talon SRX.
    pub enum StatusFrameEnhanced {
        Status1General = 0x1400,
        Status2Feedback0 = 0x1440,
        Status3Quadrature = 0x1480,
        Status4AinTempVbat = 0x14C0,
        Status6Misc = 0x1540,
        Status7CommStatus = 0x1580,
        Status8PulseWidth = 0x15C0,
        Status9MotProfBuffer = 0x1600,
        Status10MotionMagic = 0x1640,
        Status11UartGadgeteer = 0x1680,
        Status12Feedback1 = 0x16C0,
        Status13BasePidf0 = 0x1700,
        Status14TurnPidf1 = 0x1740,
        Status15FirmwareApiStatus = 0x1780,
    }
}

ffi_enum! {
    /// Control frames sent to a motor controller.
    pub enum ControlFrame {
        Control3General = 0x040080,
        Control4Advanced = 0x0400C0,
        Control6MotProfAddTrajPoint = 0x040140,
    }
}

ffi_enum! {
    /// Sample period of the velocity measurement, in milliseconds.
    pub enum VelocityMeasPeriod {
        Period1Ms = 1,
        Period2Ms = 2,
        Period5Ms = 5,
        Period10Ms = 10,
        Period20Ms = 20,
        Period25Ms = 25,
        Period50Ms = 50,
        Period100Ms = 100,
    }
}

ffi_enum! {
    /// What a follower mirrors from its master.
    pub enum FollowerType {
        PercentOutput = 0,
        AuxOutput1 = 1,
    }
}

ffi_enum! {
    /// Duration of one motion profile point, in milliseconds.
    pub enum TrajectoryDuration {
        Ms0 = 0,
        Ms5 = 5,
        Ms10 = 10,
        Ms20 = 20,
        Ms30 = 30,
        Ms40 = 40,
        Ms50 = 50,
        Ms100 = 100,
    }
}

ffi_enum! {
    /// Output state reported while a motion profile runs.
    pub enum SetValueMotionProfile {
        Disable = 0,
        Enable = 1,
        Hold = 2,
    }
}

ffi_enum! {
    /// Persistent parameters addressable through the raw parameter calls.
    pub enum ParamEnum {
        OpenloopRamp = 301,
        ClosedloopRamp = 302,
        NeutralDeadband = 303,
        PeakPosOutput = 305,
        NominalPosOutput = 306,
        PeakNegOutput = 307,
        NominalNegOutput = 308,
        ProfileParamSlotP = 310,
        ProfileParamSlotI = 311,
        ProfileParamSlotD = 312,
        ProfileParamSlotF = 313,
        ProfileParamSlotIZone = 314,
        ProfileParamSlotAllowableErr = 315,
        ProfileParamSlotMaxIAccum = 316,
        ProfileParamSlotPeakOutput = 317,
        ClearPositionOnLimitF = 320,
        ClearPositionOnLimitR = 321,
        ClearPositionOnQuadIdx = 322,
        SampleVelocityPeriod = 325,
        SampleVelocityWindow = 326,
        FeedbackSensorType = 330,
        SelectedSensorPosition = 331,
        FeedbackNotContinuous = 332,
        RemoteSensorSource = 333,
        RemoteSensorDeviceId = 334,
        SensorTerm = 335,
        RemoteSensorClosedLoopDisableNeutralOnLos = 336,
        /// Ordinal 1 inverts the auxiliary loop.
        PidLoopPolarity = 337,
        PidLoopPeriod = 338,
        SelectedSensorCoefficient = 339,
        ForwardSoftLimitThreshold = 340,
        ReverseSoftLimitThreshold = 341,
        ForwardSoftLimitEnable = 342,
        ReverseSoftLimitEnable = 343,
        NominalBatteryVoltage = 350,
        BatteryVoltageFilterSize = 351,
        ContinuousCurrentLimitAmps = 360,
        PeakCurrentLimitMs = 361,
        PeakCurrentLimitAmps = 362,
        ClosedLoopIAccum = 370,
        CustomParam = 380,
        StickyFaults = 390,
        AnalogPosition = 400,
        QuadraturePosition = 401,
        PulseWidthPosition = 402,
        MotMagAccel = 410,
        MotMagVelCruise = 411,
        LimitSwitchSource = 421,
        LimitSwitchNormClosedAndDis = 422,
        LimitSwitchDisableNeutralOnLos = 423,
        LimitSwitchRemoteDevId = 424,
        SoftLimitDisableNeutralOnLos = 425,
        PulseWidthPeriodEdgesPerRot = 430,
        PulseWidthPeriodFilterWindowSz = 431,
    }
}
