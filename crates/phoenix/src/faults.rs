//! Fault words reported by a motor controller.

use bitflags::bitflags;

bitflags! {
    /// Faults currently asserted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Faults: u32 {
        /// Bus voltage dropped below the brownout threshold.
        const UNDER_VOLTAGE = 1 << 0;
        /// Forward limit switch is closed.
        const FORWARD_LIMIT_SWITCH = 1 << 1;
        /// Reverse limit switch is closed.
        const REVERSE_LIMIT_SWITCH = 1 << 2;
        /// Sensor is past the forward soft limit.
        const FORWARD_SOFT_LIMIT = 1 << 3;
        /// Sensor is past the reverse soft limit.
        const REVERSE_SOFT_LIMIT = 1 << 4;
        /// Device reports an internal hardware failure.
        const HARDWARE_FAILURE = 1 << 5;
        /// Device reset while enabled.
        const RESET_DURING_EN = 1 << 6;
        /// Selected sensor position overflowed.
        const SENSOR_OVERFLOW = 1 << 7;
        /// Sensor moves opposite to the motor output.
        const SENSOR_OUT_OF_PHASE = 1 << 8;
        /// Device reset after an electrostatic discharge.
        const HARDWARE_ESD_RESET = 1 << 9;
        /// Remote sensor stopped reporting.
        const REMOTE_LOSS_OF_SIGNAL = 1 << 10;
    }
}

bitflags! {
    /// Faults latched since the last `clear_sticky_faults`.
    ///
    /// Same conditions as [`Faults`] minus hardware failure, which shifts
    /// every later bit down by one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StickyFaults: u32 {
        /// Bus voltage dropped below the brownout threshold.
        const UNDER_VOLTAGE = 1 << 0;
        /// Forward limit switch is closed.
        const FORWARD_LIMIT_SWITCH = 1 << 1;
        /// Reverse limit switch is closed.
        const REVERSE_LIMIT_SWITCH = 1 << 2;
        /// Sensor is past the forward soft limit.
        const FORWARD_SOFT_LIMIT = 1 << 3;
        /// Sensor is past the reverse soft limit.
        const REVERSE_SOFT_LIMIT = 1 << 4;
        /// Device reset while enabled.
        const RESET_DURING_EN = 1 << 5;
        /// Selected sensor position overflowed.
        const SENSOR_OVERFLOW = 1 << 6;
        /// Sensor moves opposite to the motor output.
        const SENSOR_OUT_OF_PHASE = 1 << 7;
        /// Device reset after an electrostatic discharge.
        const HARDWARE_ESD_RESET = 1 << 8;
        /// Remote sensor stopped reporting.
        const REMOTE_LOSS_OF_SIGNAL = 1 << 9;
    }
}

impl Faults {
    /// Interpret the raw fault word, keeping bits this snapshot does not name.
    pub fn from_raw(raw: i32) -> Self {
        Self::from_bits_retain(raw.cast_unsigned())
    }

    /// True if any bit is set, named or not.
    pub fn has_any_fault(self) -> bool {
        !self.is_empty()
    }
}

impl StickyFaults {
    /// Interpret the raw sticky fault word, keeping bits this snapshot does not name.
    pub fn from_raw(raw: i32) -> Self {
        Self::from_bits_retain(raw.cast_unsigned())
    }

    /// True if any bit is set, named or not.
    pub fn has_any_fault(self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faults_bits() {
        let faults = Faults::from_raw(0b10_0010_0001);
        assert!(faults.contains(Faults::UNDER_VOLTAGE));
        assert!(faults.contains(Faults::HARDWARE_FAILURE));
        assert!(faults.contains(Faults::HARDWARE_ESD_RESET));
        assert!(!faults.contains(Faults::FORWARD_LIMIT_SWITCH));
        assert!(faults.has_any_fault());
    }

    #[test]
    fn test_sticky_faults_shifted_layout() {
        let sticky = StickyFaults::from_raw(1 << 5);
        assert!(sticky.contains(StickyFaults::RESET_DURING_EN));
        let live = Faults::from_raw(1 << 5);
        assert!(live.contains(Faults::HARDWARE_FAILURE));
    }

    #[test]
    fn test_every_named_bit_is_distinct() {
        assert_eq!(Faults::all().iter_names().count(), 11);
        assert_eq!(StickyFaults::all().iter_names().count(), 10);
        assert_eq!(Faults::all().bits(), (1 << 11) - 1);
        assert_eq!(StickyFaults::all().bits(), (1 << 10) - 1);
    }

    #[test]
    fn test_no_faults() {
        assert!(!Faults::from_raw(0).has_any_fault());
        assert!(!StickyFaults::from_raw(0).has_any_fault());
    }

    #[test]
    fn test_unknown_bits_count_as_fault() {
        let faults = Faults::from_raw(1 << 20);
        assert!(faults.has_any_fault());
        assert_eq!(faults.bits(), 1 << 20);
    }
}
