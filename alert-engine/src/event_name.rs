//! Event identifiers
//!
//! Events are a dense enumeration: the raw `u16` id of each variant is its
//! position in the list below, so per-event state can live in fixed arrays
//! indexed by id. New events must be appended to keep wire ids stable.

use crate::types::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! event_names {
    ($($variant:ident => $name:literal,)+) => {
        /// Stable identifier of a detectable condition
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum EventName {
            $($variant,)+
        }

        impl EventName {
            /// Every event, in ascending id order
            pub const ALL: &'static [EventName] = &[$(EventName::$variant,)+];

            /// camelCase name used in provenance strings and scenario files
            pub fn as_str(self) -> &'static str {
                match self {
                    $(EventName::$variant => $name,)+
                }
            }
        }
    };
}

event_names! {
    StockFcw => "stockFcw",
    ActuatorsApiUnavailable => "actuatorsApiUnavailable",
    JoystickDebug => "joystickDebug",
    ControlsInitializing => "controlsInitializing",
    Startup => "startup",
    StartupMaster => "startupMaster",
    StartupNoControl => "startupNoControl",
    StartupNoCar => "startupNoCar",
    StartupNoFw => "startupNoFw",
    DashcamMode => "dashcamMode",
    InvalidLkasSetting => "invalidLkasSetting",
    CruiseMismatch => "cruiseMismatch",
    CarUnrecognized => "carUnrecognized",
    StockAeb => "stockAeb",
    Fcw => "fcw",
    Ldw => "ldw",
    SteerTempUnavailableSilent => "steerTempUnavailableSilent",
    PreDriverDistracted => "preDriverDistracted",
    PromptDriverDistracted => "promptDriverDistracted",
    DriverDistracted => "driverDistracted",
    PreDriverUnresponsive => "preDriverUnresponsive",
    PromptDriverUnresponsive => "promptDriverUnresponsive",
    DriverUnresponsive => "driverUnresponsive",
    ManualRestart => "manualRestart",
    ResumeRequired => "resumeRequired",
    BelowSteerSpeed => "belowSteerSpeed",
    PreLaneChangeLeft => "preLaneChangeLeft",
    PreLaneChangeRight => "preLaneChangeRight",
    LaneChangeBlocked => "laneChangeBlocked",
    LaneChange => "laneChange",
    SteerSaturated => "steerSaturated",
    FanMalfunction => "fanMalfunction",
    CameraMalfunction => "cameraMalfunction",
    CameraFrameRate => "cameraFrameRate",
    LocationdTemporaryError => "locationdTemporaryError",
    LocationdPermanentError => "locationdPermanentError",
    ParamsdTemporaryError => "paramsdTemporaryError",
    ParamsdPermanentError => "paramsdPermanentError",
    PcmEnable => "pcmEnable",
    ButtonEnable => "buttonEnable",
    PcmDisable => "pcmDisable",
    ButtonCancel => "buttonCancel",
    BrakeHold => "brakeHold",
    ParkBrake => "parkBrake",
    PedalPressed => "pedalPressed",
    PreEnableStandstill => "preEnableStandstill",
    GasPressedOverride => "gasPressedOverride",
    SteerOverride => "steerOverride",
    WrongCarMode => "wrongCarMode",
    ResumeBlocked => "resumeBlocked",
    WrongCruiseMode => "wrongCruiseMode",
    SteerTempUnavailable => "steerTempUnavailable",
    SteerTimeLimit => "steerTimeLimit",
    OutOfSpace => "outOfSpace",
    BelowEngageSpeed => "belowEngageSpeed",
    SensorDataInvalid => "sensorDataInvalid",
    NoGps => "noGps",
    SoundsUnavailable => "soundsUnavailable",
    TooDistracted => "tooDistracted",
    Overheat => "overheat",
    WrongGear => "wrongGear",
    CalibrationInvalid => "calibrationInvalid",
    CalibrationIncomplete => "calibrationIncomplete",
    CalibrationRecalibrating => "calibrationRecalibrating",
    DoorOpen => "doorOpen",
    SeatbeltNotLatched => "seatbeltNotLatched",
    EspDisabled => "espDisabled",
    LowBattery => "lowBattery",
    CommIssue => "commIssue",
    CommIssueAvgFreq => "commIssueAvgFreq",
    ControlsdLagging => "controlsdLagging",
    ProcessNotRunning => "processNotRunning",
    RadarFault => "radarFault",
    ModeldLagging => "modeldLagging",
    PosenetInvalid => "posenetInvalid",
    DeviceFalling => "deviceFalling",
    LowMemory => "lowMemory",
    HighCpuUsage => "highCpuUsage",
    AccFaulted => "accFaulted",
    ControlsMismatch => "controlsMismatch",
    RoadCameraError => "roadCameraError",
    WideRoadCameraError => "wideRoadCameraError",
    DriverCameraError => "driverCameraError",
    UsbError => "usbError",
    CanError => "canError",
    CanBusMissing => "canBusMissing",
    SteerUnavailable => "steerUnavailable",
    ReverseGear => "reverseGear",
    CruiseDisabled => "cruiseDisabled",
    RelayMalfunction => "relayMalfunction",
    SpeedTooLow => "speedTooLow",
    SpeedTooHigh => "speedTooHigh",
    LowSpeedLockout => "lowSpeedLockout",
    LkasDisabled => "lkasDisabled",
    VehicleSensorsInvalid => "vehicleSensorsInvalid",
    StartupNoSecOcKey => "startupNoSecOcKey",
    ForcingStop => "forcingStop",
    GreenLight => "greenLight",
    LaneChangeBlockedLoud => "laneChangeBlockedLoud",
    LeadDeparting => "leadDeparting",
    NoLaneAvailable => "noLaneAvailable",
    OpenpilotCrashed => "openpilotCrashed",
    PedalInterceptorNoBrake => "pedalInterceptorNoBrake",
    SpeedLimitChanged => "speedLimitChanged",
    TrafficModeActive => "trafficModeActive",
    TrafficModeInactive => "trafficModeInactive",
    TurningLeft => "turningLeft",
    TurningRight => "turningRight",
}

impl EventName {
    /// Number of known events
    pub const COUNT: usize = Self::ALL.len();

    /// Raw wire id
    pub fn raw(self) -> u16 {
        self as u16
    }

    /// Array index of this event
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up an event by raw wire id
    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Look up an event by its camelCase name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == name)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| EngineError::UnknownEventName(s.to_string()))
    }
}

impl Serialize for EventName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown event name: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense_and_ascending() {
        for (i, event) in EventName::ALL.iter().enumerate() {
            assert_eq!(event.index(), i);
            assert_eq!(EventName::from_raw(i as u16), Some(*event));
        }
        assert_eq!(EventName::from_raw(EventName::COUNT as u16), None);
        assert_eq!(EventName::from_raw(u16::MAX), None);
    }

    #[test]
    fn test_names_are_unique() {
        for event in EventName::ALL {
            assert_eq!(EventName::from_name(event.as_str()), Some(*event));
        }
        assert!("notAnEvent".parse::<EventName>().is_err());
    }

    #[test]
    fn test_ordering_follows_ids() {
        assert!(EventName::StockFcw < EventName::DoorOpen);
        assert!(EventName::DoorOpen.raw() < EventName::VehicleSensorsInvalid.raw());
        assert_eq!(EventName::StartupNoSecOcKey.raw(), EventName::VehicleSensorsInvalid.raw() + 1);
    }
}
