//! The standard event table
//!
//! Every [`EventName`] is registered here, so `standard()` also proves the
//! enumeration and the table stay in sync.

use super::callbacks::{self, soft_disable_spec, user_soft_disable_spec};
use super::{AlertSpec, EventCatalog};
use crate::alerts::{
    engagement, immediate_disable, no_entry, no_entry_titled, normal_permanent,
    normal_permanent_with, startup, startup_with,
};
use crate::context::ContextView;
use crate::event_name::EventName as E;
use crate::types::Category::*;
use crate::types::{
    Alert, AlertSize, AlertStatus, AudibleAlert, CatalogError, Category, Priority, ResolveError,
    VisualAlert,
};

type Entry = (Category, AlertSpec);

fn fixed(alert: Alert) -> AlertSpec {
    AlertSpec::Fixed(alert)
}

fn dynamic(f: fn(&mut ContextView<'_>) -> Result<Alert, ResolveError>) -> AlertSpec {
    AlertSpec::dynamic(f)
}

fn none() -> Vec<Entry> {
    Vec::new()
}

#[allow(clippy::too_many_arguments)]
fn alert(
    text_1: &str,
    text_2: &str,
    status: AlertStatus,
    size: AlertSize,
    priority: Priority,
    visual: VisualAlert,
    audible: AudibleAlert,
    duration_secs: f64,
) -> AlertSpec {
    fixed(Alert::new(text_1, text_2, status, size, priority, visual, audible, duration_secs))
}

/// Build the standard catalog
#[rustfmt::skip]
pub fn standard() -> Result<EventCatalog, CatalogError> {
    EventCatalog::builder()
        // events with no alerts
        .event(E::StockFcw, none())
        .event(E::ActuatorsApiUnavailable, none())
        // alerts displayed in all states
        .event(E::JoystickDebug, [
            (Warning, dynamic(callbacks::joystick)),
            (Permanent, fixed(normal_permanent("Joystick Mode"))),
        ])
        .event(E::ControlsInitializing, [
            (NoEntry, fixed(no_entry("System Initializing"))),
        ])
        .event(E::Startup, [
            (Permanent, fixed(startup("Be ready to take over at any time"))),
        ])
        .event(E::StartupMaster, [
            (Permanent, dynamic(callbacks::startup_master)),
        ])
        .event(E::StartupNoControl, [
            (Permanent, fixed(startup("Dashcam mode"))),
            (NoEntry, fixed(no_entry("Dashcam mode"))),
        ])
        .event(E::StartupNoCar, [
            (Permanent, fixed(startup("Dashcam mode for unsupported car"))),
        ])
        .event(E::StartupNoFw, [
            (Permanent, fixed(startup_with(
                "Car Unrecognized",
                "Check comma power connections",
                AlertStatus::UserPrompt,
            ))),
        ])
        .event(E::DashcamMode, [
            (Permanent, fixed(normal_permanent_with("Dashcam Mode", "", 0.2, Priority::Lowest))),
        ])
        .event(E::InvalidLkasSetting, [
            (Permanent, fixed(normal_permanent_with(
                "Stock LKAS is on",
                "Turn off stock LKAS to engage",
                0.2,
                Priority::Lower,
            ))),
        ])
        .event(E::CruiseMismatch, none())
        .event(E::CarUnrecognized, [
            (Permanent, fixed(normal_permanent_with(
                "Dashcam Mode",
                "Car Unrecognized",
                0.2,
                Priority::Lowest,
            ))),
        ])
        .event(E::StockAeb, [
            (Permanent, alert(
                "BRAKE!", "Stock AEB: Risk of Collision",
                AlertStatus::Critical, AlertSize::Full,
                Priority::Highest, VisualAlert::Fcw, AudibleAlert::None, 2.0,
            )),
            (NoEntry, fixed(no_entry("Stock AEB: Risk of Collision"))),
        ])
        .event(E::Fcw, [
            (Permanent, alert(
                "BRAKE!", "Risk of Collision",
                AlertStatus::Critical, AlertSize::Full,
                Priority::Highest, VisualAlert::Fcw, AudibleAlert::WarningSoft, 2.0,
            )),
        ])
        .event(E::Ldw, [
            (Permanent, alert(
                "Lane Departure Detected", "",
                AlertStatus::UserPrompt, AlertSize::Small,
                Priority::Low, VisualAlert::Ldw, AudibleAlert::Prompt, 3.0,
            )),
        ])
        // alerts that display while engaged
        .event(E::SteerTempUnavailableSilent, [
            (Warning, alert(
                "Steering Temporarily Unavailable", "",
                AlertStatus::UserPrompt, AlertSize::Small,
                Priority::Low, VisualAlert::SteerRequired, AudibleAlert::Prompt, 1.8,
            )),
        ])
        .event(E::PreDriverDistracted, [
            (Permanent, alert(
                "Pay Attention", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::None, 0.1,
            )),
        ])
        .event(E::PromptDriverDistracted, [
            (Permanent, alert(
                "Pay Attention", "Driver Distracted",
                AlertStatus::UserPrompt, AlertSize::Mid,
                Priority::Mid, VisualAlert::SteerRequired, AudibleAlert::PromptDistracted, 0.1,
            )),
        ])
        .event(E::DriverDistracted, [
            (Permanent, alert(
                "DISENGAGE IMMEDIATELY", "Driver Distracted",
                AlertStatus::Critical, AlertSize::Full,
                Priority::High, VisualAlert::SteerRequired, AudibleAlert::WarningImmediate, 0.1,
            )),
        ])
        .event(E::PreDriverUnresponsive, [
            (Permanent, fixed(Alert::new(
                "Touch Steering Wheel: No Face Detected", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::SteerRequired, AudibleAlert::None, 0.1,
            ).with_rate(0.75))),
        ])
        .event(E::PromptDriverUnresponsive, [
            (Permanent, alert(
                "Touch Steering Wheel", "Driver Unresponsive",
                AlertStatus::UserPrompt, AlertSize::Mid,
                Priority::Mid, VisualAlert::SteerRequired, AudibleAlert::PromptDistracted, 0.1,
            )),
        ])
        .event(E::DriverUnresponsive, [
            (Permanent, alert(
                "DISENGAGE IMMEDIATELY", "Driver Unresponsive",
                AlertStatus::Critical, AlertSize::Full,
                Priority::High, VisualAlert::SteerRequired, AudibleAlert::WarningImmediate, 0.1,
            )),
        ])
        .event(E::ManualRestart, [
            (Warning, alert(
                "TAKE CONTROL", "Resume Driving Manually",
                AlertStatus::UserPrompt, AlertSize::Mid,
                Priority::Low, VisualAlert::None, AudibleAlert::None, 0.2,
            )),
        ])
        .event(E::ResumeRequired, [
            (Warning, alert(
                "Press Resume to Exit Standstill", "",
                AlertStatus::UserPrompt, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::None, 0.2,
            )),
        ])
        .event(E::BelowSteerSpeed, [
            (Warning, dynamic(callbacks::below_steer_speed)),
        ])
        .event(E::PreLaneChangeLeft, [
            (Warning, fixed(Alert::new(
                "Steer Left to Start Lane Change Once Safe", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::None, 0.1,
            ).with_rate(0.75))),
        ])
        .event(E::PreLaneChangeRight, [
            (Warning, fixed(Alert::new(
                "Steer Right to Start Lane Change Once Safe", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::None, 0.1,
            ).with_rate(0.75))),
        ])
        .event(E::LaneChangeBlocked, [
            (Warning, fixed(Alert::new(
                "Car Detected in Blindspot", "",
                AlertStatus::UserPrompt, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::PromptRepeat, 0.1,
            ).with_rate(0.75))),
        ])
        .event(E::LaneChange, [
            (Warning, alert(
                "Changing Lanes", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::None, 0.1,
            )),
        ])
        .event(E::SteerSaturated, [
            (Warning, alert(
                "Take Control", "Turn Exceeds Steering Limit",
                AlertStatus::UserPrompt, AlertSize::Mid,
                Priority::Low, VisualAlert::SteerRequired, AudibleAlert::PromptRepeat, 2.0,
            )),
        ])
        .event(E::FanMalfunction, [
            (Permanent, fixed(normal_permanent_with(
                "Fan Malfunction", "Likely Hardware Issue", 0.2, Priority::Lower,
            ))),
        ])
        .event(E::CameraMalfunction, [
            (Permanent, dynamic(callbacks::camera_malfunction)),
            (SoftDisable, soft_disable_spec("Camera Malfunction")),
            (NoEntry, fixed(no_entry("Camera Malfunction: Reboot Your Device"))),
        ])
        .event(E::CameraFrameRate, [
            (Permanent, fixed(normal_permanent_with(
                "Camera Frame Rate Low", "Reboot your Device", 0.2, Priority::Lower,
            ))),
            (SoftDisable, soft_disable_spec("Camera Frame Rate Low")),
            (NoEntry, fixed(no_entry("Camera Frame Rate Low: Reboot Your Device"))),
        ])
        .event(E::LocationdTemporaryError, [
            (NoEntry, fixed(no_entry("locationd Temporary Error"))),
            (SoftDisable, soft_disable_spec("locationd Temporary Error")),
        ])
        .event(E::LocationdPermanentError, [
            (NoEntry, fixed(no_entry("locationd Permanent Error"))),
            (ImmediateDisable, fixed(immediate_disable("locationd Permanent Error"))),
            (Permanent, fixed(normal_permanent("locationd Permanent Error"))),
        ])
        .event(E::ParamsdTemporaryError, [
            (NoEntry, fixed(no_entry("paramsd Temporary Error"))),
            (SoftDisable, soft_disable_spec("paramsd Temporary Error")),
        ])
        .event(E::ParamsdPermanentError, [
            (NoEntry, fixed(no_entry("paramsd Permanent Error"))),
            (ImmediateDisable, fixed(immediate_disable("paramsd Permanent Error"))),
            (Permanent, fixed(normal_permanent("paramsd Permanent Error"))),
        ])
        // engagement transitions
        .event(E::PcmEnable, [
            (Enable, fixed(engagement(AudibleAlert::Engage))),
        ])
        .event(E::ButtonEnable, [
            (Enable, fixed(engagement(AudibleAlert::Engage))),
        ])
        .event(E::PcmDisable, [
            (UserDisable, fixed(engagement(AudibleAlert::Disengage))),
        ])
        .event(E::ButtonCancel, [
            (UserDisable, fixed(engagement(AudibleAlert::Disengage))),
            (NoEntry, fixed(no_entry("Cancel Pressed"))),
        ])
        .event(E::BrakeHold, [
            (UserDisable, fixed(engagement(AudibleAlert::Disengage))),
            (NoEntry, fixed(no_entry("Brake Hold Active"))),
        ])
        .event(E::ParkBrake, [
            (UserDisable, fixed(engagement(AudibleAlert::Disengage))),
            (NoEntry, fixed(no_entry("Parking Brake Engaged"))),
        ])
        .event(E::PedalPressed, [
            (UserDisable, fixed(engagement(AudibleAlert::Disengage))),
            (NoEntry, fixed(no_entry_titled(
                "Driver Assist Unavailable",
                "Pedal Pressed",
                VisualAlert::BrakePressed,
            ))),
        ])
        .event(E::PreEnableStandstill, [
            (PreEnable, alert(
                "Release Brake to Engage", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Lowest, VisualAlert::None, AudibleAlert::None, 0.1,
            )),
        ])
        .event(E::GasPressedOverride, [
            (OverrideLongitudinal, alert(
                "", "",
                AlertStatus::Normal, AlertSize::None,
                Priority::Lowest, VisualAlert::None, AudibleAlert::None, 0.1,
            )),
        ])
        .event(E::SteerOverride, [
            (OverrideLateral, alert(
                "", "",
                AlertStatus::Normal, AlertSize::None,
                Priority::Lowest, VisualAlert::None, AudibleAlert::None, 0.1,
            )),
        ])
        .event(E::WrongCarMode, [
            (UserDisable, fixed(engagement(AudibleAlert::Disengage))),
            (NoEntry, dynamic(callbacks::wrong_car_mode)),
        ])
        .event(E::ResumeBlocked, [
            (NoEntry, fixed(no_entry("Press Set to Engage"))),
        ])
        .event(E::WrongCruiseMode, [
            (UserDisable, fixed(engagement(AudibleAlert::Disengage))),
            (NoEntry, fixed(no_entry("Adaptive Cruise Disabled"))),
        ])
        .event(E::SteerTempUnavailable, [
            (SoftDisable, soft_disable_spec("Steering Temporarily Unavailable")),
            (NoEntry, fixed(no_entry("Steering Temporarily Unavailable"))),
        ])
        .event(E::SteerTimeLimit, [
            (SoftDisable, soft_disable_spec("Vehicle Steering Time Limit")),
            (NoEntry, fixed(no_entry("Vehicle Steering Time Limit"))),
        ])
        .event(E::OutOfSpace, [
            (Permanent, dynamic(callbacks::out_of_space)),
            (NoEntry, fixed(no_entry("Out of Storage"))),
        ])
        .event(E::BelowEngageSpeed, [
            (NoEntry, dynamic(callbacks::below_engage_speed)),
        ])
        .event(E::SensorDataInvalid, [
            (Permanent, fixed(Alert::new(
                "Sensor Data Invalid", "Possible Hardware Issue",
                AlertStatus::Normal, AlertSize::Mid,
                Priority::Lower, VisualAlert::None, AudibleAlert::None, 0.2,
            ).with_creation_delay(1.0))),
            (NoEntry, fixed(no_entry("Sensor Data Invalid"))),
            (SoftDisable, soft_disable_spec("Sensor Data Invalid")),
        ])
        .event(E::NoGps, [
            (Permanent, fixed(Alert::new(
                "Poor GPS reception", "Ensure device has a clear view of the sky",
                AlertStatus::Normal, AlertSize::Mid,
                Priority::Lower, VisualAlert::None, AudibleAlert::None, 0.2,
            ).with_creation_delay(600.0))),
        ])
        .event(E::SoundsUnavailable, [
            (Permanent, fixed(normal_permanent_with(
                "Speaker not found", "Reboot your Device", 0.2, Priority::Lower,
            ))),
            (NoEntry, fixed(no_entry("Speaker not found"))),
        ])
        .event(E::TooDistracted, [
            (NoEntry, fixed(no_entry("Distraction Level Too High"))),
        ])
        .event(E::Overheat, [
            (Permanent, dynamic(callbacks::overheat)),
            (SoftDisable, soft_disable_spec("System Overheated")),
            (NoEntry, fixed(no_entry("System Overheated"))),
        ])
        .event(E::WrongGear, [
            (SoftDisable, user_soft_disable_spec("Gear not D")),
            (NoEntry, fixed(no_entry("Gear not D"))),
        ])
        .event(E::CalibrationInvalid, [
            (Permanent, dynamic(callbacks::calibration_invalid)),
            (SoftDisable, soft_disable_spec("Calibration Invalid: Remount Device & Recalibrate")),
            (NoEntry, fixed(no_entry("Calibration Invalid: Remount Device & Recalibrate"))),
        ])
        .event(E::CalibrationIncomplete, [
            (Permanent, dynamic(callbacks::calibration_incomplete)),
            (SoftDisable, soft_disable_spec("Calibration Incomplete")),
            (NoEntry, fixed(no_entry("Calibration in Progress"))),
        ])
        .event(E::CalibrationRecalibrating, [
            (Permanent, dynamic(callbacks::calibration_incomplete)),
            (SoftDisable, soft_disable_spec("Device Remount Detected: Recalibrating")),
            (NoEntry, fixed(no_entry("Remount Detected: Recalibrating"))),
        ])
        .event(E::DoorOpen, [
            (SoftDisable, user_soft_disable_spec("Door Open")),
            (NoEntry, fixed(no_entry("Door Open"))),
        ])
        .event(E::SeatbeltNotLatched, [
            (SoftDisable, user_soft_disable_spec("Seatbelt Unlatched")),
            (NoEntry, fixed(no_entry("Seatbelt Unlatched"))),
        ])
        .event(E::EspDisabled, [
            (SoftDisable, soft_disable_spec("Electronic Stability Control Disabled")),
            (NoEntry, fixed(no_entry("Electronic Stability Control Disabled"))),
        ])
        .event(E::LowBattery, [
            (SoftDisable, soft_disable_spec("Low Battery")),
            (NoEntry, fixed(no_entry("Low Battery"))),
        ])
        .event(E::CommIssue, [
            (SoftDisable, soft_disable_spec("Communication Issue Between Processes")),
            (NoEntry, dynamic(callbacks::comm_issue)),
        ])
        .event(E::CommIssueAvgFreq, [
            (SoftDisable, soft_disable_spec("Low Communication Rate Between Processes")),
            (NoEntry, fixed(no_entry("Low Communication Rate Between Processes"))),
        ])
        .event(E::ControlsdLagging, [
            (SoftDisable, soft_disable_spec("Controls Lagging")),
            (NoEntry, fixed(no_entry("Controls Process Lagging: Reboot Your Device"))),
        ])
        .event(E::ProcessNotRunning, [
            (NoEntry, dynamic(callbacks::process_not_running)),
            (SoftDisable, soft_disable_spec("Process Not Running")),
        ])
        .event(E::RadarFault, [
            (SoftDisable, soft_disable_spec("Radar Error: Restart the Car")),
            (NoEntry, fixed(no_entry("Radar Error: Restart the Car"))),
        ])
        .event(E::ModeldLagging, [
            (SoftDisable, soft_disable_spec("Driving Model Lagging")),
            (NoEntry, fixed(no_entry("Driving Model Lagging"))),
            (Permanent, dynamic(callbacks::modeld_lagging)),
        ])
        .event(E::PosenetInvalid, [
            (SoftDisable, soft_disable_spec("Posenet Speed Invalid")),
            (NoEntry, dynamic(callbacks::posenet_invalid)),
        ])
        .event(E::DeviceFalling, [
            (SoftDisable, soft_disable_spec("Device Fell Off Mount")),
            (NoEntry, fixed(no_entry("Device Fell Off Mount"))),
        ])
        .event(E::LowMemory, [
            (SoftDisable, soft_disable_spec("Low Memory: Reboot Your Device")),
            (Permanent, dynamic(callbacks::low_memory)),
            (NoEntry, fixed(no_entry("Low Memory: Reboot Your Device"))),
        ])
        .event(E::HighCpuUsage, [
            (NoEntry, dynamic(callbacks::high_cpu_usage)),
        ])
        .event(E::AccFaulted, [
            (ImmediateDisable, fixed(immediate_disable("Cruise Fault: Restart the Car"))),
            (Permanent, fixed(normal_permanent_with(
                "Cruise Fault: Restart the car to engage", "", 0.2, Priority::Lower,
            ))),
            (NoEntry, fixed(no_entry("Cruise Fault: Restart the Car"))),
        ])
        .event(E::ControlsMismatch, [
            (ImmediateDisable, fixed(immediate_disable("Controls Mismatch"))),
            (NoEntry, fixed(no_entry("Controls Mismatch"))),
        ])
        .event(E::RoadCameraError, [
            (Permanent, fixed(normal_permanent_with(
                "Camera CRC Error - Road", "", 1.0, Priority::Lowest,
            ))),
        ])
        .event(E::WideRoadCameraError, [
            (Permanent, fixed(normal_permanent_with(
                "Camera CRC Error - Road Fisheye", "", 1.0, Priority::Lowest,
            ))),
        ])
        .event(E::DriverCameraError, [
            (Permanent, fixed(normal_permanent_with(
                "Camera CRC Error - Driver", "", 1.0, Priority::Lowest,
            ))),
        ])
        .event(E::UsbError, [
            (SoftDisable, soft_disable_spec("USB Error: Reboot Your Device")),
            (Permanent, fixed(normal_permanent_with(
                "USB Error: Reboot Your Device", "", 0.2, Priority::Lower,
            ))),
            (NoEntry, fixed(no_entry("USB Error: Reboot Your Device"))),
        ])
        .event(E::CanError, [
            (ImmediateDisable, fixed(immediate_disable("CAN Error"))),
            (Permanent, fixed(Alert::new(
                "CAN Error: Check Connections", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Lower, VisualAlert::None, AudibleAlert::None, 1.0,
            ).with_creation_delay(1.0))),
            (NoEntry, fixed(no_entry("CAN Error: Check Connections"))),
        ])
        .event(E::CanBusMissing, [
            (ImmediateDisable, fixed(immediate_disable("CAN Bus Disconnected"))),
            (Permanent, fixed(Alert::new(
                "CAN Bus Disconnected: Likely Faulty Cable", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Lower, VisualAlert::None, AudibleAlert::None, 1.0,
            ).with_creation_delay(1.0))),
            (NoEntry, fixed(no_entry("CAN Bus Disconnected: Check Connections"))),
        ])
        .event(E::SteerUnavailable, [
            (ImmediateDisable, fixed(immediate_disable("LKAS Fault: Restart the Car"))),
            (Permanent, fixed(normal_permanent("LKAS Fault: Restart the car to engage"))),
            (NoEntry, fixed(no_entry("LKAS Fault: Restart the Car"))),
        ])
        .event(E::ReverseGear, [
            (Permanent, fixed(Alert::new(
                "Reverse\nGear", "",
                AlertStatus::Normal, AlertSize::Full,
                Priority::Lowest, VisualAlert::None, AudibleAlert::None, 0.2,
            ).with_creation_delay(0.5))),
            (UserDisable, fixed(immediate_disable("Reverse Gear"))),
            (NoEntry, fixed(no_entry("Reverse Gear"))),
        ])
        .event(E::CruiseDisabled, [
            (ImmediateDisable, fixed(immediate_disable("Cruise Is Off"))),
        ])
        .event(E::RelayMalfunction, [
            (ImmediateDisable, fixed(immediate_disable("Harness Relay Malfunction"))),
            (Permanent, fixed(normal_permanent_with(
                "Harness Relay Malfunction", "Check Hardware", 0.2, Priority::Lower,
            ))),
            (NoEntry, fixed(no_entry("Harness Relay Malfunction"))),
        ])
        .event(E::SpeedTooLow, [
            (ImmediateDisable, alert(
                "Driver Assist Canceled", "Speed too low",
                AlertStatus::Normal, AlertSize::Mid,
                Priority::High, VisualAlert::None, AudibleAlert::Disengage, 3.0,
            )),
        ])
        .event(E::SpeedTooHigh, [
            (Warning, alert(
                "Speed Too High", "Model uncertain at this speed",
                AlertStatus::UserPrompt, AlertSize::Mid,
                Priority::High, VisualAlert::SteerRequired, AudibleAlert::PromptRepeat, 4.0,
            )),
            (NoEntry, fixed(no_entry("Slow down to engage"))),
        ])
        .event(E::LowSpeedLockout, [
            (Permanent, fixed(normal_permanent_with(
                "Cruise Fault: Restart the car to engage", "", 0.2, Priority::Lower,
            ))),
            (NoEntry, fixed(no_entry("Cruise Fault: Restart the Car"))),
        ])
        .event(E::LkasDisabled, [
            (Permanent, fixed(normal_permanent("LKAS Disabled: Enable LKAS to engage"))),
            (NoEntry, fixed(no_entry("LKAS Disabled"))),
        ])
        .event(E::VehicleSensorsInvalid, [
            (ImmediateDisable, fixed(immediate_disable("Vehicle Sensors Invalid"))),
            (Permanent, fixed(normal_permanent("Vehicle Sensors Calibrating: Drive to Calibrate"))),
            (NoEntry, fixed(no_entry("Vehicle Sensors Calibrating"))),
        ])
        .event(E::StartupNoSecOcKey, [
            (Permanent, fixed(normal_permanent_with(
                "Dashcam Mode", "Security Key Not Available", 0.2, Priority::High,
            ))),
        ])
        // driving assistance notices
        .event(E::ForcingStop, [(Warning, dynamic(callbacks::forcing_stop))])
        .event(E::GreenLight, [
            (Permanent, alert(
                "Light turned green", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Mid, VisualAlert::None, AudibleAlert::Prompt, 3.0,
            )),
        ])
        .event(E::LaneChangeBlockedLoud, [
            (Warning, alert(
                "Car Detected in Blindspot", "",
                AlertStatus::UserPrompt, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::WarningSoft, 0.1,
            )),
        ])
        .event(E::LeadDeparting, [
            (Permanent, alert(
                "Lead departed", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Mid, VisualAlert::None, AudibleAlert::Prompt, 3.0,
            )),
        ])
        .event(E::NoLaneAvailable, [(Warning, dynamic(callbacks::no_lane_available))])
        .event(E::OpenpilotCrashed, [
            (ImmediateDisable, alert(
                "Driver Assist crashed", "Please post the error log",
                AlertStatus::Critical, AlertSize::Mid,
                Priority::Highest, VisualAlert::None, AudibleAlert::Prompt, 0.1,
            )),
            (NoEntry, alert(
                "Driver Assist crashed", "Please post the error log",
                AlertStatus::Critical, AlertSize::Mid,
                Priority::Highest, VisualAlert::None, AudibleAlert::Prompt, 0.1,
            )),
        ])
        .event(E::PedalInterceptorNoBrake, [
            (Warning, alert(
                "Braking Unavailable", "Shift to L",
                AlertStatus::UserPrompt, AlertSize::Mid,
                Priority::High, VisualAlert::WrongGear, AudibleAlert::PromptRepeat, 4.0,
            )),
        ])
        .event(E::SpeedLimitChanged, [
            (Permanent, alert(
                "Speed Limit Changed", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::Prompt, 3.0,
            )),
        ])
        .event(E::TrafficModeActive, [
            (Warning, alert(
                "Traffic Mode Enabled", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::Prompt, 3.0,
            )),
        ])
        .event(E::TrafficModeInactive, [
            (Warning, alert(
                "Traffic Mode Disabled", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Low, VisualAlert::None, AudibleAlert::Prompt, 3.0,
            )),
        ])
        .event(E::TurningLeft, [
            (Warning, fixed(Alert::new(
                "Turning Left", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Lowest, VisualAlert::None, AudibleAlert::None, 0.1,
            ).with_rate(0.75))),
        ])
        .event(E::TurningRight, [
            (Warning, fixed(Alert::new(
                "Turning Right", "",
                AlertStatus::Normal, AlertSize::Small,
                Priority::Lowest, VisualAlert::None, AudibleAlert::None, 0.1,
            ).with_rate(0.75))),
        ])
        .require_all_events()
        .build()
}
