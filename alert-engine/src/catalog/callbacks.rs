//! Dynamic alerts for the standard catalog
//!
//! Every callback reads the sampled snapshot through a [`ContextView`]. Absent
//! channels come back as sentinels (NaN, empty text, false), so callbacks only
//! fail when a value is present but nonsensical.

use super::AlertSpec;
use crate::alerts::{self, display_distance, display_speed};
use crate::context::ContextView;
use crate::types::{Alert, AlertSize, AlertStatus, AudibleAlert, Priority, ResolveError, VisualAlert};

/// Minimum speed for the calibration filter (15 mph)
const MIN_SPEED_FILTER_MS: f64 = 6.7056;

/// Soft disable that escalates to an immediate disable once the grace period
/// is almost over
pub fn soft_disable_spec(text_2: &'static str) -> AlertSpec {
    AlertSpec::dynamic(move |view| {
        if view.soft_disable_imminent() {
            Ok(alerts::immediate_disable(text_2))
        } else {
            Ok(alerts::soft_disable(text_2))
        }
    })
}

/// Same as [`soft_disable_spec`] for driver-caused conditions
pub fn user_soft_disable_spec(text_2: &'static str) -> AlertSpec {
    AlertSpec::dynamic(move |view| {
        if view.soft_disable_imminent() {
            Ok(alerts::immediate_disable(text_2))
        } else {
            Ok(alerts::user_soft_disable(text_2))
        }
    })
}

pub fn startup_master(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let branch = view.text("system.branch");
    Ok(alerts::startup_with(
        "WARNING: This branch is not tested",
        branch,
        AlertStatus::UserPrompt,
    ))
}

pub fn below_engage_speed(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let speed = view.number("carParams.minEnableSpeed");
    Ok(alerts::no_entry(format!(
        "Drive above {} to engage",
        display_speed(speed, view.metric())
    )))
}

pub fn below_steer_speed(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let speed = view.number("carParams.minSteerSpeed");
    Ok(Alert::new(
        format!("Steer Unavailable Below {}", display_speed(speed, view.metric())),
        "",
        AlertStatus::UserPrompt,
        AlertSize::Small,
        Priority::Low,
        VisualAlert::SteerRequired,
        AudibleAlert::Prompt,
        0.4,
    ))
}

pub fn calibration_incomplete(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let first_word = if view.flag("liveCalibration.recalibrating") {
        "Recalibration"
    } else {
        "Calibration"
    };
    let percent = view.number("liveCalibration.calPerc");
    Ok(Alert::new(
        format!("{} in Progress: {:.0}%", first_word, percent),
        format!("Drive Above {}", display_speed(MIN_SPEED_FILTER_MS, view.metric())),
        AlertStatus::Normal,
        AlertSize::Mid,
        Priority::Lowest,
        VisualAlert::None,
        AudibleAlert::None,
        0.2,
    ))
}

pub fn calibration_invalid(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let pitch = view.number("liveCalibration.pitch").to_degrees();
    let yaw = view.number("liveCalibration.yaw").to_degrees();
    Ok(alerts::normal_permanent_with(
        "Calibration Invalid",
        format!("Remount Device (Pitch: {:.1}°, Yaw: {:.1}°)", pitch, yaw),
        0.2,
        Priority::Lower,
    ))
}

pub fn out_of_space(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let free = view.number("deviceState.freeSpacePercent");
    if !free.is_nan() && !(0.0..=100.0).contains(&free) {
        return Err(ResolveError::InvalidChannel {
            channel: "deviceState.freeSpacePercent".to_string(),
            reason: format!("{} is not a percentage", free),
        });
    }
    Ok(alerts::normal_permanent_with(
        "Out of Storage",
        format!("{:.0}% full", 100.0 - free),
        0.2,
        Priority::Lower,
    ))
}

pub fn posenet_invalid(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let error = view.number("carState.vEgo") - view.number("modelV2.velocity");
    Ok(alerts::no_entry_titled(
        "Posenet Speed Invalid",
        format!("Speed Error: {:.1} m/s", error),
        VisualAlert::None,
    ))
}

pub fn process_not_running(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let processes = view.text("managerState.notRunning");
    Ok(alerts::no_entry_titled("Process Not Running", processes, VisualAlert::None))
}

pub fn comm_issue(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let services = view.text("messaging.invalidServices");
    Ok(alerts::no_entry_titled(
        "Communication Issue Between Processes",
        services,
        VisualAlert::None,
    ))
}

pub fn camera_malfunction(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let cameras = view.text("messaging.badCameras");
    Ok(alerts::normal_permanent_with("Camera Malfunction", cameras, 0.2, Priority::Lower))
}

pub fn overheat(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    // f64::max ignores a NaN operand, so absent sensors drop out
    let temp = view
        .number("deviceState.cpuTempC")
        .max(view.number("deviceState.gpuTempC"))
        .max(view.number("deviceState.memoryTempC"));
    Ok(alerts::normal_permanent_with(
        "System Overheated",
        format!("{:.0} °C", temp),
        0.2,
        Priority::Lower,
    ))
}

pub fn low_memory(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let used = view.number("deviceState.memoryUsagePercent");
    Ok(alerts::normal_permanent_with(
        "Low Memory",
        format!("{:.0}% used", used),
        0.2,
        Priority::Lower,
    ))
}

pub fn high_cpu_usage(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let used = view.number("deviceState.cpuUsagePercent");
    Ok(alerts::normal_permanent_with(
        "High CPU Usage",
        format!("{:.0}% used", used),
        0.2,
        Priority::Lower,
    ))
}

pub fn modeld_lagging(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let dropped = view.number("modelV2.frameDropPerc");
    Ok(alerts::normal_permanent_with(
        "Driving Model Lagging",
        format!("{:.1}% frames dropped", dropped),
        0.2,
        Priority::Lower,
    ))
}

pub fn wrong_car_mode(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let text = if view.flag("carParams.hasCruiseLong") {
        "Enable Cruise Control to Engage"
    } else if view.text("carParams.brand") == "honda" {
        "Main Switch Off"
    } else {
        "Enable Adaptive Cruise to Engage"
    };
    Ok(alerts::no_entry(text))
}

pub fn joystick(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    // NaN casts to 0, so an idle joystick reads 0%
    let gas = (view.number("testJoystick.gas") * 100.0).round() as i64;
    let steer = (view.number("testJoystick.steer") * 100.0).round() as i64;
    Ok(alerts::normal_permanent_with(
        "Joystick Mode",
        format!("Gas: {}%, Steer: {}%", gas, steer),
        0.2,
        Priority::Lower,
    ))
}

pub fn forcing_stop(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let length = view.number("drivingPlan.forcingStopLength");
    Ok(Alert::new(
        format!("Forcing the car to stop in {}", display_distance(length, view.metric())),
        "Press the gas pedal or 'Resume' button to override",
        AlertStatus::Normal,
        AlertSize::Mid,
        Priority::Mid,
        VisualAlert::None,
        AudibleAlert::Prompt,
        1.0,
    ))
}

/// Lane width on the side the driver is signalling
pub fn no_lane_available(view: &mut ContextView<'_>) -> Result<Alert, ResolveError> {
    let width = if view.flag("carState.leftBlinker") {
        view.number("drivingPlan.laneWidthLeft")
    } else {
        view.number("drivingPlan.laneWidthRight")
    };
    Ok(Alert::new(
        "No lane available",
        format!("Detected lane width is only {}", display_distance(width, view.metric())),
        AlertStatus::Normal,
        AlertSize::Mid,
        Priority::Lowest,
        VisualAlert::None,
        AudibleAlert::None,
        0.2,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AlertContext, SignalValue};

    fn run(
        f: fn(&mut ContextView<'_>) -> Result<Alert, ResolveError>,
        ctx: &AlertContext,
    ) -> (Result<Alert, ResolveError>, Vec<String>) {
        let mut view = ContextView::new(ctx, true, 50);
        let result = f(&mut view);
        (result, view.into_missing())
    }

    #[test]
    fn test_soft_disable_escalates() {
        let spec = soft_disable_spec("Sensor Data Invalid");

        let ctx = AlertContext::new().with_soft_disable_ticks(300);
        let mut view = ContextView::new(&ctx, true, 50);
        let alert = spec.materialize(&mut view).unwrap();
        assert_eq!(alert.priority, Priority::Mid);

        let ctx = AlertContext::new().with_soft_disable_ticks(10);
        let mut view = ContextView::new(&ctx, true, 50);
        let alert = spec.materialize(&mut view).unwrap();
        assert_eq!(alert.priority, Priority::Highest);
        assert_eq!(alert.text_2, "Sensor Data Invalid");
    }

    #[test]
    fn test_below_engage_speed_text() {
        let ctx = AlertContext::new().with_channel("carParams.minEnableSpeed", SignalValue::Float(10.0));
        let (alert, missing) = run(below_engage_speed, &ctx);
        assert_eq!(alert.unwrap().text_2, "Drive above 36 km/h to engage");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_missing_channel_uses_sentinel() {
        let (alert, missing) = run(low_memory, &AlertContext::new());
        assert_eq!(alert.unwrap().text_2, "NaN% used");
        assert_eq!(missing, vec!["deviceState.memoryUsagePercent".to_string()]);
    }

    #[test]
    fn test_overheat_takes_hottest_present_sensor() {
        let ctx = AlertContext::new()
            .with_channel("deviceState.cpuTempC", SignalValue::Float(71.4))
            .with_channel("deviceState.memoryTempC", SignalValue::Integer(80));
        let (alert, missing) = run(overheat, &ctx);
        assert_eq!(alert.unwrap().text_2, "80 °C");
        assert_eq!(missing, vec!["deviceState.gpuTempC".to_string()]);
    }

    #[test]
    fn test_out_of_space_rejects_bad_percentage() {
        let ctx = AlertContext::new().with_channel("deviceState.freeSpacePercent", SignalValue::Float(140.0));
        let (alert, _) = run(out_of_space, &ctx);
        assert!(matches!(alert, Err(ResolveError::InvalidChannel { .. })));

        let ctx = AlertContext::new().with_channel("deviceState.freeSpacePercent", SignalValue::Float(7.0));
        let (alert, _) = run(out_of_space, &ctx);
        assert_eq!(alert.unwrap().text_2, "93% full");
    }

    #[test]
    fn test_wrong_car_mode_variants() {
        let ctx = AlertContext::new().with_channel("carParams.brand", SignalValue::Text("honda".into()));
        let (alert, _) = run(wrong_car_mode, &ctx);
        assert_eq!(alert.unwrap().text_2, "Main Switch Off");

        let (alert, _) = run(wrong_car_mode, &AlertContext::new());
        assert_eq!(alert.unwrap().text_2, "Enable Adaptive Cruise to Engage");
    }

    #[test]
    fn test_joystick_idle() {
        let (alert, _) = run(joystick, &AlertContext::new());
        assert_eq!(alert.unwrap().text_2, "Gas: 0%, Steer: 0%");
    }

    #[test]
    fn test_no_lane_available_follows_blinker() {
        let ctx = AlertContext::new()
            .with_channel("carState.leftBlinker", SignalValue::Boolean(true))
            .with_channel("drivingPlan.laneWidthLeft", SignalValue::Float(2.4))
            .with_channel("drivingPlan.laneWidthRight", SignalValue::Float(3.5));
        let (alert, missing) = run(no_lane_available, &ctx);
        assert_eq!(alert.unwrap().text_2, "Detected lane width is only 2.4 meters");
        assert!(missing.is_empty());

        let ctx = AlertContext::new().with_channel("drivingPlan.laneWidthRight", SignalValue::Float(3.5));
        let (alert, missing) = run(no_lane_available, &ctx);
        assert_eq!(alert.unwrap().text_2, "Detected lane width is only 3.5 meters");
        assert_eq!(missing, vec!["carState.leftBlinker".to_string()]);
    }

    #[test]
    fn test_forcing_stop_distance() {
        let ctx = AlertContext::new().with_channel("drivingPlan.forcingStopLength", SignalValue::Float(12.0));
        let (alert, _) = run(forcing_stop, &ctx);
        assert_eq!(alert.unwrap().text_1, "Forcing the car to stop in 12.0 meters");
    }
}
