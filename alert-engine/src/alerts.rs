//! Alert factories
//!
//! Each alert flavor is a plain function returning a flat [`Alert`] with the
//! flavor's presentation preset. Catalog entries only supply the text.

use crate::types::{Alert, AlertSize, AlertStatus, AudibleAlert, Priority, VisualAlert};

pub const NO_ENTRY_TITLE: &str = "Driver Assist Unavailable";
pub const TAKE_CONTROL_TITLE: &str = "TAKE CONTROL IMMEDIATELY";
pub const USER_DISABLE_TITLE: &str = "Driver Assist will disengage";
pub const STARTUP_SUBTITLE: &str = "Always keep hands on wheel and eyes on road";

const MS_TO_KPH: f64 = 3.6;
const MS_TO_MPH: f64 = 2.236_936_29;
const METER_TO_FOOT: f64 = 3.280_839_9;

/// Engagement refused
pub fn no_entry(text_2: impl Into<String>) -> Alert {
    no_entry_titled(NO_ENTRY_TITLE, text_2, VisualAlert::None)
}

/// Engagement refused, with a custom title and visual cue
pub fn no_entry_titled(
    text_1: impl Into<String>,
    text_2: impl Into<String>,
    visual: VisualAlert,
) -> Alert {
    Alert::new(
        text_1,
        text_2,
        AlertStatus::Normal,
        AlertSize::Mid,
        Priority::Low,
        visual,
        AudibleAlert::Refuse,
        3.0,
    )
}

/// Disengagement with a grace period
pub fn soft_disable(text_2: impl Into<String>) -> Alert {
    Alert::new(
        TAKE_CONTROL_TITLE,
        text_2,
        AlertStatus::UserPrompt,
        AlertSize::Full,
        Priority::Mid,
        VisualAlert::SteerRequired,
        AudibleAlert::WarningSoft,
        2.0,
    )
}

/// Softer soft-disable for conditions the driver caused
pub fn user_soft_disable(text_2: impl Into<String>) -> Alert {
    Alert {
        text_1: USER_DISABLE_TITLE.to_string(),
        ..soft_disable(text_2)
    }
}

/// Disengagement without grace period
pub fn immediate_disable(text_2: impl Into<String>) -> Alert {
    Alert::new(
        TAKE_CONTROL_TITLE,
        text_2,
        AlertStatus::Critical,
        AlertSize::Full,
        Priority::Highest,
        VisualAlert::SteerRequired,
        AudibleAlert::WarningImmediate,
        4.0,
    )
}

/// Silent banner-less chime for engage/disengage
pub fn engagement(audible: AudibleAlert) -> Alert {
    Alert::new(
        "",
        "",
        AlertStatus::Normal,
        AlertSize::None,
        Priority::Mid,
        VisualAlert::None,
        audible,
        0.2,
    )
}

/// Informational banner shown in every state
pub fn normal_permanent(text_1: impl Into<String>) -> Alert {
    normal_permanent_with(text_1, "", 0.2, Priority::Lower)
}

/// Informational banner with a second line, duration and priority
///
/// The banner is mid-size when there is a second line, small otherwise.
pub fn normal_permanent_with(
    text_1: impl Into<String>,
    text_2: impl Into<String>,
    duration_secs: f64,
    priority: Priority,
) -> Alert {
    let text_2 = text_2.into();
    let size = if text_2.is_empty() { AlertSize::Small } else { AlertSize::Mid };
    Alert::new(
        text_1,
        text_2,
        AlertStatus::Normal,
        size,
        priority,
        VisualAlert::None,
        AudibleAlert::None,
        duration_secs,
    )
}

/// Banner shown right after boot
pub fn startup(text_1: impl Into<String>) -> Alert {
    startup_with(text_1, STARTUP_SUBTITLE, AlertStatus::Normal)
}

pub fn startup_with(
    text_1: impl Into<String>,
    text_2: impl Into<String>,
    status: AlertStatus,
) -> Alert {
    Alert::new(
        text_1,
        text_2,
        status,
        AlertSize::Mid,
        Priority::Lower,
        VisualAlert::None,
        AudibleAlert::None,
        5.0,
    )
}

/// Render a speed given in m/s, e.g. `"32 km/h"`
pub fn display_speed(speed_ms: f64, metric: bool) -> String {
    if !speed_ms.is_finite() {
        let unit = if metric { "km/h" } else { "mph" };
        return format!("-- {}", unit);
    }
    let (factor, unit) = if metric { (MS_TO_KPH, "km/h") } else { (MS_TO_MPH, "mph") };
    format!("{} {}", (speed_ms * factor).round() as i64, unit)
}

/// Render a distance given in meters, e.g. `"3.2 meters"`
pub fn display_distance(meters: f64, metric: bool) -> String {
    if metric {
        format!("{:.1} meters", meters)
    } else {
        format!("{:.1} feet", meters * METER_TO_FOOT)
    }
}
