/// One day of the weekly focus chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMetric {
    pub label: &'static str,
    /// Times the user tried to open the distracting app
    pub attempts: u64,
    /// Times the user chose to focus instead
    pub focus: u64,
}

/// Sample week shown on the metrics screen. Not computed from real usage.
pub const SAMPLE_WEEK: [DayMetric; 7] = [
    DayMetric { label: "Mon", attempts: 8, focus: 5 },
    DayMetric { label: "Tue", attempts: 10, focus: 6 },
    DayMetric { label: "Wed", attempts: 7, focus: 4 },
    DayMetric { label: "Thu", attempts: 12, focus: 8 },
    DayMetric { label: "Fri", attempts: 9, focus: 7 },
    DayMetric { label: "Sat", attempts: 5, focus: 3 },
    DayMetric { label: "Sun", attempts: 6, focus: 4 },
];

/// Today's card on the metrics screen
pub const TODAY: DayMetric = DayMetric { label: "Thursday", attempts: 12, focus: 8 };

/// Current streak shown on the metrics screen
pub const STREAK_DAYS: u32 = 5;

/// Largest value across both series, used to scale the bars
pub fn max_value(week: &[DayMetric]) -> u64 {
    week.iter().map(|d| d.attempts.max(d.focus)).max().unwrap_or(0)
}

/// Bar length for `value` when `max` maps to `height` cells
pub fn scaled(value: u64, max: u64, height: u64) -> u64 {
    if max == 0 {
        return 0;
    }
    value * height / max
}

pub fn today_message(day: &DayMetric) -> String {
    format!("You redirected your focus {} times today. Well done!", day.focus)
}
