//! Badge view-model: what a tab's toolbar badge should display.

/// Two fixed background colors, keyed by `(paused, count > 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    /// Red: actively hiding and at least one item hidden in this tab.
    Alert,
    /// Gray: paused, or nothing hidden in this tab.
    Muted,
}

impl BadgeColor {
    pub fn css(self) -> &'static str {
        match self {
            BadgeColor::Alert => "#CC0000",
            BadgeColor::Muted => "#717171",
        }
    }
}

/// Derived badge contents for one tab. Text is always the decimal count,
/// including `"0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub color: BadgeColor,
    pub tooltip: String,
}

impl Badge {
    pub fn for_tab(count: u64, paused: bool) -> Self {
        let color = if !paused && count > 0 {
            BadgeColor::Alert
        } else {
            BadgeColor::Muted
        };
        let unit = if count == 1 { "video" } else { "videos" };
        let suffix = if paused { " (paused)" } else { "" };
        Self {
            text: count.to_string(),
            color,
            tooltip: format!("{count} {unit} hidden{suffix}"),
        }
    }
}
