//! Shared formatting helpers for panels.
//!
//! All pure formatting functions (no ratatui styles, no layout) live here.
//! Table cells use [`FmtStyle::Compact`]; subtitles and overlays use
//! [`FmtStyle::Detail`].

/// Controls compact (table cells) vs verbose (subtitles) output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmtStyle {
    /// No space before the unit: `"1.5GB"`.
    Compact,
    /// Space before the unit: `"1.5 GB"`.
    Detail,
}

/// Unit base for byte sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeBase {
    /// Powers of 1024.
    #[default]
    Binary,
    /// Powers of 1000.
    Decimal,
}

impl SizeBase {
    pub fn from_base10(base_10: bool) -> Self {
        if base_10 {
            SizeBase::Decimal
        } else {
            SizeBase::Binary
        }
    }

    fn divisor(self) -> f64 {
        match self {
            SizeBase::Binary => 1024.0,
            SizeBase::Decimal => 1000.0,
        }
    }
}

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte quantity with one decimal.
///
/// Compact: `"512.0B"`, `"1.5GB"`
/// Detail:  `"512.0 B"`, `"1.5 GB"`
pub fn format_bytes(bytes: f64, base: SizeBase, style: FmtStyle) -> String {
    let divisor = base.divisor();
    let mut value = bytes.max(0.0);
    let mut unit = 0;
    while value >= divisor && unit < UNITS.len() - 1 {
        value /= divisor;
        unit += 1;
    }
    match style {
        FmtStyle::Compact => format!("{:.1}{}", value, UNITS[unit]),
        FmtStyle::Detail => format!("{:.1} {}", value, UNITS[unit]),
    }
}

/// Format a bytes-per-second rate: `"1.5MB/s"`.
pub fn format_speed(rate: f64, base: SizeBase, style: FmtStyle) -> String {
    format!("{}/s", format_bytes(rate, base, style))
}

/// [`format_speed`] for optional rates; `"N/A"` when unknown.
pub fn format_opt_speed(rate: Option<f64>, base: SizeBase, style: FmtStyle) -> String {
    match rate {
        Some(r) => format_speed(r, base, style),
        None => "N/A".to_string(),
    }
}

/// Format uptime as whole hours and minutes: `"26h 3m"`.
pub fn format_uptime(secs: u64) -> String {
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}

/// Format a remaining duration: `"2h 05m"`, `"45m"`.
pub fn format_remaining(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format an integer with thousands separators: `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Truncate to at most `max` characters, marking the cut with `"..."`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
