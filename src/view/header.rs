//! Header and footer lines.

use chrono::{DateTime, TimeZone};

use super::ViewSettings;
use super::common::{Tier, ViewCell, ViewLine};
use crate::fmt::{format_remaining, format_uptime};
use crate::history::EnrichedSnapshot;
use crate::model::BatterySample;
use crate::theme::Role;
use crate::tui::state::InteractionState;

const KEY_HINTS: &str = "q:Quit | h:Help | m:Menu | p:Pause | s:Sort | f:Filter";

/// `SysView - host - Uptime: Xh Ym`, then pause, filter and sort markers
/// and the wall clock.
pub fn build_header<Tz: TimeZone>(
    enriched: &EnrichedSnapshot,
    state: &InteractionState,
    now: &DateTime<Tz>,
) -> ViewLine
where
    Tz::Offset: std::fmt::Display,
{
    let title = match &enriched.snapshot.system {
        Some(system) => {
            let uptime = system.uptime_at(u64::try_from(now.timestamp()).unwrap_or(0));
            format!("SysView - {} - Uptime: {}", system.hostname, format_uptime(uptime))
        }
        None => "SysView - unknown - Uptime: N/A".to_string(),
    };

    let mut spans = vec![ViewCell::styled(title, Role::Header).bold()];
    if state.paused {
        spans.push(ViewCell::styled(" [PAUSED]", Role::ProgressHigh).bold());
    }
    if !state.filter_text.is_empty() {
        spans.push(ViewCell::styled(
            format!(" [filter: {}]", state.filter_text),
            Role::Highlight,
        ));
    }
    let arrow = if state.sort_descending { "↓" } else { "↑" };
    spans.push(ViewCell::styled(
        format!(" [sort: {}{}]", state.sort_key.label(), arrow),
        Role::Header,
    ));
    spans.push(ViewCell::styled(
        format!("  {}", now.format("%H:%M:%S")),
        Role::Header,
    ));
    ViewLine { spans }
}

pub fn battery_text(battery: &BatterySample) -> String {
    let mut text = format!("Battery: {:.0}%", battery.pct);
    if battery.plugged {
        text.push_str(" (plugged)");
    } else if let Some(secs) = battery.seconds_left {
        text.push_str(&format!(" ({} left)", format_remaining(secs)));
    }
    text
}

/// Battery state when enabled and present, then the key hints.
pub fn build_footer(enriched: &EnrichedSnapshot, settings: &ViewSettings) -> ViewLine {
    let mut spans = Vec::new();
    if settings.show_battery
        && let Some(battery) = &enriched.snapshot.battery
    {
        let tier = Tier::classify(100.0 - battery.pct, 50.0, 80.0);
        spans.push(ViewCell::styled(battery_text(battery), tier));
        spans.push(ViewCell::styled(" | ", Role::Footer));
    }
    spans.push(ViewCell::styled(KEY_HINTS, Role::Footer));
    ViewLine { spans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortKey;
    use crate::model::{Snapshot, SystemInfo};
    use chrono::Utc;

    fn enriched(system: Option<SystemInfo>, battery: Option<BatterySample>) -> EnrichedSnapshot {
        EnrichedSnapshot {
            snapshot: Snapshot {
                system,
                battery,
                ..Snapshot::default()
            },
            ..EnrichedSnapshot::default()
        }
    }

    #[test]
    fn test_header_text() {
        let now = Utc.timestamp_opt(100_000, 0).unwrap();
        let system = SystemInfo {
            hostname: "box".to_string(),
            boot_time: 100_000 - (26 * 3600 + 3 * 60),
            ..SystemInfo::default()
        };
        let state = InteractionState {
            paused: true,
            filter_text: "ssh".to_string(),
            sort_key: SortKey::Memory,
            ..InteractionState::default()
        };
        let line = build_header(&enriched(Some(system), None), &state, &now);
        assert_eq!(
            line.text(),
            "SysView - box - Uptime: 26h 3m [PAUSED] [filter: ssh] [sort: MEM↓]  03:46:40"
        );
    }

    #[test]
    fn test_header_without_system() {
        let now = Utc.timestamp_opt(0, 0).unwrap();
        let line = build_header(&enriched(None, None), &InteractionState::default(), &now);
        assert!(line.text().starts_with("SysView - unknown - Uptime: N/A [sort: CPU↓]"));
    }

    #[test]
    fn test_battery_text() {
        let plugged = BatterySample {
            pct: 99.6,
            plugged: true,
            seconds_left: None,
        };
        assert_eq!(battery_text(&plugged), "Battery: 100% (plugged)");
        let draining = BatterySample {
            pct: 76.0,
            plugged: false,
            seconds_left: Some(3 * 3600),
        };
        assert_eq!(battery_text(&draining), "Battery: 76% (3h 00m left)");
    }

    #[test]
    fn test_footer() {
        let battery = BatterySample {
            pct: 50.0,
            plugged: true,
            seconds_left: None,
        };
        let line = build_footer(&enriched(None, Some(battery)), &ViewSettings::default());
        assert_eq!(line.text(), format!("Battery: 50% (plugged) | {}", KEY_HINTS));

        let hidden = ViewSettings {
            show_battery: false,
            ..ViewSettings::default()
        };
        let line = build_footer(&enriched(None, Some(battery)), &hidden);
        assert_eq!(line.text(), KEY_HINTS);
        let line = build_footer(&enriched(None, None), &ViewSettings::default());
        assert_eq!(line.text(), KEY_HINTS);
    }
}
