//! Best-effort readers for Linux kernel interfaces that `sysinfo` does not
//! expose: page cache/buffers, block device I/O counters and battery state.
//!
//! All readers go through [`FileSystem`] so they can be exercised with
//! [`MockFs`](super::mock::MockFs) on any platform.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::traits::{CollectError, FileSystem};
use crate::model::BatterySample;

/// Bytes per sector in `/proc/diskstats`, fixed by the kernel ABI.
const SECTOR_SIZE: u64 = 512;

/// Cumulative I/O counters of one block device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskIoCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub read_count: u64,
    pub write_count: u64,
}

/// Page cache and buffers from `/proc/meminfo`, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemExtras {
    pub cached: Option<u64>,
    pub buffers: Option<u64>,
}

/// Reads `Cached:` and `Buffers:` from `<proc>/meminfo`.
pub fn read_mem_extras<F: FileSystem>(fs: &F, proc_path: &Path) -> Result<MemExtras, CollectError> {
    let content = fs.read_to_string(&proc_path.join("meminfo"))?;
    Ok(parse_mem_extras(&content))
}

fn parse_mem_extras(content: &str) -> MemExtras {
    let mut extras = MemExtras::default();
    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(kb) = value.parse::<u64>() else {
            continue;
        };
        match key {
            "Cached:" => extras.cached = Some(kb * 1024),
            "Buffers:" => extras.buffers = Some(kb * 1024),
            _ => {}
        }
    }
    extras
}

/// Reads per-device counters from `<proc>/diskstats`, keyed by device name
/// (`sda1`, `nvme0n1p2`, ...).
pub fn read_diskstats<F: FileSystem>(
    fs: &F,
    proc_path: &Path,
) -> Result<HashMap<String, DiskIoCounters>, CollectError> {
    let content = fs.read_to_string(&proc_path.join("diskstats"))?;
    parse_diskstats(&content)
}

fn parse_diskstats(content: &str) -> Result<HashMap<String, DiskIoCounters>, CollectError> {
    let mut result = HashMap::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            continue;
        }
        let num = |idx: usize| -> Result<u64, CollectError> {
            fields[idx]
                .parse::<u64>()
                .map_err(|e| CollectError::Parse(format!("diskstats field {}: {}", idx, e)))
        };
        let counters = DiskIoCounters {
            read_count: num(3)?,
            read_bytes: num(5)? * SECTOR_SIZE,
            write_count: num(7)?,
            write_bytes: num(9)? * SECTOR_SIZE,
        };
        result.insert(fields[2].to_string(), counters);
    }
    Ok(result)
}

/// Reads the first battery under `<sys>/class/power_supply`.
///
/// Returns `Ok(None)` when no supply of type `Battery` exists.
pub fn read_battery<F: FileSystem>(
    fs: &F,
    sys_path: &Path,
) -> Result<Option<BatterySample>, CollectError> {
    let supply_dir = sys_path.join("class/power_supply");
    if !fs.exists(&supply_dir) {
        return Ok(None);
    }
    let mut supplies = fs.read_dir(&supply_dir)?;
    supplies.sort();

    let mut battery: Option<PathBuf> = None;
    let mut mains_online: Option<bool> = None;
    for supply in supplies {
        let kind = read_trimmed(fs, &supply.join("type")).unwrap_or_default();
        match kind.as_str() {
            "Battery" if battery.is_none() => battery = Some(supply),
            "Mains" => {
                let online = read_trimmed(fs, &supply.join("online")).is_some_and(|s| s == "1");
                mains_online = Some(mains_online.unwrap_or(false) || online);
            }
            _ => {}
        }
    }

    let Some(battery) = battery else {
        return Ok(None);
    };

    let pct = read_trimmed(fs, &battery.join("capacity"))
        .ok_or_else(|| CollectError::Parse("battery capacity missing".to_string()))?
        .parse::<f64>()
        .map_err(|e| CollectError::Parse(format!("battery capacity: {}", e)))?;
    let status = read_trimmed(fs, &battery.join("status")).unwrap_or_default();
    let discharging = status == "Discharging";
    let plugged = mains_online.unwrap_or(!discharging);

    let seconds_left = if discharging {
        remaining_seconds(fs, &battery)
    } else {
        None
    };

    Ok(Some(BatterySample {
        pct,
        plugged,
        seconds_left,
    }))
}

/// Estimates time to empty from energy/power or charge/current pairs.
fn remaining_seconds<F: FileSystem>(fs: &F, battery: &Path) -> Option<u64> {
    let read_u64 = |name: &str| -> Option<u64> {
        read_trimmed(fs, &battery.join(name)).and_then(|s| s.parse::<u64>().ok())
    };
    let (stored, rate) = match (read_u64("energy_now"), read_u64("power_now")) {
        (Some(e), Some(p)) => (e, p),
        _ => (read_u64("charge_now")?, read_u64("current_now")?),
    };
    if rate == 0 {
        return None;
    }
    Some(stored * 3600 / rate)
}

fn read_trimmed<F: FileSystem>(fs: &F, path: &Path) -> Option<String> {
    fs.read_to_string(path).ok().map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_parse_mem_extras() {
        let content = "MemTotal: 100 kB\nBuffers:  2 kB\nCached:   3 kB\nSwapCached: 9 kB\n";
        let extras = parse_mem_extras(content);
        assert_eq!(extras.buffers, Some(2048));
        assert_eq!(extras.cached, Some(3072));
    }

    #[test]
    fn test_mem_extras_missing_keys() {
        let extras = parse_mem_extras("MemTotal: 100 kB\n");
        assert_eq!(extras, MemExtras::default());
    }

    #[test]
    fn test_read_diskstats() {
        let fs = MockFs::typical_system();
        let stats = read_diskstats(&fs, Path::new("/proc")).unwrap();
        let sda1 = stats.get("sda1").unwrap();
        assert_eq!(sda1.read_count, 1000);
        assert_eq!(sda1.read_bytes, 20_000 * 512);
        assert_eq!(sda1.write_count, 500);
        assert_eq!(sda1.write_bytes, 8_000 * 512);
    }

    #[test]
    fn test_diskstats_malformed_field() {
        let err = parse_diskstats("8 0 sda x 0 0 0 0 0 0 0").unwrap_err();
        assert!(matches!(err, CollectError::Parse(_)));
    }

    #[test]
    fn test_read_battery_discharging() {
        let fs = MockFs::typical_system();
        let battery = read_battery(&fs, Path::new("/sys")).unwrap().unwrap();
        assert_eq!(battery.pct, 76.0);
        assert!(!battery.plugged);
        // 30 Wh at 10 W
        assert_eq!(battery.seconds_left, Some(3 * 3600));
    }

    #[test]
    fn test_read_battery_absent() {
        let fs = MockFs::new();
        assert!(read_battery(&fs, Path::new("/sys")).unwrap().is_none());

        let mut fs = MockFs::new();
        fs.add_file("/sys/class/power_supply/AC/type", "Mains\n");
        fs.add_file("/sys/class/power_supply/AC/online", "1\n");
        assert!(read_battery(&fs, Path::new("/sys")).unwrap().is_none());
    }

    #[test]
    fn test_read_battery_charging_on_mains() {
        let mut fs = MockFs::new();
        fs.add_file("/sys/class/power_supply/AC/type", "Mains\n");
        fs.add_file("/sys/class/power_supply/AC/online", "1\n");
        fs.add_file("/sys/class/power_supply/BAT0/type", "Battery\n");
        fs.add_file("/sys/class/power_supply/BAT0/capacity", "40\n");
        fs.add_file("/sys/class/power_supply/BAT0/status", "Charging\n");
        let battery = read_battery(&fs, Path::new("/sys")).unwrap().unwrap();
        assert!(battery.plugged);
        assert_eq!(battery.seconds_left, None);
    }
}
