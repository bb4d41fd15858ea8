//! Pre-built mock filesystem scenarios.

use super::filesystem::MockFs;

impl MockFs {
    /// A laptop with two SATA partitions, one NVMe disk and a discharging
    /// battery.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );

        fs.add_file(
            "/proc/diskstats",
            "\
   8       0 sda 12345 100 987654 5000 6789 50 456789 3000 0 4000 8000 0 0 0 0
   8       1 sda1 1000 80 20000 4000 500 40 8000 2500 0 3500 6500 0 0 0 0
 259       0 nvme0n1 50000 200 2000000 10000 30000 150 1500000 8000 5 15000 18000 0 0 0 0
",
        );

        fs.add_file("/sys/class/power_supply/AC/type", "Mains\n");
        fs.add_file("/sys/class/power_supply/AC/online", "0\n");
        fs.add_battery("BAT0", 76, "Discharging");
        fs.add_file("/sys/class/power_supply/BAT0/energy_now", "30000000\n");
        fs.add_file("/sys/class/power_supply/BAT0/power_now", "10000000\n");

        fs
    }
}
