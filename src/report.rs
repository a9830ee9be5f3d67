use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::harness::Measurement;

static BINARY_UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
static DECIMAL_UNITS: [&str; 6] = ["k", "M", "G", "T", "P", "E"];

/// `1536` -> `1.5 KiB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 * 1024.0 && unit + 1 < BINARY_UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size / 1024.0, BINARY_UNITS[unit])
}

/// Bytes per second with binary prefixes, e.g. `1.2 GiB/s`.
pub fn format_byte_rate(per_second: f64) -> String {
    format!("{}/s", format_size(per_second as u64))
}

/// Items per second with decimal prefixes, e.g. `3.4M/s`.
pub fn format_item_rate(per_second: f64) -> String {
    if per_second < 1000.0 {
        return format!("{per_second:.0}/s");
    }

    let mut rate = per_second / 1000.0;
    let mut unit = 0;
    while rate >= 1000.0 && unit + 1 < DECIMAL_UNITS.len() {
        rate /= 1000.0;
        unit += 1;
    }
    format!("{rate:.1}{}/s", DECIMAL_UNITS[unit])
}

pub fn format_duration(duration: Duration) -> String {
    const NANOS_PER_MICRO: f64 = 1_000.0;
    const NANOS_PER_MILLI: f64 = 1_000_000.0;
    const NANOS_PER_SEC: f64 = 1_000_000_000.0;

    let nanos = duration.as_nanos() as f64;
    if nanos < NANOS_PER_MICRO {
        format!("{nanos:.1}ns")
    } else if nanos < NANOS_PER_MILLI {
        format!("{:.2}us", nanos / NANOS_PER_MICRO)
    } else if nanos < NANOS_PER_SEC {
        format!("{:.2}ms", nanos / NANOS_PER_MILLI)
    } else {
        format!("{:.3}s", nanos / NANOS_PER_SEC)
    }
}

const NAME_WIDTH: usize = 64;

pub fn write_plain_header(mut w: impl Write) -> Result<()> {
    writeln!(
        w,
        "{:<width$} {:>12} {:>12} {:>14} {:>10}",
        "Benchmark",
        "Time",
        "Bytes/s",
        "Items/s",
        "Iters",
        width = NAME_WIDTH
    )?;
    writeln!(w, "{}", "-".repeat(NAME_WIDTH + 52))?;
    Ok(())
}

pub fn write_plain(measurement: &Measurement, mut w: impl Write) -> Result<()> {
    let items = if measurement.items > 0 {
        format!(
            "{} {}",
            format_item_rate(measurement.items_per_second()),
            measurement.group.items_label()
        )
    } else {
        "-".to_string()
    };

    writeln!(
        w,
        "{:<width$} {:>12} {:>12} {:>14} {:>10}",
        measurement.name,
        format_duration(measurement.time_per_iteration()),
        format_byte_rate(measurement.bytes_per_second()),
        items,
        measurement.iterations,
        width = NAME_WIDTH
    )?;
    Ok(())
}

pub fn write_json_pretty(results: &[Measurement], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::suite::Group;

    fn sample() -> Measurement {
        Measurement {
            group: Group::BlockParallel,
            name: "BlockParseParallel/fast_float/threads:2/chunk:1.0 MiB".to_string(),
            threads: Some(2),
            chunk_size: Some(1 << 20),
            iterations: 10,
            seconds: 1.0,
            bytes: 2 << 30,
            items: 3_000_000,
        }
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(1 << 20), "1.0 MiB");
        assert_eq!(format_size(10 << 20), "10.0 MiB");
        assert_eq!(format_size(3 << 30), "3.0 GiB");
    }

    #[test]
    fn rates() {
        assert_eq!(format_byte_rate(2.0 * 1024.0 * 1024.0 * 1024.0), "2.0 GiB/s");
        assert_eq!(format_item_rate(999.0), "999/s");
        assert_eq!(format_item_rate(3_400_000.0), "3.4M/s");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_nanos(42)), "42.0ns");
        assert_eq!(format_duration(Duration::from_micros(15)), "15.00us");
        assert_eq!(format_duration(Duration::from_millis(100)), "100.00ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.000s");
    }

    #[test]
    fn plain_line_has_rates() {
        let mut buf = Vec::new();
        write_plain(&sample(), &mut buf).unwrap();
        let line = String::from_utf8(buf).unwrap();

        assert!(line.starts_with("BlockParseParallel/fast_float/threads:2/chunk:1.0 MiB"));
        assert!(line.contains("100.00ms"));
        assert!(line.contains("2.0 GiB/s"));
        assert!(line.contains("3.0M/s records"));
    }

    #[test]
    fn json_keeps_parallel_settings() {
        let mut buf = Vec::new();
        write_json_pretty(&[sample()], &mut buf).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0]["group"], "block-parallel");
        assert_eq!(parsed[0]["threads"], 2);
        assert_eq!(parsed[0]["chunk_size"], 1 << 20);
        assert_eq!(parsed[0]["items"], 3_000_000);
    }
}
