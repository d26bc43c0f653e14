//! Minimal TOML parser for display configuration
//!
//! Handles only the subset `airglow.toml` uses and needs no allocator.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs with integer or string values
//! - Pin strings like `"gpio6"`
//! - Comments (`# ...`), including trailing ones
//!
//! Missing keys keep their defaults. Unknown sections and keys are errors so
//! that a typo cannot silently leave a default in place.

use super::types::DisplayConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value could not be parsed
    InvalidValue,
    /// Value parsed but outside its allowed range
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Matrix,
    Wire,
    Schedule,
}

/// Parse TOML configuration into a validated [`DisplayConfig`]
pub fn parse_config(input: &str) -> Result<DisplayConfig, ConfigError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        apply_value(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ConfigError> {
    let name = line
        .split('#')
        .next()
        .map(str::trim)
        .and_then(|h| h.strip_prefix('['))
        .and_then(|h| h.strip_suffix(']'))
        .ok_or(ConfigError::InvalidSection)?;

    match name.trim() {
        "matrix" => Ok(Section::Matrix),
        "wire" => Ok(Section::Wire),
        "schedule" => Ok(Section::Schedule),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_value(
    config: &mut DisplayConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match section {
        Section::Root => Err(ConfigError::UnknownKey),
        Section::Matrix => {
            let m = &mut config.matrix;
            match key {
                "width" => m.width = parse_int(value)?,
                "height" => m.height = parse_int(value)?,
                "data_pin" => m.data_pin = parse_pin(value)?,
                _ => return Err(ConfigError::UnknownKey),
            }
            Ok(())
        }
        Section::Wire => {
            let w = &mut config.wire;
            match key {
                "t1" => w.t1 = parse_int(value)?,
                "t2" => w.t2 = parse_int(value)?,
                "t3" => w.t3 = parse_int(value)?,
                "slot_clock_hz" => w.slot_clock_hz = parse_int(value)?,
                "settle_ms" => w.settle_ms = parse_int(value)?,
                _ => return Err(ConfigError::UnknownKey),
            }
            Ok(())
        }
        Section::Schedule => {
            let s = &mut config.schedule;
            match key {
                "on_hour" => s.on_hour = parse_int(value)?,
                "off_hour" => s.off_hour = parse_int(value)?,
                "utc_offset_s" => s.utc_offset_s = parse_int(value)?,
                "frame_interval_s" => s.frame_interval_s = parse_int(value)?,
                "data_sync_min" => s.data_sync_min = parse_int(value)?,
                "time_sync_min" => s.time_sync_min = parse_int(value)?,
                _ => return Err(ConfigError::UnknownKey),
            }
            Ok(())
        }
    }
}

/// Split `key = value`, dropping a trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    // Remove inline comments outside of quotes
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip surrounding quotes, if any
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ConfigError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ConfigError::InvalidValue)
}

/// Parse a pin like `"gpio6"` or a bare number
fn parse_pin(value: &str) -> Result<u8, ConfigError> {
    let value = parse_string(value);
    let number = value.strip_prefix("gpio").unwrap_or(value);
    parse_int(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfig;

    const FULL: &str = r#"
# Airglow display
[matrix]
width = 16
height = 10
data_pin = "gpio6"   # Waveshare RP2040 matrix

[wire]
t1 = 2
t2 = 5
t3 = 3
slot_clock_hz = 8_000_000
settle_ms = 10

[schedule]
on_hour = 6
off_hour = 23
utc_offset_s = -18000
frame_interval_s = 20
data_sync_min = 30
time_sync_min = 1440
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL).unwrap();
        assert_eq!(config.matrix.width, 16);
        assert_eq!(config.matrix.height, 10);
        assert_eq!(config.matrix.data_pin, 6);
        assert_eq!(config.wire.slot_clock_hz, 8_000_000);
        assert_eq!(config.wire.bit_slots(), 10);
        assert_eq!(config.schedule.on_hour, 6);
        assert_eq!(config.schedule.off_hour, 23);
        assert_eq!(config.schedule.utc_offset_s, -18000);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, DisplayConfig::default());
        assert_eq!(config.schedule, ScheduleConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[matrix]\nwidth = 8\n").unwrap();
        assert_eq!(config.matrix.width, 8);
        assert_eq!(config.matrix.height, 10);
        assert_eq!(config.wire.t2, 5);
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("\"gpio16\"").unwrap(), 16);
        assert_eq!(parse_pin("gpio0").unwrap(), 0);
        assert_eq!(parse_pin("7").unwrap(), 7);
        assert_eq!(parse_pin("\"pin7\""), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[lights]\n"), Err(ConfigError::InvalidSection));
        assert_eq!(parse_config("width = 3\n"), Err(ConfigError::UnknownKey));
        assert_eq!(
            parse_config("[matrix]\ncolour = 3\n"),
            Err(ConfigError::UnknownKey)
        );
        assert_eq!(
            parse_config("[matrix]\nwidth = wide\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[matrix]\nwidth = -1\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(parse_config("[matrix]\nwidth\n"), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_range_checks() {
        assert_eq!(
            parse_config("[matrix]\nwidth = 0\n"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[matrix]\nwidth = 64\nheight = 64\n"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[matrix]\ndata_pin = \"gpio30\"\n"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[wire]\nt3 = 0\n"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[schedule]\noff_hour = 25\n"),
            Err(ConfigError::OutOfRange)
        );
    }
}
