//! Build script for airglow-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates airglow.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys allowed in each section, with their inclusive integer range
const SCHEMA: &[(&str, &[(&str, i64, i64)])] = &[
    (
        "matrix",
        &[("width", 1, 1024), ("height", 1, 1024), ("data_pin", 0, 29)],
    ),
    (
        "wire",
        &[
            ("t1", 1, 255),
            ("t2", 1, 255),
            ("t3", 1, 255),
            ("slot_clock_hz", 1, 125_000_000),
            ("settle_ms", 0, 60_000),
        ],
    ),
    (
        "schedule",
        &[
            ("on_hour", 0, 24),
            ("off_hour", 0, 24),
            ("utc_offset_s", -14 * 3600, 14 * 3600),
            ("frame_interval_s", 1, 86_400),
            ("data_sync_min", 0, 100_000),
            ("time_sync_min", 0, 100_000),
        ],
    ),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate airglow.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=airglow.toml");

    let config_path = Path::new("airglow.toml");
    if !config_path.exists() {
        fail(
            "airglow.toml not found",
            &["The firmware embeds airglow.toml; create one next to Cargo.toml".into()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read airglow.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in airglow.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let errors = check_schema(&config);
    if !errors.is_empty() {
        fail("Invalid configuration in airglow.toml", &errors);
    }

    println!("cargo:warning=airglow.toml validated successfully");
}

fn check_schema(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return errors;
    };

    for (section, value) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in table {
            let Some(&(_, min, max)) = keys.iter().find(|(name, _, _)| *name == key.as_str()) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            match integer_value(key, value) {
                Some(n) if n < min || n > max => {
                    errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
                }
                Some(_) => {}
                None => errors.push(format!("[{}] {} has an invalid value", section, key)),
            }
        }
    }

    if let Some(matrix) = config.get("matrix") {
        let dim = |k: &str| matrix.get(k).and_then(toml::Value::as_integer);
        let width = dim("width").unwrap_or(16);
        let height = dim("height").unwrap_or(10);
        if width * height > 1024 {
            errors.push(format!("[matrix] {}x{} exceeds 1024 pixels", width, height));
        }
    }

    errors
}

/// Integer value of a key; pins may be written as "gpioN"
fn integer_value(key: &str, value: &toml::Value) -> Option<i64> {
    match value {
        toml::Value::Integer(n) => Some(*n),
        toml::Value::String(s) if key == "data_pin" => {
            s.strip_prefix("gpio").unwrap_or(s).parse().ok()
        }
        _ => None,
    }
}

fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
