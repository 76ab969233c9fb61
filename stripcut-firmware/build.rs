//! Build script for stripcut-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time
//! - Generates the `MachineConfig` and `ServoConfig` initializers

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// `[machine]` integer keys: (name, default, min, max)
const MACHINE_KEYS: &[(&str, i64, i64, i64)] = &[
    ("job_slots", 1, 1, 4),
    ("steps_per_revolution", 200, 1, 65_535),
    ("gear_diameter_mm", 50, 1, 65_535),
    ("cut_sweep_deg", 180, 1, 180),
    ("cut_step_delay_ms", 15, 0, 65_535),
    ("settle_delay_ms", 500, 0, 65_535),
    ("boot_banner_ms", 500, 0, 65_535),
    ("done_banner_ms", 2000, 0, 65_535),
    ("key_debounce_ms", 100, 0, 65_535),
];

/// `[servo]` integer keys: (name, default, min, max)
const SERVO_KEYS: &[(&str, i64, i64, i64)] = &[
    ("min_pulse_us", 544, 0, 65_535),
    ("max_pulse_us", 2400, 0, 65_535),
    ("period_us", 20_000, 1, 65_535),
];

fn main() {
    setup_linker();

    let config = load_config();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let machine = generate_machine(&config);
    fs::write(out_dir.join("machine_config.rs"), machine).unwrap();

    let servo = generate_servo(&config);
    fs::write(out_dir.join("servo_config.rs"), servo).unwrap();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse machine.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a machine.toml configuration file.        ║\n\
            ║  Please create one in the stripcut-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n\
                \n{}\n",
                e
            );
        }
    }
}

/// Collect validated integer fields of one section, reporting every problem
fn read_section(
    config: &toml::Value,
    section: &str,
    keys: &[(&str, i64, i64, i64)],
    errors: &mut Vec<String>,
) -> Vec<(String, i64)> {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            None
        }
        None => None,
    };

    keys.iter()
        .map(|&(name, default, min, max)| {
            let value = match table.and_then(|t| t.get(name)) {
                None => default,
                Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
                Some(toml::Value::Integer(_)) => {
                    errors.push(format!("[{}] {} must be {}-{}", section, name, min, max));
                    default
                }
                Some(_) => {
                    errors.push(format!("[{}] {} must be an integer", section, name));
                    default
                }
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Abort the build with every collected error
fn report(section: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid {:<49}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        format!("[{}] configuration", section),
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Generate the `MachineConfig` struct expression
fn generate_machine(config: &toml::Value) -> String {
    let mut errors = Vec::new();
    let fields = read_section(config, "machine", MACHINE_KEYS, &mut errors);

    let stall = match config.get("machine").and_then(|m| m.get("stall_timeout_ms")) {
        None => "None".to_string(),
        Some(toml::Value::Integer(v)) if (1..=i64::from(u32::MAX)).contains(v) => {
            format!("Some({})", v)
        }
        Some(_) => {
            errors.push("[machine] stall_timeout_ms must be a positive integer".to_string());
            "None".to_string()
        }
    };
    report("machine", &errors);

    let mut out = String::from("stripcut_core::config::MachineConfig {\n");
    for (name, value) in fields {
        out.push_str(&format!("    {}: {},\n", name, value));
    }
    out.push_str(&format!("    stall_timeout_ms: {},\n}}\n", stall));
    out
}

/// Generate the `ServoConfig` struct expression
fn generate_servo(config: &toml::Value) -> String {
    let mut errors = Vec::new();
    let fields = read_section(config, "servo", SERVO_KEYS, &mut errors);

    let active_low = match config.get("servo").and_then(|s| s.get("endstop_active_low")) {
        None => true,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("[servo] endstop_active_low must be true or false".to_string());
            true
        }
    };

    let pulse = |name: &str| {
        fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    };
    if pulse("min_pulse_us") >= pulse("max_pulse_us") {
        errors.push("[servo] min_pulse_us must be below max_pulse_us".to_string());
    }
    if pulse("max_pulse_us") > pulse("period_us") {
        errors.push("[servo] max_pulse_us must not exceed period_us".to_string());
    }
    report("servo", &errors);

    let mut out = String::from("stripcut_drivers::cutter::ServoConfig {\n");
    for (name, value) in fields {
        out.push_str(&format!("    {}: {},\n", name, value));
    }
    out.push_str(&format!("    endstop_active_low: {},\n}}\n", active_low));
    out
}
