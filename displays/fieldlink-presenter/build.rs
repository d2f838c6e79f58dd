//! Build script for fieldlink-presenter
//!
//! - Passes the esp-hal and defmt linker scripts
//! - Validates node.toml at compile time
//! - Generates the presenter configuration constants into OUT_DIR

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = load_config();
    let values = validate_config(&config);
    write_config(&values);

    println!("cargo:warning=node.toml validated successfully");
}

/// Linker scripts provided by esp-hal and defmt
fn setup_linker() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse node.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=node.toml");

    let config_path = Path::new("node.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: node.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The presenter firmware requires a node.toml configuration       ║\n\
            ║  file in the fieldlink-presenter directory.                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read node.toml                                 ║\n\
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
                ║  ERROR: Invalid TOML syntax in node.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validated values
struct PresenterValues {
    frame_ms: i64,
    left: i64,
    right: i64,
    up: i64,
    down: i64,
    gate_ms: i64,
    debounce_ms: i64,
}

/// Look up `[section] key` as an integer within `min..=max`
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

fn validate_config(config: &toml::Value) -> PresenterValues {
    let mut errors = Vec::new();

    let values = PresenterValues {
        frame_ms: integer(config, "render", "frame_ms", 20, 5000, &mut errors),
        left: integer(config, "joystick", "left", 0, 4095, &mut errors),
        right: integer(config, "joystick", "right", 0, 4095, &mut errors),
        up: integer(config, "joystick", "up", 0, 4095, &mut errors),
        down: integer(config, "joystick", "down", 0, 4095, &mut errors),
        gate_ms: integer(config, "joystick", "gate_ms", 0, 5000, &mut errors),
        debounce_ms: integer(config, "button", "debounce_ms", 0, 1000, &mut errors),
    };

    if values.left >= values.right {
        errors.push("[joystick] left must be below right".to_string());
    }
    if values.up >= values.down {
        errors.push("[joystick] up must be below down".to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid presenter configuration                          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    values
}

/// Write the constants included by src/config.rs
fn write_config(v: &PresenterValues) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let source = format!(
        "/// Presenter configuration from node.toml\n\
        pub const PRESENTER: PresenterConfig = PresenterConfig {{\n\
        \x20   frame_ms: {},\n\
        \x20   joystick: JoystickThresholds {{\n\
        \x20       left: {},\n\
        \x20       right: {},\n\
        \x20       up: {},\n\
        \x20       down: {},\n\
        \x20   }},\n\
        \x20   joystick_gate_ms: {},\n\
        \x20   button_debounce_ms: {},\n\
        }};\n",
        v.frame_ms, v.left, v.right, v.up, v.down, v.gate_ms, v.debounce_ms
    );

    if let Err(e) = fs::write(out_dir.join("node_config.rs"), source) {
        panic!("Failed to write node_config.rs: {}", e);
    }
}
