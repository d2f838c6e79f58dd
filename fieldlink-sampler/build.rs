//! Build script for fieldlink-sampler
//!
//! - Passes the esp-hal and defmt linker scripts
//! - Validates node.toml at compile time
//! - Generates the sampler configuration constants into OUT_DIR

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Tag field is 32 bytes and always NUL-terminated
const MAX_TAG_LEN: usize = 31;

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
            ║  The sampler firmware requires a node.toml configuration         ║\n\
            ║  file in the fieldlink-sampler directory.                        ║\n\
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
struct SamplerValues {
    tag: String,
    peer: [u8; 6],
    gps_window_ms: i64,
    gas_refresh_ms: i64,
    send_interval_ms: i64,
    utc_offset_hours: i64,
    dry_raw: i64,
    wet_raw: i64,
    calibration_samples: i64,
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

/// Look up `[section] key` as a string
fn string(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> String {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::String(s)) => s.clone(),
        Some(_) => {
            errors.push(format!("[{}] {} must be a string", section, key));
            String::new()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            String::new()
        }
    }
}

/// Parse "AA:BB:CC:DD:EE:FF"
fn parse_mac(text: &str) -> Option<[u8; 6]> {
    let mut mac = [0u8; 6];
    let mut parts = text.split(':');
    for byte in mac.iter_mut() {
        let part = parts.next()?;
        if part.len() != 2 {
            return None;
        }
        *byte = u8::from_str_radix(part, 16).ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(mac)
}

fn validate_config(config: &toml::Value) -> SamplerValues {
    let mut errors = Vec::new();

    let tag = string(config, "link", "tag", &mut errors);
    if !tag.is_ascii() || tag.len() > MAX_TAG_LEN {
        errors.push(format!(
            "[link] tag must be ASCII, at most {} characters",
            MAX_TAG_LEN
        ));
    }

    let peer_text = string(config, "link", "peer", &mut errors);
    let peer = match parse_mac(&peer_text) {
        Some(mac) => mac,
        None => {
            errors.push(format!("[link] peer '{}' is not a MAC address", peer_text));
            [0; 6]
        }
    };

    let values = SamplerValues {
        tag,
        peer,
        gps_window_ms: integer(config, "timing", "gps_window_ms", 100, 10_000, &mut errors),
        gas_refresh_ms: integer(config, "timing", "gas_refresh_ms", 100, 600_000, &mut errors),
        send_interval_ms: integer(config, "timing", "send_interval_ms", 100, 600_000, &mut errors),
        utc_offset_hours: integer(config, "clock", "utc_offset_hours", -12, 14, &mut errors),
        dry_raw: integer(config, "soil", "dry_raw", 0, 4095, &mut errors),
        wet_raw: integer(config, "soil", "wet_raw", 0, 4095, &mut errors),
        calibration_samples: integer(config, "gas", "calibration_samples", 1, 1000, &mut errors),
    };

    if values.dry_raw == values.wet_raw {
        errors.push("[soil] dry_raw and wet_raw must differ".to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid sampler configuration                            ║\n\
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
fn write_config(v: &SamplerValues) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let peer = v
        .peer
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(", ");
    let source = format!(
        "/// Sampler configuration from node.toml\n\
        pub const SAMPLER: SamplerConfig = SamplerConfig {{\n\
        \x20   tag: {:?},\n\
        \x20   peer: [{}],\n\
        \x20   gps_window_ms: {},\n\
        \x20   gas_refresh_ms: {},\n\
        \x20   send_interval_ms: {},\n\
        \x20   utc_offset_hours: {},\n\
        \x20   soil: SoilCalibration {{\n\
        \x20       dry_raw: {},\n\
        \x20       wet_raw: {},\n\
        \x20   }},\n\
        \x20   gas_calibration_samples: {},\n\
        }};\n",
        v.tag,
        peer,
        v.gps_window_ms,
        v.gas_refresh_ms,
        v.send_interval_ms,
        v.utc_offset_hours,
        v.dry_raw,
        v.wet_raw,
        v.calibration_samples
    );

    if let Err(e) = fs::write(out_dir.join("node_config.rs"), source) {
        panic!("Failed to write node_config.rs: {}", e);
    }
}
