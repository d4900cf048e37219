use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn mplsettings(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mplsettings"))
        .args(args)
        .env("HOME", home)
        .env_remove("MPLSETTINGS_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run mplsettings")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn setup_prints_matplotlibrc_with_requested_dpi() {
    let home = tempdir().expect("tempdir");

    let output = mplsettings(home.path(), &["setup", "--dpi", "150"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"figure.dpi: 150"));
    assert!(lines.contains(&"pdf.fonttype: 42"));
    assert!(lines.contains(&"font.size: 7"));
    assert!(lines.contains(&"figure.titlesize: 11"));
    assert!(!stdout.contains("font.family"));
}

#[test]
fn setup_json_is_a_flat_object() {
    let home = tempdir().expect("tempdir");

    let output = mplsettings(home.path(), &["setup", "--format", "json"]);
    assert_success(&output);

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed["figure.dpi"], 300);
    assert_eq!(parsed["legend.fontsize"], 7);
}

#[test]
fn setup_with_unknown_font_fails_naming_it() {
    let home = tempdir().expect("tempdir");

    let output = mplsettings(home.path(), &["setup", "--font", "Arial"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Font 'Arial' is not available"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn setup_reads_dpi_from_settings_file() {
    let home = tempdir().expect("tempdir");
    let settings = home.path().join(".mplsettings");
    fs::create_dir_all(&settings).expect("mkdir");
    fs::write(settings.join("config.toml"), "dpi = 200\n").expect("write config");

    let output = mplsettings(home.path(), &["setup"]);
    assert_success(&output);

    assert!(String::from_utf8_lossy(&output.stdout).contains("figure.dpi: 200"));
}

#[test]
fn load_fonts_warns_once_for_missing_path() {
    let home = tempdir().expect("tempdir");

    let output = mplsettings(home.path(), &["load-fonts", "/no/such/dir"]);
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr
            .matches("User-specified path /no/such/dir does not exist.")
            .count(),
        1,
        "{stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l.starts_with("/no/such/dir") && l.ends_with("missing")));
}

#[test]
fn load_fonts_without_paths_is_silent() {
    let home = tempdir().expect("tempdir");

    let output = mplsettings(home.path(), &["load-fonts", "--json"]);
    assert_success(&output);

    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed["warnings"].as_array().map(Vec::len), Some(0));
    assert_eq!(parsed["paths"][0]["status"], "missing");
    assert_eq!(parsed["paths"][0]["is_default"], true);
}

#[test]
fn list_fonts_json_is_empty_without_fonts() {
    let home = tempdir().expect("tempdir");

    let output = mplsettings(home.path(), &["list-fonts", "--json"]);
    assert_success(&output);

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed, Value::Array(Vec::new()));
}

// An sfnt header with no tables: parses as a font, and the family falls back
// to the file stem.
const EMPTY_SFNT: [u8; 12] = [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

#[test]
fn verbose_load_logs_families_per_directory() {
    let home = tempdir().expect("tempdir");
    let fonts = home.path().join(".mplsettings/fonts");
    fs::create_dir_all(&fonts).expect("mkdir");
    fs::write(fonts.join("Inter.ttf"), EMPTY_SFNT).expect("write font");

    let output = mplsettings(home.path(), &["load-fonts", "-v"]);
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    let expected = format!("Loading from {}: ['Inter']", fonts.display());
    assert!(stderr.contains(&expected), "{stderr}");
}

#[test]
fn quiet_load_does_not_log_families() {
    let home = tempdir().expect("tempdir");
    let fonts = home.path().join(".mplsettings/fonts");
    fs::create_dir_all(&fonts).expect("mkdir");
    fs::write(fonts.join("Inter.ttf"), EMPTY_SFNT).expect("write font");

    let output = mplsettings(home.path(), &["load-fonts"]);
    assert_success(&output);

    assert!(!String::from_utf8_lossy(&output.stderr).contains("Loading from"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 file(s), 1 new: Inter"));
}
