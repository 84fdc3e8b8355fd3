use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn write_config(home: &std::path::Path, body: &str) {
    fs::create_dir_all(home.join(".virumap")).expect("create config dir");
    fs::write(home.join(".virumap/config.yaml"), body).expect("write config");
}

fn virumap(home: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_virumap"));
    command
        .env("HOME", home)
        .env_remove("VIRUMAP_STATE_ROOT")
        .env_remove("VIRUMAP_WIZARD_SCRIPT_KEYS");
    command
}

#[test]
fn binary_scripted_start_persists_welcome_answers() {
    let dir = tempdir().expect("tempdir");
    let home = dir.path();
    write_config(
        home,
        "geolocation:\n  enabled: false\ntimezone: America/Argentina/Buenos_Aires\n",
    );

    let output = virumap(home)
        .arg("start")
        .env("VIRUMAP_WIZARD_SCRIPT_KEYS", "enter,enter")
        .output()
        .expect("run binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wizard stopped at /welcome/before-start"), "{stdout}");
    assert!(stdout.contains("language=es"), "{stdout}");

    let record = fs::read_to_string(home.join(".virumap/virumap-app-wizard.json"))
        .expect("read wizard record");
    let record: serde_json::Value = serde_json::from_str(&record).expect("json");
    assert_eq!(record["welcome"]["country"], "Argentina");
    assert_eq!(record["welcome"]["language"], "es");

    let log = fs::read_to_string(home.join(".virumap/logs/wizard.log")).expect("read log");
    assert!(log.contains("\"event\":\"country.lookup_failed\""));
    assert!(log.contains("\"event\":\"store.update\""));

    let output = virumap(home)
        .args(["store", "show"])
        .output()
        .expect("run store show");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"Argentina\""));

    let output = virumap(home)
        .args(["store", "reset"])
        .output()
        .expect("run store reset");
    assert!(output.status.success());
    let record = fs::read_to_string(home.join(".virumap/virumap-app-wizard.json"))
        .expect("read wizard record");
    assert_eq!(record.trim(), "{}");
}

#[test]
fn binary_state_root_env_overrides_home_and_config_show_reports_it() {
    let dir = tempdir().expect("tempdir");
    let home = dir.path().join("home");
    let state = dir.path().join("state");
    fs::create_dir_all(&home).expect("create home");

    let output = virumap(&home)
        .args(["config", "show"])
        .env("VIRUMAP_STATE_ROOT", &state)
        .output()
        .expect("run config show");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("state_root={}", state.display())));
    assert!(stdout.contains("config_exists=false"));
    assert!(stdout.contains("https://ipwho.is/"));
}

#[test]
fn binary_resolve_country_uses_timezone_when_lookup_is_disabled() {
    let dir = tempdir().expect("tempdir");
    let home = dir.path();
    write_config(home, "geolocation:\n  enabled: false\ntimezone: Asia/Tokyo\n");

    let output = virumap(home)
        .arg("resolve-country")
        .output()
        .expect("run resolve-country");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("source=timezone country=Japan language=ja"), "{stdout}");
}

#[test]
fn binary_rejects_unknown_command_and_invalid_config() {
    let dir = tempdir().expect("tempdir");
    let home = dir.path();

    let output = virumap(home).arg("launch").output().expect("run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown command `launch`"));

    write_config(home, "geolocation:\n  retries: 2\n");
    let output = virumap(home).args(["config", "show"]).output().expect("run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid yaml"));
}
