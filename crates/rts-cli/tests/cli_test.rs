//! Tests driving the built `rts-confirm` binary

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::{request_body, serve_replies, ORDERS_LINK};

/// Command with config and data directories isolated under `home`
fn rts(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rts-confirm"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_PROXY", "127.0.0.1")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env_remove("RTS_AUTH_URL")
        .env_remove("RTS_SUBMIT_URL")
        .env_remove("RTS_LINK_OPENED_URL")
        .env_remove("RTS_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_decode_base64() {
    let home = tempfile::tempdir().unwrap();
    let output = rts(home.path())
        .args(["decode", "eyJvcmRlcklkIjoiQjciLCJ3YWdvbnMiOjJ9"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), r#"{"orderId":"B7","wagons":2}"#);
}

#[test]
fn test_decode_explicit_plain() {
    let home = tempfile::tempdir().unwrap();
    let output = rts(home.path())
        .args(["decode", "--encoding", "plain", "a%20b"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output).trim(), "a%20b");
}

#[test]
fn test_orders_json() {
    let home = tempfile::tempdir().unwrap();
    let output = rts(home.path())
        .args(["--format", "json", "orders", ORDERS_LINK])
        .output()
        .unwrap();
    assert!(output.status.success());
    let orders: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(orders[0]["orderId"], "A1");
    assert_eq!(orders[0]["wagons"], 3);
    assert_eq!(orders[1]["supplier"], "");
    assert_eq!(orders[1]["route"], "N/A nach N/A");
}

#[test]
fn test_slots_table() {
    let home = tempfile::tempdir().unwrap();
    let output = rts(home.path()).args(["slots", "--interval", "120"]).output().unwrap();
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "00:00 - 02:00");
    assert_eq!(lines[11], "22:00 - 00:00");
}

#[test]
fn test_render_to_file() {
    let home = tempfile::tempdir().unwrap();
    let target = home.path().join("form.html");
    let output = rts(home.path())
        .args(["render", ORDERS_LINK, "-o"])
        .arg(&target)
        .output()
        .unwrap();
    assert!(output.status.success());
    let html = std::fs::read_to_string(&target).unwrap();
    assert!(html.contains("data-order-id=\"A2\""));
}

#[test]
fn test_login_without_endpoint_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = rts(home.path())
        .args(["login", "-u", "dispo", "-p", "secret"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Verbindungsfehler"), "{stderr}");
}

#[test]
fn test_submit_with_edits() {
    let home = tempfile::tempdir().unwrap();
    let edits = home.path().join("edits.json");
    std::fs::write(&edits, r#"{"A1": {"wagons": 2, "departureTime": "06:45"}}"#).unwrap();

    let (base, server) = serve_replies(vec![
        (200, r#"{"authenticated": true}"#),
        (202, ""),
    ]);
    let output = rts(home.path())
        .env("RTS_AUTH_URL", format!("{base}/auth"))
        .env("RTS_SUBMIT_URL", format!("{base}/submit"))
        .env("RTS_PASSWORD", "secret")
        .args(["submit", ORDERS_LINK, "-u", "dispo", "--edits"])
        .arg(&edits)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("erfolgreich bestätigt"));

    let requests = server.join().unwrap();
    let body = request_body(&requests[1]);
    assert!(body["sessionToken"].as_str().unwrap().len() == 36);
    assert_eq!(body["orders"][0]["wagons"], 2);
    assert_eq!(body["orders"][0]["departureTime"], "06:45");
}

#[test]
fn test_config_set_and_show() {
    let home = tempfile::tempdir().unwrap();
    let output = rts(home.path())
        .args(["config", "--set-storage", "memory", "--set-auth-url", "https://flows.example.com/auth"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration updated"));

    let output = rts(home.path()).args(["config", "--show"]).output().unwrap();
    let text = stdout(&output);
    assert!(text.contains("memory"));
    assert!(!text.contains("flows.example.com"));
}

#[test]
fn test_submit_csv_lists_sent_confirmations() {
    let home = tempfile::tempdir().unwrap();
    let (base, server) = serve_replies(vec![
        (200, r#"{"authenticated": true, "token": "tok"}"#),
        (200, "{}"),
    ]);
    let output = rts(home.path())
        .env("RTS_AUTH_URL", format!("{base}/auth"))
        .env("RTS_SUBMIT_URL", format!("{base}/submit"))
        .args(["--format", "csv", "submit", ORDERS_LINK, "-u", "dispo", "-p", "secret"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    server.join().unwrap();

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("orderId,wagons,transportDate,deliveryDate"));
    assert!(lines[1].starts_with("A1,3,2024-03-05,2024-03-06,"));
    assert!(lines[2].starts_with("A2,1,2024-03-07,2024-03-08,"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("erfolgreich bestätigt"));
}
