use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::{ErrorKind, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// A request as seen on the wire by the one-shot server
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve exactly one request with `status` and `body`, handing the captured request back.
fn start_mock_server(status: &str, body: &str) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let captured = read_request(&mut stream);
            let _ = stream.write_all(response.as_bytes());
            let _ = tx.send(captured);
        }
    });

    (url, rx)
}

fn read_request(stream: &mut std::net::TcpStream) -> CapturedRequest {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).unwrap();
        if n == 0 {
            break data.len();
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.split("\r\n").filter(|l| !l.is_empty());
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = data[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buffer).unwrap();
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buffer[..n]);
    }

    CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

fn write_session(dir: &Path, token: &str) -> std::path::PathBuf {
    let path = dir.join(".cookie.yaml");
    std::fs::write(&path, format!("beegosessionID: {}\n", token)).unwrap();
    path
}

/// `harbor` isolated from the user's environment and config files
fn harbor(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("harbor");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("HARBOR_URL")
        .env_remove("HARBOR_CONFIG")
        .env_remove("HARBOR_SESSION_FILE")
        .env_remove("HARBOR_LANGUAGE")
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(10));
    cmd
}

fn captured(rx: &mpsc::Receiver<CapturedRequest>) -> CapturedRequest {
    rx.recv_timeout(Duration::from_secs(5))
        .expect("server did not receive a request")
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    harbor(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CLI for the Harbor registry label API"))
        .stdout(predicate::str::contains("labels_list"))
        .stdout(predicate::str::contains("label_del_by_id"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    harbor(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_without_scope_is_usage_error() {
    let dir = TempDir::new().unwrap();
    harbor(&dir)
        .args(["labels_list", "--url", "http://127.0.0.1:1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--scope"));
}

#[test]
fn test_missing_url() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), "tok");
    harbor(&dir)
        .args(["label_get_by_id", "-i", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Registry URL not configured"));
}

#[test]
fn test_missing_session_file_makes_no_request() {
    let dir = TempDir::new().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    harbor(&dir)
        .args(["label_get_by_id", "-i", "1", "--url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read session file"));

    listener.set_nonblocking(true).unwrap();
    match listener.accept() {
        Err(e) if e.kind() == ErrorKind::WouldBlock => {}
        Ok(_) => panic!("a request was sent without a session"),
        Err(e) => panic!("unexpected accept error: {}", e),
    }
}

#[test]
fn test_labels_list_sends_query_and_cookie() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), "abc123");
    let (url, rx) = start_mock_server("200 OK", r#"[{"id":1,"name":"release"}]"#);

    harbor(&dir)
        .args(["labels_list", "-s", "g", "-p", "2", "-z", "5", "--url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("200 OK"))
        .stdout(predicate::str::contains("\"release\""));

    let request = captured(&rx);
    assert_eq!(
        request.request_line,
        "GET /api/labels?scope=g&name=&project_id=0&page=2&page_size=5 HTTP/1.1"
    );
    assert_eq!(request.header("cookie"), Some("beegosessionID=abc123"));
}

#[test]
fn test_label_create_posts_json_body() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), "abc123");
    let (url, rx) = start_mock_server("201 Created", "");

    harbor(&dir)
        .args([
            "label_create",
            "-n",
            "release",
            "-d",
            "ready to ship",
            "-c",
            "A9B6BE",
            "--color-mode",
            "never",
            "--url",
            &url,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("201 Created"));

    let request = captured(&rx);
    assert_eq!(request.request_line, "POST /api/labels HTTP/1.1");
    assert_eq!(request.header("content-type"), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    let keys: Vec<&str> = body.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(keys.len(), 9);
    assert_eq!(body["name"], "release");
    assert_eq!(body["color"], "#A9B6BE");
    assert_eq!(body["scope"], "g");
    assert_eq!(body["deleted"], false);
    assert!(body["creation_time"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_label_update_puts_to_id() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), "abc123");
    let (url, rx) = start_mock_server("200 OK", "");

    harbor(&dir)
        .args([
            "label_update", "-i", "42", "-n", "renamed", "-d", "desc", "-s", "p", "-p", "3",
            "--url", &url,
        ])
        .assert()
        .success();

    let request = captured(&rx);
    assert_eq!(request.request_line, "PUT /api/labels/42 HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["id"], 42);
    assert_eq!(body["project_id"], 3);
    assert!(body.get("creation_time").is_none());
}

#[test]
fn test_project_scope_without_project_id_makes_no_request() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), "abc123");
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    harbor(&dir)
        .args(["label_create", "-n", "a", "-d", "b", "-s", "p", "--url", &url])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("project_id is required"));

    harbor(&dir)
        .args(["label_update", "-i", "5", "-n", "a", "-d", "b", "-s", "p", "--url", &url])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("project_id is required"));

    listener.set_nonblocking(true).unwrap();
    match listener.accept() {
        Err(e) if e.kind() == ErrorKind::WouldBlock => {}
        Ok(_) => panic!("a request was sent with an invalid project scope"),
        Err(e) => panic!("unexpected accept error: {}", e),
    }
}

#[test]
fn test_label_del_by_id_appends_id() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), "abc123");
    let (url, rx) = start_mock_server("200 OK", "");

    harbor(&dir)
        .args(["label_del_by_id", "-i", "100", "--url", &url])
        .assert()
        .success();

    assert_eq!(captured(&rx).request_line, "DELETE /api/labels/100 HTTP/1.1");
}

#[test]
fn test_error_status_is_printed_and_fails() {
    let dir = TempDir::new().unwrap();
    write_session(dir.path(), "abc123");
    let (url, _rx) = start_mock_server("404 Not Found", r#"{"code":404,"message":"not found"}"#);

    harbor(&dir)
        .args(["label_get_by_id", "-i", "999", "--url", &url])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("404 Not Found"))
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_config_file_and_json_output() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.yaml");
    std::fs::write(&session, "beegosessionID: from-config\n").unwrap();
    let (url, rx) = start_mock_server("200 OK", r#"{"id":7}"#);

    let config_path = dir.path().join("harbor.toml");
    std::fs::write(
        &config_path,
        format!(
            "url = \"{}\"\nsession_file = \"{}\"\nlanguage = \"en-us\"\n",
            url,
            session.display()
        ),
    )
    .unwrap();

    let output = harbor(&dir)
        .args(["--config", config_path.to_str().unwrap(), "-o", "json", "label_get_by_id", "-i", "7"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["status"], 200);
    assert_eq!(json["body"]["id"], 7);

    let request = captured(&rx);
    assert_eq!(
        request.header("cookie"),
        Some("harbor-lang=en-us; beegosessionID=from-config")
    );
}

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();
    let output = harbor(&dir)
        .args(["-o", "json", "config", "show", "--url", "https://harbor.local"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["url"], "https://harbor.local");
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    harbor(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("labels_list"));
}
