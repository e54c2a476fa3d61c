use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;

const ARTICLE: &str = r#"{
    "key": "32TR4H94",
    "version": 3,
    "data": {
        "key": "32TR4H94",
        "itemType": "journalArticle",
        "title": "On the Electrodynamics of Moving Bodies",
        "date": "1905-06-30",
        "extra": "Citation Key: einstein1905electrodynamics"
    }
}"#;

const GENERAL_RELATIVITY: &str = r#"{
    "key": "ABCD2345",
    "version": 4,
    "data": {
        "key": "ABCD2345",
        "itemType": "journalArticle",
        "title": "Die Feldgleichungen der Gravitation",
        "date": "1915"
    }
}"#;

fn zoinks(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("zoinks").unwrap();
    cmd.env("ZOTERO_API_URL", server.base_url())
        .env("ZOTERO_USER_ID", "475425")
        .env_remove("ZOTERO_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn serve_article(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/users/475425/items/32TR4H94");
        then.status(200).body(ARTICLE);
    });
}

// Rendering --help exercises every clap attribute, so a misconfigured
// argument shows up here first.
#[test]
fn check_clap_cli_help() {
    Command::cargo_bin("zoinks")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--field"));
}

#[test]
fn test_prints_single_value() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server)
        .args(["-f", "citekey", "zotero://select/library/items/32TR4H94"])
        .assert()
        .success()
        .stdout("einstein1905electrodynamics\n");
}

#[test]
fn test_no_field_prints_every_field() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server).arg("32TR4H94").assert().success().stdout(
        "key: 32TR4H94\n\
         itemType: journalArticle\n\
         title: On the Electrodynamics of Moving Bodies\n\
         date: 1905-06-30\n\
         extra: Citation Key: einstein1905electrodynamics\n",
    );
}

#[test]
fn test_several_fields_labelled() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server)
        .args(["-f", "year,publisher", "32TR4H94"])
        .assert()
        .success()
        .stdout("year: 1905\npublisher: \n");
}

#[test]
fn test_identifiers_from_stdin() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server)
        .args(["-f", "key"])
        .write_stdin("zotero://select/library/items/32TR4H94\n")
        .assert()
        .success()
        .stdout("32TR4H94\n");
}

#[test]
fn test_json_output() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server)
        .args(["-o", "json", "-f", "citekey", "32TR4H94"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"citekey\": \"einstein1905electrodynamics\""));
}

#[test]
fn test_list_field_names() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server)
        .args(["-l", "32TR4H94"])
        .assert()
        .success()
        .stdout("key, itemType, title, date, extra\n");
}

#[test]
fn test_invalid_identifier_exit_code() {
    let server = MockServer::start();

    zoinks(&server)
        .arg("not-an-identifier")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid identifier"));
}

#[test]
fn test_missing_record_exit_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/475425/items/ZZZZZZZZ");
        then.status(404);
    });

    zoinks(&server)
        .arg("ZZZZZZZZ")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn test_no_input_exit_code() {
    let server = MockServer::start();

    zoinks(&server)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No input given"));
}

#[test]
fn test_missing_source_file_exit_code() {
    let server = MockServer::start();

    zoinks(&server)
        .args(["-s", "/nonexistent/ids.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File does not exist"));
}

#[test]
fn test_several_identifiers_prefixed_with_key() {
    let server = MockServer::start();
    serve_article(&server);
    server.mock(|when, then| {
        when.method(GET).path("/users/475425/items/ABCD2345");
        then.status(200).body(GENERAL_RELATIVITY);
    });

    zoinks(&server)
        .args(["-f", "year", "32TR4H94", "zotero://select/library/items/ABCD2345"])
        .assert()
        .success()
        .stdout("32TR4H94: 1905\nABCD2345: 1915\n");
}

#[test]
fn test_table_output() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server)
        .args(["-o", "table", "-f", "citekey,year", "32TR4H94"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Key")
                .and(predicate::str::contains("citekey"))
                .and(predicate::str::contains("einstein1905electrodynamics"))
                .and(predicate::str::contains("1905")),
        );
}

#[test]
fn test_identifiers_from_source_file() {
    let server = MockServer::start();
    serve_article(&server);

    let dir = tempfile::tempdir().unwrap();
    let ids = dir.path().join("ids.txt");
    std::fs::write(&ids, "zotero://select/library/items/32TR4H94\n").unwrap();

    zoinks(&server)
        .args(["-f", "citekey", "-s"])
        .arg(&ids)
        .assert()
        .success()
        .stdout("einstein1905electrodynamics\n");
}

#[test]
fn test_unreadable_source_file_exit_code() {
    let server = MockServer::start();
    let dir = tempfile::tempdir().unwrap();

    // A directory exists but cannot be read as text.
    zoinks(&server)
        .arg("-s")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File error"));
}

#[test]
fn test_flags_override_environment() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users/999/items/32TR4H94")
            .header("zotero-api-key", "flagkey");
        then.status(200).body(ARTICLE);
    });

    zoinks(&server)
        .env("ZOTERO_API_KEY", "envkey")
        .args(["-a", "flagkey", "-i", "999", "-f", "key", "32TR4H94"])
        .assert()
        .success()
        .stdout("32TR4H94\n");
    mock.assert();
}

#[test]
fn test_rate_limited_exit_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/475425/items/32TR4H94");
        then.status(429).header("retry-after", "7");
    });

    zoinks(&server)
        .arg("32TR4H94")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Rate limited"));
}

#[test]
fn test_list_field_names_as_json() {
    let server = MockServer::start();
    serve_article(&server);

    let out = zoinks(&server)
        .args(["-l", "-o", "json", "32TR4H94"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed[0]["key"], "32TR4H94");
    assert_eq!(
        parsed[0]["fields"],
        serde_json::json!(["key", "itemType", "title", "date", "extra"])
    );
}

#[test]
fn test_list_field_names_as_table() {
    let server = MockServer::start();
    serve_article(&server);

    zoinks(&server)
        .args(["-l", "-o", "table", "32TR4H94"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fields").and(predicate::str::contains("itemType")));
}

// Ctrl-C must end the run even while it waits on stdin.
#[cfg(unix)]
#[test]
fn test_interrupt_while_reading_stdin() {
    use std::process::{Command as StdCommand, Stdio};
    use std::time::{Duration, Instant};

    let mut child = StdCommand::new(assert_cmd::cargo::cargo_bin("zoinks"))
        .env("ZOTERO_USER_ID", "475425")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    std::thread::sleep(Duration::from_millis(500));
    let status = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let deadline = Instant::now() + Duration::from_secs(10);
    let exit = loop {
        if let Some(exit) = child.try_wait().unwrap() {
            break exit;
        }
        if Instant::now() > deadline {
            child.kill().unwrap();
            panic!("zoinks did not exit after SIGINT");
        }
        std::thread::sleep(Duration::from_millis(50));
    };
    assert_eq!(exit.code(), Some(1));
}
