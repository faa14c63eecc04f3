//! Integration tests for the landlord engine binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use serde_json::Value;

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_landlord");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start landlord");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

#[test]
fn hello_handshake_with_protocol_version() {
    let lines = run_engine(&["hello", "quit"]);

    assert!(lines.iter().any(|l| l == "id name landlord"));
    assert!(lines.iter().any(|l| l == "id author landlord"));
    assert!(lines.iter().any(|l| l == "protocol_version 1"));
    assert!(lines.iter().any(|l| l == "hellook"));

    let ok_idx = lines.iter().position(|l| l == "hellook").unwrap();
    let proto_idx = lines.iter().position(|l| l == "protocol_version 1").unwrap();
    assert!(proto_idx < ok_idx, "protocol_version must appear before hellook");
}

#[test]
fn hello_handshake_includes_seed_option() {
    let lines = run_engine(&["hello", "quit"]);
    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(option_lines.len(), 1);
    assert!(option_lines[0].starts_with("option name Seed type spin default 0"));
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_and_malformed_commands_are_ignored() {
    let lines = run_engine(&["foobar", "buy maybe", "tile x", "", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn commands_need_a_game() {
    let lines = run_engine(&["roll", "buy yes", "state", "tile 1", "quit"]);
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l == "error no game in progress"));
}

#[test]
fn newgame_validates_roster() {
    let lines = run_engine(&["newgame Solo", "newgame a b c d e", "newgame Ann Ben", "quit"]);
    assert!(lines[0].starts_with("error "));
    assert!(lines[1].starts_with("error "));
    assert_eq!(lines[2], "game 2 players");
}

#[test]
fn seeded_session_is_reproducible() {
    let session = [
        "setoption name Seed value 1234",
        "newgame Ann Ben Cid",
        "roll",
        "buy yes",
        "roll",
        "buy no",
        "roll",
        "upgrade no",
        "roll",
        "state",
        "quit",
    ];
    assert_eq!(run_engine(&session), run_engine(&session));
}

#[test]
fn full_session_state_is_json() {
    let lines = run_engine(&[
        "hello",
        "isready",
        "setoption name Seed value 7",
        "newgame Ann Ben",
        "roll",
        "state",
        "tile 0",
        "quit",
    ]);

    let state_line = lines
        .iter()
        .find(|l| l.starts_with("state "))
        .expect("no state line");
    let state: Value = serde_json::from_str(&state_line["state ".len()..]).unwrap();
    assert_eq!(state["players"].as_array().unwrap().len(), 2);
    assert_eq!(state["tiles"].as_array().unwrap().len(), 40);
    assert_eq!(state["game_over"], false);

    let tile_line = lines
        .iter()
        .find(|l| l.starts_with("tile "))
        .expect("no tile line");
    let tile: Value = serde_json::from_str(&tile_line["tile ".len()..]).unwrap();
    assert_eq!(tile["kind"], "start");
}

#[test]
fn open_offer_is_resurfaced_until_settled() {
    // Nothing settles offers here, so the first offer must repeat on every later roll.
    let mut commands = vec!["setoption name Seed value 3", "newgame Ann Ben"];
    commands.extend(std::iter::repeat("roll").take(40));
    commands.push("quit");
    let lines = run_engine(&commands);
    assert_eq!(lines.len(), 41);

    let rolls = &lines[1..];
    let first_offer = rolls
        .iter()
        .position(|l| l.starts_with("offer "))
        .expect("forty rolls without a single property offer");
    for line in &rolls[first_offer + 1..] {
        assert_eq!(line, &rolls[first_offer], "an open offer must be re-surfaced");
    }
}

#[test]
fn quit_ends_session() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}
