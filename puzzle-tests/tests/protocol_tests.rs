//! Integration Tests für das Link-Protokoll und MockLink

use puzzle_core::{Command, DecodeError, LINE_END, Link, LinkError, decode_chunk};
use puzzle_tests::MockLink;

const ALL_COMMANDS: [Command; 6] = [
    Command::StartGame,
    Command::ResetGame,
    Command::GameOver,
    Command::GameWon,
    Command::Talking,
    Command::StoppedTalking,
];

// ============================================================================
// Tests: Text-Tags
// ============================================================================

#[test]
fn test_tags_are_stable() {
    let tags: Vec<&str> = ALL_COMMANDS.iter().map(|command| command.as_str()).collect();
    assert_eq!(
        tags,
        vec![
            "START_GAME",
            "RESET_GAME",
            "GAME_OVER",
            "GAME_WON",
            "TALKING",
            "STOPPED_TALKING"
        ]
    );
}

#[test]
fn test_parse_accepts_line_endings() {
    assert_eq!(Command::try_from("TALKING\n"), Ok(Command::Talking));
    assert_eq!(Command::try_from("GAME_WON\r\n"), Ok(Command::GameWon));
    assert_eq!(Command::try_from("  RESET_GAME "), Ok(Command::ResetGame));
}

#[test]
fn test_parse_rejects_unknown() {
    assert_eq!(Command::try_from("talking"), Err(()));
    assert_eq!(Command::try_from(""), Err(()));
    assert_eq!(Command::try_from("START_GAME_NOW"), Err(()));
}

#[test]
fn test_display_matches_tag() {
    for command in ALL_COMMANDS {
        assert_eq!(command.to_string(), command.as_str());
    }
}

// ============================================================================
// Tests: MockLink
// ============================================================================

#[test]
fn test_mock_link_records_sent() {
    let mut link = MockLink::connected();
    link.send_command(Command::Talking).unwrap();
    link.send_command(Command::StoppedTalking).unwrap();

    assert_eq!(link.sent, vec![Command::Talking, Command::StoppedTalking]);
    assert_eq!(link.sent_count(Command::Talking), 1);
}

#[test]
fn test_mock_link_disconnected() {
    let mut link = MockLink::default();
    assert!(!link.is_connected());
    assert_eq!(
        link.send_command(Command::GameWon),
        Err(LinkError::NotConnected)
    );

    link.inbox.push_back(Command::Talking);
    assert_eq!(link.poll(), None);
}

#[test]
fn test_mock_link_poll_yields_one_per_call() {
    let mut link = MockLink::connected();
    link.inbox.push_back(Command::Talking);
    link.inbox.push_back(Command::StoppedTalking);

    assert_eq!(link.poll(), Some(Command::Talking));
    assert_eq!(link.poll(), Some(Command::StoppedTalking));
    assert_eq!(link.poll(), None);
}

// ============================================================================
// Tests: Empfangs-Blöcke
// ============================================================================

#[test]
fn test_decode_chunk_multiple_lines() {
    let commands: Vec<_> = decode_chunk(b"TALKING\nSTOPPED_TALKING\n").collect();
    assert_eq!(
        commands,
        vec![Ok(Command::Talking), Ok(Command::StoppedTalking)]
    );
}

#[test]
fn test_decode_chunk_without_line_end() {
    let commands: Vec<_> = decode_chunk(b"  TALKING ").collect();
    assert_eq!(commands, vec![Ok(Command::Talking)]);
}

#[test]
fn test_decode_chunk_unknown_tag() {
    let commands: Vec<_> = decode_chunk(b"PING\r\nGAME_OVER\r\n").collect();
    assert_eq!(
        commands,
        vec![Err(DecodeError::UnknownTag), Ok(Command::GameOver)]
    );
}

#[test]
fn test_encoded_line_decodes_back() {
    let mut wire = Vec::new();
    for command in ALL_COMMANDS {
        wire.extend_from_slice(command.as_str().as_bytes());
        wire.extend_from_slice(LINE_END);
    }

    let decoded: Vec<Command> = decode_chunk(&wire).filter_map(Result::ok).collect();
    assert_eq!(decoded, ALL_COMMANDS.to_vec());
}
