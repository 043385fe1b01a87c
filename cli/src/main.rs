//! FILENAME: cli/src/main.rs
//! PURPOSE: A thin terminal REPL driving the `engine` library end to end.
//! CONTEXT: Reads one command per line (`set <POS> <TEXT>`, `clear <POS>`,
//! `scope`, `value`, `text`, `exit`) until `exit` or EOF.

use std::io::{self, BufRead, Write};

use engine::Sheet;
use parser::Position;

enum Command {
    Set(String, String),
    Clear(String),
    Scope,
    Value,
    Text,
    Exit,
    Bad,
}

/// Splits `s` on its first run of whitespace, trimming leading whitespace
/// off the remainder but leaving everything after it untouched — a cell's
/// text may itself carry meaningful whitespace.
fn split_first_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => {
            let (first, rest) = s.split_at(i);
            (first, rest.trim_start())
        }
        None => (s, ""),
    }
}

fn parse_command(line: &str) -> Command {
    let (keyword, rest) = split_first_token(line.trim_end_matches(['\r', '\n']));
    match keyword {
        "set" => {
            let (pos, text) = split_first_token(rest);
            Command::Set(pos.to_string(), text.to_string())
        }
        "clear" => Command::Clear(rest.to_string()),
        "scope" => Command::Scope,
        "value" => Command::Value,
        "text" => Command::Text,
        "exit" => Command::Exit,
        _ => Command::Bad,
    }
}

fn execute(command: Command, sheet: &mut Sheet, out: &mut impl Write) -> io::Result<bool> {
    match command {
        Command::Bad => writeln!(out, "bad action")?,
        Command::Set(pos_str, text) => match Position::parse(&pos_str) {
            Some(pos) => {
                log::debug!("set {} <- {:?}", pos_str, text);
                match sheet.set_cell(pos, &text) {
                    Ok(()) => writeln!(out, "set cell at {}", pos)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            None => writeln!(out, "bad position: {}", pos_str)?,
        },
        Command::Clear(pos_str) => match Position::parse(&pos_str) {
            Some(pos) => {
                sheet.clear_cell(pos);
                writeln!(out, "cleared cell at {}", pos)?
            }
            None => writeln!(out, "bad position: {}", pos_str)?,
        },
        Command::Scope => {
            let size = sheet.printable_size();
            writeln!(out, "({}, {})", size.rows, size.cols)?
        }
        Command::Value => sheet.print_values(out)?,
        Command::Text => sheet.print_texts(out)?,
        Command::Exit => return Ok(true),
    }
    Ok(false)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut sheet = Sheet::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let command = parse_command(&line);
        if execute(command, &mut sheet, &mut out)? {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_with_text_containing_spaces() {
        match parse_command("set A1 hello world") {
            Command::Set(pos, text) => {
                assert_eq!(pos, "A1");
                assert_eq!(text, "hello world");
            }
            _ => panic!("expected Set"),
        }
    }

    #[test]
    fn parses_clear() {
        match parse_command("clear B2") {
            Command::Clear(pos) => assert_eq!(pos, "B2"),
            _ => panic!("expected Clear"),
        }
    }

    #[test]
    fn unknown_keyword_is_bad() {
        assert!(matches!(parse_command("frobnicate"), Command::Bad));
    }

    #[test]
    fn set_with_empty_text_clears_the_value() {
        let mut sheet = Sheet::new();
        let mut out = Vec::new();
        execute(parse_command("set A1 5"), &mut sheet, &mut out).unwrap();
        execute(parse_command("set A1"), &mut sheet, &mut out).unwrap();
        let view = sheet.get_cell(Position::parse("A1").unwrap()).unwrap();
        assert_eq!(view.text(), "");
    }

    #[test]
    fn scope_reports_bounding_rectangle() {
        let mut sheet = Sheet::new();
        let mut out = Vec::new();
        execute(parse_command("set B2 1"), &mut sheet, &mut out).unwrap();
        out.clear();
        execute(parse_command("scope"), &mut sheet, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(2, 2)\n");
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut sheet = Sheet::new();
        let mut out = Vec::new();
        assert!(execute(parse_command("exit"), &mut sheet, &mut out).unwrap());
    }
}
