//! Line-oriented event scripts for headless runs.
//!
//! ```text
//! # zoom into the seahorse valley, then pick a seed
//! down left 200 300
//! up left 260 350
//! down right 240 330
//! key d
//! key D            # uppercase implies shift
//! key up
//! command {"Dtyp":"PlotMandel","xmin":-2,"xmax":0.5,"ymin":-1.25,"ymax":1.25,"nmax":100}
//! palette viridis
//! back
//! quit
//! ```

use std::io::BufRead;

use thiserror::Error;
use tracing::warn;

use crate::events::{Event, EventSource, Key, MouseButton};

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("unknown directive {0:?}")]
    UnknownDirective(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),

    #[error("unknown mouse button {0:?}")]
    UnknownButton(String),

    #[error("unknown key {0:?}")]
    UnknownKey(String),

    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
}

/// Parse one script line. Blank lines and comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Event>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (directive, rest) = match line.split_once(char::is_whitespace) {
        Some((d, r)) => (d, r.trim()),
        None => (line, ""),
    };

    let event = match directive {
        "down" | "up" => {
            let mut words = strip_comment(rest).split_whitespace();
            let button = parse_button(words.next().ok_or(ScriptError::MissingArgument("button"))?)?;
            let x = parse_coordinate(words.next().ok_or(ScriptError::MissingArgument("x"))?)?;
            let y = parse_coordinate(words.next().ok_or(ScriptError::MissingArgument("y"))?)?;
            expect_end(words)?;
            if directive == "down" {
                Event::MouseDown { button, x, y }
            } else {
                Event::MouseUp { button, x, y }
            }
        }
        "key" => {
            let mut words = strip_comment(rest).split_whitespace();
            let name = words.next().ok_or(ScriptError::MissingArgument("key name"))?;
            let shift = match words.next() {
                None => false,
                Some("shift") => true,
                Some(other) => return Err(ScriptError::TrailingInput(other.to_string())),
            };
            expect_end(words)?;
            let (key, implied_shift) = parse_key(name)?;
            Event::KeyPress {
                key,
                shift: shift || implied_shift,
            }
        }
        // Command text is passed through untouched, `#` included.
        "command" if !rest.is_empty() => Event::SubmitCommand(rest.to_string()),
        "command" => return Err(ScriptError::MissingArgument("command text")),
        "palette" => {
            let mut words = strip_comment(rest).split_whitespace();
            let name = words.next().ok_or(ScriptError::MissingArgument("palette name"))?;
            expect_end(words)?;
            Event::SubmitPalette(name.to_string())
        }
        "back" => {
            expect_end(strip_comment(rest).split_whitespace())?;
            Event::StepBack
        }
        "quit" => {
            expect_end(strip_comment(rest).split_whitespace())?;
            Event::Quit
        }
        other => return Err(ScriptError::UnknownDirective(other.to_string())),
    };
    Ok(Some(event))
}

fn strip_comment(s: &str) -> &str {
    s.split_once('#').map_or(s, |(before, _)| before)
}

fn expect_end<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<(), ScriptError> {
    match words.next() {
        Some(extra) => Err(ScriptError::TrailingInput(extra.to_string())),
        None => Ok(()),
    }
}

fn parse_button(s: &str) -> Result<MouseButton, ScriptError> {
    match s {
        "left" => Ok(MouseButton::Left),
        "middle" => Ok(MouseButton::Middle),
        "right" => Ok(MouseButton::Right),
        _ => Err(ScriptError::UnknownButton(s.to_string())),
    }
}

fn parse_coordinate(s: &str) -> Result<f64, ScriptError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::InvalidCoordinate(s.to_string()))
}

fn parse_key(name: &str) -> Result<(Key, bool), ScriptError> {
    let key = match name {
        "backspace" => Key::Backspace,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_graphic() => {
                    return Ok((Key::Char(c.to_ascii_lowercase()), c.is_ascii_uppercase()))
                }
                _ => return Err(ScriptError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok((key, false))
}

/// Reads events from a script, skipping (and reporting) bad lines.
pub struct ScriptEventSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> ScriptEventSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> EventSource for ScriptEventSource<R> {
    fn next_event(&mut self) -> Option<Event> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    warn!("Failed to read event script: {e}");
                    return None;
                }
            }
            match parse_line(&self.buf) {
                Ok(Some(event)) => return Some(event),
                Ok(None) => {}
                Err(e) => warn!("Script line {}: {e}", self.line_no),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_lines() {
        assert_eq!(
            parse_line("down left 10 20.5"),
            Ok(Some(Event::MouseDown {
                button: MouseButton::Left,
                x: 10.0,
                y: 20.5
            }))
        );
        assert_eq!(
            parse_line("  up middle 700 3  # release"),
            Ok(Some(Event::MouseUp {
                button: MouseButton::Middle,
                x: 700.0,
                y: 3.0
            }))
        );
        assert_eq!(
            parse_line("down thumb 1 2"),
            Err(ScriptError::UnknownButton("thumb".into()))
        );
        assert_eq!(
            parse_line("down left 1"),
            Err(ScriptError::MissingArgument("y"))
        );
        assert_eq!(
            parse_line("down left 1 nan"),
            Err(ScriptError::InvalidCoordinate("nan".into()))
        );
    }

    #[test]
    fn key_lines() {
        assert_eq!(
            parse_line("key d"),
            Ok(Some(Event::KeyPress {
                key: Key::Char('d'),
                shift: false
            }))
        );
        assert_eq!(
            parse_line("key D"),
            Ok(Some(Event::KeyPress {
                key: Key::Char('d'),
                shift: true
            }))
        );
        assert_eq!(
            parse_line("key left shift"),
            Ok(Some(Event::KeyPress {
                key: Key::Left,
                shift: true
            }))
        );
        assert_eq!(
            parse_line("key escape"),
            Err(ScriptError::UnknownKey("escape".into()))
        );
    }

    #[test]
    fn command_text_keeps_hashes() {
        assert_eq!(
            parse_line(r##"command {"Dtyp":"#x"}"##),
            Ok(Some(Event::SubmitCommand(r##"{"Dtyp":"#x"}"##.into())))
        );
        assert_eq!(
            parse_line("command"),
            Err(ScriptError::MissingArgument("command text"))
        );
    }

    #[test]
    fn misc_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("# comment"), Ok(None));
        assert_eq!(
            parse_line("palette magma"),
            Ok(Some(Event::SubmitPalette("magma".into())))
        );
        assert_eq!(parse_line("back"), Ok(Some(Event::StepBack)));
        assert_eq!(parse_line("quit"), Ok(Some(Event::Quit)));
        assert_eq!(
            parse_line("quit now"),
            Err(ScriptError::TrailingInput("now".into()))
        );
        assert_eq!(
            parse_line("zoom 2"),
            Err(ScriptError::UnknownDirective("zoom".into()))
        );
    }

    #[test]
    fn source_skips_bad_lines() {
        let script = "# header\nkey m\nbogus\n\nback\n";
        let mut source = ScriptEventSource::new(script.as_bytes());
        assert_eq!(
            source.next_event(),
            Some(Event::KeyPress {
                key: Key::Char('m'),
                shift: false
            })
        );
        assert_eq!(source.next_event(), Some(Event::StepBack));
        assert_eq!(source.next_event(), None);
    }
}
