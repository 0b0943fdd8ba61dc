//! Keyboard input: raw reads from stdin and their decoding into [`Key`].
//!
//! In raw mode every keypress arrives as one short burst of bytes: a
//! single byte for printable keys and control characters, or an escape
//! sequence such as `ESC [ Z` for Shift-Tab. Each read takes up to four
//! bytes, which is enough for every sequence we act on.

use std::io::{self, Read};

const MAX_KEY_BYTES: usize = 4;

/// Control characters with a meaning somewhere in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    Enter,
    Escape,
    /// Also Ctrl-I.
    Tab,
    Backspace,
    CtrlC,
    CtrlD,
    CtrlH,
    CtrlN,
    CtrlR,
    /// Any other Ctrl-letter, as its lowercase letter.
    Ctrl(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeSequence {
    ShiftTab,
    Up,
    Down,
    Other(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Printable ASCII, space through `~`.
    Printable(char),
    Control(ControlKey),
    Sequence(EscapeSequence),
    /// Neither a single known byte nor an escape sequence (e.g. UTF-8 text).
    Unknown(Vec<u8>),
}

impl Key {
    pub fn decode(bytes: &[u8]) -> Key {
        match bytes {
            [b] => decode_single(*b),
            [0x1b, rest @ ..] => Key::Sequence(match rest {
                [b'[', b'Z'] => EscapeSequence::ShiftTab,
                [b'[', b'A'] => EscapeSequence::Up,
                [b'[', b'B'] => EscapeSequence::Down,
                _ => EscapeSequence::Other(bytes.to_vec()),
            }),
            _ => Key::Unknown(bytes.to_vec()),
        }
    }
}

fn decode_single(b: u8) -> Key {
    let control = match b {
        0x0d => ControlKey::Enter,
        0x1b => ControlKey::Escape,
        0x09 => ControlKey::Tab,
        0x7f => ControlKey::Backspace,
        0x03 => ControlKey::CtrlC,
        0x04 => ControlKey::CtrlD,
        0x08 => ControlKey::CtrlH,
        0x0e => ControlKey::CtrlN,
        0x12 => ControlKey::CtrlR,
        0x01..=0x1a => ControlKey::Ctrl(char::from(b'a' + b - 1)),
        0x20..=0x7e => return Key::Printable(char::from(b)),
        _ => return Key::Unknown(vec![b]),
    };
    Key::Control(control)
}

/// One decoded keypress along with the bytes it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub raw: Vec<u8>,
}

impl KeyPress {
    pub fn from_raw(raw: Vec<u8>) -> Self {
        Self {
            key: Key::decode(&raw),
            raw,
        }
    }

    /// The raw bytes packed little-endian into one integer, as shown in
    /// the debug panel.
    pub fn code(&self) -> u32 {
        self.raw
            .iter()
            .take(MAX_KEY_BYTES)
            .enumerate()
            .fold(0, |acc, (i, b)| acc | (u32::from(*b) << (8 * i)))
    }
}

/// Blocking source of keypresses.
pub trait KeySource {
    /// Block until the next keypress and return its raw bytes.
    fn read_raw(&mut self) -> io::Result<Vec<u8>>;

    fn next_key(&mut self) -> io::Result<KeyPress> {
        let raw = self.read_raw()?;
        let press = KeyPress::from_raw(raw);
        log::debug!("Key {:?} ({:#x})", press.key, press.code());
        Ok(press)
    }
}

/// Reads keypresses from the process's stdin (which must be in raw mode).
pub struct StdinKeys {
    stdin: io::Stdin,
}

impl StdinKeys {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for StdinKeys {
    fn read_raw(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = [0u8; MAX_KEY_BYTES];
        let n = self.stdin.lock().read(&mut buf)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(buf[..n].to_vec())
    }
}
