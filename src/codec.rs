//! NMEA0183-style framing: `$<PAYLOAD>*<CC>\r\n`.
//!
//! `CC` is the exclusive-OR of every payload byte as two uppercase hex
//! digits. Encoding writes into a fixed buffer; decoding is a byte-at-a-time
//! state machine that never buffers more than one frame and drops back to
//! hunting for `$` after any malformation.

use core::fmt::{self, Write};

use crate::common::ShotResult;
use crate::message::{Event, Message};

/// Longest frame on the wire, delimiters included.
pub const MESSAGE_MAX_LEN: usize = 82;
pub const MESSAGE_CHECKSUM_LEN: usize = 2;
/// `$`, `*`, two checksum digits, CR and LF surround the payload.
pub const MESSAGE_MAX_PAYLOAD_LEN: usize = MESSAGE_MAX_LEN - 6;

const START_DELIMITER: u8 = b'$';
const CHECKSUM_DELIMITER: u8 = b'*';
const CARRIAGE_RETURN: u8 = b'\r';
const LINE_FEED: u8 = b'\n';
const FIELD_SEPARATOR: u8 = b',';

/// Why a frame was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// `$` inside a payload.
    UnexpectedStart,
    /// CR before the checksum delimiter.
    UnexpectedCarriageReturn,
    /// Payload longer than [`MESSAGE_MAX_PAYLOAD_LEN`].
    PayloadTooLong,
    /// Checksum character other than `0-9` or `A-F`.
    InvalidChecksumDigit(u8),
    /// Something other than CR after the checksum digits.
    MissingCarriageReturn(u8),
    /// Something other than LF after CR.
    MissingLineFeed(u8),
    /// Checksum field not exactly two characters long.
    ChecksumLength(usize),
    ChecksumMismatch { expected: u8, actual: u8 },
    UnknownTag,
    /// RES frame with a result code outside 0..=5.
    UnknownResult(u16),
    /// Wrong number of fields or a field that is not a number of the right type.
    MalformedFields,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::UnexpectedStart => write!(f, "start delimiter inside payload"),
            FrameError::UnexpectedCarriageReturn => write!(f, "carriage return inside payload"),
            FrameError::PayloadTooLong => {
                write!(f, "payload exceeds {} bytes", MESSAGE_MAX_PAYLOAD_LEN)
            }
            FrameError::InvalidChecksumDigit(b) => write!(f, "invalid checksum digit 0x{:02X}", b),
            FrameError::MissingCarriageReturn(b) => {
                write!(f, "expected carriage return, got 0x{:02X}", b)
            }
            FrameError::MissingLineFeed(b) => write!(f, "expected line feed, got 0x{:02X}", b),
            FrameError::ChecksumLength(len) => {
                write!(f, "checksum has {} characters, expected {}", len, MESSAGE_CHECKSUM_LEN)
            }
            FrameError::ChecksumMismatch { expected, actual } => write!(
                f,
                "checksum mismatch: frame says {:02X}, payload gives {:02X}",
                expected, actual
            ),
            FrameError::UnknownTag => write!(f, "unknown message tag"),
            FrameError::UnknownResult(code) => write!(f, "unknown shot result code {}", code),
            FrameError::MalformedFields => write!(f, "malformed field list"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// XOR of every byte in `payload`.
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0, |acc, b| acc ^ b)
}

/// One encoded frame held in a fixed buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; MESSAGE_MAX_LEN],
    len: usize,
}

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame(\"{}\")", self.as_bytes().escape_ascii())
    }
}

struct FrameWriter<'a> {
    frame: &'a mut Frame,
}

impl Write for FrameWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.frame.len + s.len();
        if end > MESSAGE_MAX_LEN {
            return Err(fmt::Error);
        }
        self.frame.buf[self.frame.len..end].copy_from_slice(s.as_bytes());
        self.frame.len = end;
        Ok(())
    }
}

/// Wrap `msg` into a complete frame.
///
/// # Panics
///
/// Never for the defined message set; every payload template is far shorter
/// than [`MESSAGE_MAX_PAYLOAD_LEN`].
pub fn encode(msg: &Message) -> Frame {
    let mut frame = Frame {
        buf: [0; MESSAGE_MAX_LEN],
        len: 0,
    };
    let mut w = FrameWriter { frame: &mut frame };
    let written = write_payload(&mut w, msg);
    assert!(
        written.is_ok() && w.frame.len <= MESSAGE_MAX_PAYLOAD_LEN + 1,
        "payload for {:?} does not fit in a frame",
        msg
    );

    let sum = checksum(&w.frame.buf[1..w.frame.len]);
    let written = write!(w, "*{:02X}\r\n", sum);
    assert!(written.is_ok(), "frame trailer overflowed");
    frame
}

fn write_payload(w: &mut FrameWriter<'_>, msg: &Message) -> fmt::Result {
    w.write_char(START_DELIMITER as char)?;
    match *msg {
        Message::Cha { commitment } => write!(w, "CHA,{}", commitment),
        Message::Acc { secret } => write!(w, "ACC,{}", secret),
        Message::Rev { secret } => write!(w, "REV,{}", secret),
        Message::Sho { row, col } => write!(w, "SHO,{},{}", row, col),
        Message::Res { row, col, result } => write!(w, "RES,{},{},{}", row, col, result.code()),
    }
}

/// Validate a captured frame body and turn it into an event.
///
/// Malformed input yields [`Event::Error`]; nothing is partially accepted.
pub fn parse(payload: &[u8], checksum_digits: &[u8]) -> Event {
    match parse_message(payload, checksum_digits) {
        Ok(msg) => Event::from(msg),
        Err(err) => Event::Error(err),
    }
}

/// Strict parse of one payload against its checksum digits.
pub fn parse_message(payload: &[u8], checksum_digits: &[u8]) -> Result<Message, FrameError> {
    let [hi, lo] = checksum_digits else {
        return Err(FrameError::ChecksumLength(checksum_digits.len()));
    };
    let expected = (hex_value(*hi)? << 4) | hex_value(*lo)?;
    let actual = checksum(payload);
    if expected != actual {
        return Err(FrameError::ChecksumMismatch { expected, actual });
    }

    let mut fields = payload.split(|&b| b == FIELD_SEPARATOR);
    let tag = fields.next().ok_or(FrameError::MalformedFields)?;
    let msg = match tag {
        b"CHA" => Message::Cha {
            commitment: parse_u16(fields.next())?,
        },
        b"ACC" => Message::Acc {
            secret: parse_u16(fields.next())?,
        },
        b"REV" => Message::Rev {
            secret: parse_u16(fields.next())?,
        },
        b"SHO" => {
            let row = parse_i16(fields.next())?;
            let col = parse_i16(fields.next())?;
            Message::Sho { row, col }
        }
        b"RES" => {
            let row = parse_u16(fields.next())?;
            let col = parse_u16(fields.next())?;
            let code = parse_u16(fields.next())?;
            let result = ShotResult::from_code(code).ok_or(FrameError::UnknownResult(code))?;
            Message::Res { row, col, result }
        }
        _ => return Err(FrameError::UnknownTag),
    };
    if fields.next().is_some() {
        return Err(FrameError::MalformedFields);
    }
    Ok(msg)
}

fn hex_value(digit: u8) -> Result<u8, FrameError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(FrameError::InvalidChecksumDigit(digit)),
    }
}

fn parse_u16(field: Option<&[u8]>) -> Result<u16, FrameError> {
    let field = field.ok_or(FrameError::MalformedFields)?;
    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return Err(FrameError::MalformedFields);
    }
    parse_number(field)
}

fn parse_i16(field: Option<&[u8]>) -> Result<i16, FrameError> {
    let field = field.ok_or(FrameError::MalformedFields)?;
    let digits = field.strip_prefix(b"-").unwrap_or(field);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(FrameError::MalformedFields);
    }
    parse_number(field)
}

fn parse_number<T: core::str::FromStr>(field: &[u8]) -> Result<T, FrameError> {
    core::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(FrameError::MalformedFields)
}

/// Where the decoder is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    AwaitStart,
    InPayload,
    InChecksum,
}

/// Streaming frame decoder. Feed it one byte at a time.
#[derive(Debug, Clone)]
pub struct Decoder {
    state: DecodeState,
    payload: [u8; MESSAGE_MAX_PAYLOAD_LEN],
    payload_len: usize,
    checksum: [u8; MESSAGE_CHECKSUM_LEN],
    checksum_len: usize,
    carriage_return: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::AwaitStart,
            payload: [0; MESSAGE_MAX_PAYLOAD_LEN],
            payload_len: 0,
            checksum: [0; MESSAGE_CHECKSUM_LEN],
            checksum_len: 0,
            carriage_return: false,
        }
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Consume one byte. Returns [`Event::NoEvent`] until a frame completes
    /// or is rejected.
    pub fn decode(&mut self, byte: u8) -> Event {
        match self.state {
            DecodeState::AwaitStart => {
                if byte == START_DELIMITER {
                    self.begin_frame();
                }
                Event::NoEvent
            }
            DecodeState::InPayload => match byte {
                CHECKSUM_DELIMITER => {
                    self.state = DecodeState::InChecksum;
                    Event::NoEvent
                }
                CARRIAGE_RETURN => self.fail(FrameError::UnexpectedCarriageReturn),
                START_DELIMITER => self.fail(FrameError::UnexpectedStart),
                _ if self.payload_len == MESSAGE_MAX_PAYLOAD_LEN => {
                    self.fail(FrameError::PayloadTooLong)
                }
                _ => {
                    self.payload[self.payload_len] = byte;
                    self.payload_len += 1;
                    Event::NoEvent
                }
            },
            DecodeState::InChecksum => self.decode_trailer(byte),
        }
    }

    /// Feed a slice, returning the first event it produces and how many bytes
    /// were consumed to get there.
    pub fn decode_slice(&mut self, bytes: &[u8]) -> (Event, usize) {
        for (i, &b) in bytes.iter().enumerate() {
            let event = self.decode(b);
            if event != Event::NoEvent {
                return (event, i + 1);
            }
        }
        (Event::NoEvent, bytes.len())
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.state = DecodeState::AwaitStart;
        self.payload_len = 0;
        self.checksum_len = 0;
        self.carriage_return = false;
    }

    fn decode_trailer(&mut self, byte: u8) -> Event {
        if self.checksum_len < MESSAGE_CHECKSUM_LEN {
            if let Err(err) = hex_value(byte) {
                return self.fail(err);
            }
            self.checksum[self.checksum_len] = byte;
            self.checksum_len += 1;
            return Event::NoEvent;
        }
        if !self.carriage_return {
            if byte != CARRIAGE_RETURN {
                return self.fail(FrameError::MissingCarriageReturn(byte));
            }
            self.carriage_return = true;
            return Event::NoEvent;
        }
        if byte != LINE_FEED {
            return self.fail(FrameError::MissingLineFeed(byte));
        }
        let event = parse(
            &self.payload[..self.payload_len],
            &self.checksum[..self.checksum_len],
        );
        self.reset();
        event
    }

    fn begin_frame(&mut self) {
        self.reset();
        self.state = DecodeState::InPayload;
    }

    fn fail(&mut self, err: FrameError) -> Event {
        self.reset();
        Event::Error(err)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
