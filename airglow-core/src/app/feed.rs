//! Host feed line protocol
//!
//! The board has no network stack of its own; a host on the UART pushes
//! readings and the time as text lines:
//!
//! ```text
//! R <aqi> <temperature>    reading, temperature may be fractional
//! T <epoch_secs>           UTC time
//! # anything               comment
//! ```
//!
//! The device asks for either with `? R` / `? T` (see
//! [`SyncRequest::line`](super::SyncRequest::line)).

use heapless::String;

use super::policy::Reading;

/// Longest line accepted from the host
pub const MAX_LINE: usize = 64;

/// A decoded feed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedMessage {
    Reading(Reading),
    Clock { epoch_secs: u64 },
}

/// Feed parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedError {
    /// Line too long for the receive buffer
    Overlong,
    UnknownCommand,
    MissingField,
    /// Unexpected trailing field
    ExtraField,
    InvalidNumber,
}

/// Parse one line; blank lines and comments yield `Ok(None)`
pub fn parse_line(line: &str) -> Result<Option<FeedMessage>, FeedError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_ascii_whitespace();
    let command = fields.next().ok_or(FeedError::MissingField)?;

    let message = match command {
        "R" | "r" => {
            let aqi = fields.next().ok_or(FeedError::MissingField)?;
            let temperature = fields.next().ok_or(FeedError::MissingField)?;
            FeedMessage::Reading(Reading {
                aqi: aqi.parse().map_err(|_| FeedError::InvalidNumber)?,
                temperature: parse_rounded(temperature)?,
            })
        }
        "T" | "t" => {
            let secs = fields.next().ok_or(FeedError::MissingField)?;
            FeedMessage::Clock {
                epoch_secs: secs.parse().map_err(|_| FeedError::InvalidNumber)?,
            }
        }
        _ => return Err(FeedError::UnknownCommand),
    };

    if fields.next().is_some() {
        return Err(FeedError::ExtraField);
    }

    Ok(Some(message))
}

/// Byte-at-a-time line assembler for the feed link
#[derive(Debug, Default)]
pub struct LineParser {
    line: String<MAX_LINE>,
    overlong: bool,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; a message comes back once a full line has arrived
    ///
    /// Lines longer than [`MAX_LINE`] are dropped whole and reported once
    /// at their terminating newline.
    pub fn feed(&mut self, byte: u8) -> Result<Option<FeedMessage>, FeedError> {
        if byte == b'\n' {
            let overlong = core::mem::take(&mut self.overlong);
            let result = if overlong {
                Err(FeedError::Overlong)
            } else {
                parse_line(&self.line)
            };
            self.line.clear();
            return result;
        }

        if self.overlong {
            return Ok(None);
        }
        // Non-ASCII bytes cannot be part of a valid line
        let c = if byte.is_ascii() { byte as char } else { '?' };
        if self.line.push(c).is_err() {
            self.line.clear();
            self.overlong = true;
        }
        Ok(None)
    }
}

/// Parse a decimal, rounding half away from zero
fn parse_rounded(s: &str) -> Result<i32, FeedError> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (whole, frac) = match body.split_once('.') {
        Some((w, f)) => (w, f),
        None => (body, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(FeedError::InvalidNumber);
    }
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(FeedError::InvalidNumber);
    }

    let mut magnitude: i32 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| FeedError::InvalidNumber)?
    };
    if frac.as_bytes().first().is_some_and(|&d| d >= b'5') {
        magnitude = magnitude.checked_add(1).ok_or(FeedError::InvalidNumber)?;
    }

    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    fn reading(aqi: i32, temperature: i32) -> Option<FeedMessage> {
        Some(FeedMessage::Reading(Reading { aqi, temperature }))
    }

    #[test]
    fn test_reading_line() {
        assert_eq!(parse_line("R 42 21"), Ok(reading(42, 21)));
        assert_eq!(parse_line("  r 7   -3\r\n"), Ok(reading(7, -3)));
    }

    #[test]
    fn test_temperature_rounding() {
        assert_eq!(parse_line("R 1 21.4"), Ok(reading(1, 21)));
        assert_eq!(parse_line("R 1 21.5"), Ok(reading(1, 22)));
        assert_eq!(parse_line("R 1 -0.5"), Ok(reading(1, -1)));
        assert_eq!(parse_line("R 1 -0.4"), Ok(reading(1, 0)));
        assert_eq!(parse_line("R 1 .7"), Ok(reading(1, 1)));
        assert_eq!(parse_line("R 1 +3."), Ok(reading(1, 3)));
    }

    #[test]
    fn test_clock_line() {
        assert_eq!(
            parse_line("T 1717243200"),
            Ok(Some(FeedMessage::Clock {
                epoch_secs: 1_717_243_200
            }))
        );
    }

    #[test]
    fn test_comments_and_blank() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# hello"), Ok(None));
    }

    fn feed_all(parser: &mut LineParser, bytes: &[u8]) -> Vec<Result<Option<FeedMessage>, FeedError>, 8> {
        let mut out = Vec::new();
        for &b in bytes {
            match parser.feed(b) {
                Ok(None) => {}
                other => out.push(other).unwrap(),
            }
        }
        out
    }

    #[test]
    fn test_line_parser() {
        let mut parser = LineParser::new();
        let out = feed_all(&mut parser, b"# hi\nR 42 21.6\r\nT 1700000000\n");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Ok(reading(42, 22)));
        assert_eq!(
            out[1],
            Ok(Some(FeedMessage::Clock {
                epoch_secs: 1_700_000_000
            }))
        );
    }

    #[test]
    fn test_line_parser_split_reads() {
        let mut parser = LineParser::new();
        assert!(feed_all(&mut parser, b"R 4").is_empty());
        let out = feed_all(&mut parser, b"2 7\n");
        assert_eq!(out.as_slice(), &[Ok(reading(42, 7))]);
    }

    #[test]
    fn test_line_parser_overlong() {
        let mut parser = LineParser::new();
        let long = [b'1'; MAX_LINE + 10];
        assert!(feed_all(&mut parser, &long).is_empty());
        let out = feed_all(&mut parser, b"\nR 1 2\n");
        assert_eq!(out.as_slice(), &[Err(FeedError::Overlong), Ok(reading(1, 2))]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_line("X 1"), Err(FeedError::UnknownCommand));
        assert_eq!(parse_line("R 1"), Err(FeedError::MissingField));
        assert_eq!(parse_line("T"), Err(FeedError::MissingField));
        assert_eq!(parse_line("R 1 2 3"), Err(FeedError::ExtraField));
        assert_eq!(parse_line("R x 2"), Err(FeedError::InvalidNumber));
        assert_eq!(parse_line("R 1 2.x"), Err(FeedError::InvalidNumber));
        assert_eq!(parse_line("R 1 -"), Err(FeedError::InvalidNumber));
        assert_eq!(parse_line("R 1 ."), Err(FeedError::InvalidNumber));
        assert_eq!(parse_line("T -5"), Err(FeedError::InvalidNumber));
    }
}
