use combine::easy;
use combine::stream::state::SourcePosition;
use thiserror::Error;

/// Failures raised while parsing an EDIF document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input is not one well-formed S-expression, or text remains
    /// after a complete parse.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: i32,
        column: i32,
        message: String,
    },

    /// A length-prefixed token whose declared length disagrees with the
    /// decoded payload length.
    #[error("length mismatch at {line}:{column}: expected {expected} bytes, found {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        line: i32,
        column: i32,
    },
}

impl ParseError {
    pub(crate) fn from_easy(err: easy::Errors<char, &str, SourcePosition>) -> ParseError {
        let pos = err.position;

        // Length checks are raised inside the grammar as message errors
        // with a fixed wording; recover the two lengths from it.
        for e in &err.errors {
            if let easy::Error::Message(easy::Info::Owned(msg)) = e {
                if let Some(rest) = msg.strip_prefix("invalid data of length ") {
                    if let Some((actual, expected)) = split_once(rest, ", expected ") {
                        if let (Ok(actual), Ok(expected)) = (actual.parse(), expected.parse()) {
                            return ParseError::LengthMismatch {
                                expected,
                                actual,
                                line: pos.line,
                                column: pos.column,
                            };
                        }
                    }
                }
            }
        }

        let message = err
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        ParseError::Syntax {
            line: pos.line,
            column: pos.column,
            message,
        }
    }
}

fn split_once<'a>(s: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    let at = s.find(sep)?;
    Some((&s[..at], &s[at + sep.len()..]))
}
