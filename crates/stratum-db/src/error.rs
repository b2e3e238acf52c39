//! Conversions from driver errors.
//!
//! `sqlx::Error` and `stratum_core::Error` are both foreign to this crate, so
//! the conversions are plain functions rather than `From` impls.

use stratum_core::Error;

const REDACTED: &str = "***";

/// Wraps a prepare or execute failure, keeping only the driver's message.
pub(crate) fn driver_error(err: sqlx::Error) -> Error {
    let message = err
        .as_database_error()
        .map_or_else(|| err.to_string(), |db| db.message().to_owned());
    Error::Driver(message)
}

/// Wraps a connection failure, removing every secret from the message.
pub(crate) fn connection_error(err: &sqlx::Error, secrets: &[&str]) -> Error {
    Error::Connection(scrub(&err.to_string(), secrets))
}

/// Secrets shorter than this are only replaced where they stand alone.
const MIN_EMBEDDED_SECRET: usize = 4;

/// Replaces each non-empty secret in `message`, longest first so that a URL
/// is removed before the password it contains.
pub(crate) fn scrub(message: &str, secrets: &[&str]) -> String {
    let mut secrets: Vec<&str> = secrets.iter().copied().filter(|s| !s.is_empty()).collect();
    secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));

    let mut scrubbed = message.to_owned();
    for secret in secrets {
        scrubbed = if secret.len() < MIN_EMBEDDED_SECRET {
            replace_standalone(&scrubbed, secret)
        } else {
            scrubbed.replace(secret, REDACTED)
        };
    }
    scrubbed
}

/// Replaces occurrences of `secret` not adjacent to a word character.
fn replace_standalone(message: &str, secret: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut out = String::with_capacity(message.len());
    let mut copied = 0;
    for (start, _) in message.match_indices(secret) {
        let end = start + secret.len();
        let before = message[..start].chars().next_back();
        let after = message[end..].chars().next();
        if before.is_some_and(is_word) || after.is_some_and(is_word) {
            continue;
        }
        out.push_str(&message[copied..start]);
        out.push_str(REDACTED);
        copied = end;
    }
    out.push_str(&message[copied..]);
    out
}
