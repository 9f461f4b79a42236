//! Typewriter-style reveal of bot replies.
//!
//! The reply is already stored before it is revealed; this only paces
//! what the terminal shows.

use std::io::{self, Write};
use std::pin::pin;
use std::time::Duration;

use tokio_stream::{Stream, StreamExt};

/// Yield `text` one character at a time, `interval` apart.
pub fn reveal(text: &str, interval: Duration) -> impl Stream<Item = char> {
    let chars: Vec<char> = text.chars().collect();
    tokio_stream::iter(chars).throttle(interval)
}

/// Write `text` to `out` at reveal pace. A zero interval writes it at once.
pub async fn write_revealed<W: Write>(out: &mut W, text: &str, interval: Duration) -> io::Result<()> {
    if interval.is_zero() {
        write!(out, "{}", text)?;
        return out.flush();
    }
    let mut chars = pin!(reveal(text, interval));
    let mut buf = [0u8; 4];
    while let Some(c) = chars.next().await {
        out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
    }
    Ok(())
}
