//! Log-safe rendering of scanned text.
//!
//! Scanner payloads carry control characters (the GS1 group separator in
//! particular) and come from outside the application, so they are never
//! written to logs verbatim.

/// ASCII group separator (FNC1 in element strings).
pub const GROUP_SEPARATOR: char = '\u{1d}';

/// Upper bound on the characters kept from one message.
pub const MAX_LOG_CHARS: usize = 256;

/// Makes untrusted text safe to put in a single log line.
///
/// - the group separator is shown as `<GS>`
/// - line breaks and other control characters are dropped
/// - output is capped at [`MAX_LOG_CHARS`] characters, with a trailing `…`
///
/// ```rust
/// use leaflet_core::sanitize::sanitize_log_message;
///
/// assert_eq!(sanitize_log_message("0109506000134352\u{1d}10AB\r\n"), "0109506000134352<GS>10AB");
/// ```
pub fn sanitize_log_message(message: &str) -> String {
    let mut out = String::with_capacity(message.len().min(MAX_LOG_CHARS));

    for (count, c) in message.chars().enumerate() {
        if count == MAX_LOG_CHARS {
            out.push('…');
            break;
        }
        match c {
            GROUP_SEPARATOR => out.push_str("<GS>"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}
