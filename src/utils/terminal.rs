//! Terminal output sanitization utilities
//!
//! # Security: Terminal Injection Prevention
//!
//! Titles, snippets and paths come from the collaborator and are shown verbatim in the
//! TUI and CLI. Escape sequences embedded in them could:
//! - Clear the screen or move the cursor
//! - Change terminal colors or styles
//!
//! Every collaborator-provided string goes through [`sanitize`] (single line) or
//! [`strip_ansi_codes`] (multi-line) before it is printed or rendered.

/// Remove terminal escape sequences and control characters.
///
/// Drops CSI sequences (`ESC [ ... final`), OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \\`, used for titles and hyperlinks), any other two-byte
/// `ESC x` sequence, and control characters other than tab, newline and
/// carriage return.
///
/// # Examples
///
/// ```
/// use timeline_explorer::utils::terminal::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mRed text\x1b[0m"), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => match chars.next() {
                // CSI: parameters and intermediates up to a final byte in @..~
                Some('[') => {
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ST
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\t' | '\n' | '\r' => result.push(ch),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

/// Single-line display form: ANSI stripped, line breaks and tabs folded to spaces,
/// surrounding whitespace trimmed
pub fn sanitize(text: &str) -> String {
    strip_ansi_codes(text)
        .split(|c: char| c == '\n' || c == '\r' || c == '\t')
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}
