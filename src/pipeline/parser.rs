//! Query line parser.
//!
//! The TUI query line carries two parts separated by `|`:
//!
//! ```text
//! query_line := directives "|" free_text | free_text
//! directives := directive*
//! directive  := field:value | field:"quoted value"
//! field      := layer | from | to | sort | category (case-insensitive)
//! ```
//!
//! Free text becomes the search query. Directives become the layer selection,
//! year range, sort key and category selection.
//!
//! # Examples
//!
//! ```rust
//! # use timeline_explorer::pipeline::parser::{parse_directives, split_query_line};
//! let (directives, text) = split_query_line("layer:data from:2019 | kafka");
//! assert_eq!(text, "kafka");
//! let parsed = parse_directives(directives).unwrap();
//! assert_eq!(parsed.directives.len(), 2);
//!
//! // Quoted values for spaces
//! let parsed = parse_directives("category:\"Data Mesh\"").unwrap();
//! assert_eq!(parsed.directives.len(), 1);
//! ```
//!
//! # Validation
//!
//! - `from`/`to` must be 4-digit years
//! - `sort` must be a known sort key
//! - Empty field names or values are rejected

use anyhow::{Context, Result, anyhow};

use super::directives::{Directive, QueryDirectives};

/// field:value or field:"quoted value"
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    field: String,
    value: String,
}

/// Split the raw query line into `(directives, free_text)`.
///
/// Without a `|` the whole line is free text.
pub fn split_query_line(line: &str) -> (&str, &str) {
    match line.split_once('|') {
        Some((directives, text)) => (directives.trim(), text.trim()),
        None => ("", line.trim()),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);

        let Some(colon_pos) = word.find(':') else {
            return Err(anyhow!("Invalid token: '{}' (expected field:value)", word));
        };

        let field = word[..colon_pos].to_string();
        let mut value = word[colon_pos + 1..].to_string();
        if value.starts_with('"') {
            value = read_quoted_value(&mut chars, &value)?;
        }

        if field.is_empty() || value.trim().is_empty() {
            return Err(anyhow!("Invalid field:value format: {}", word));
        }

        tokens.push(Token { field, value });
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value; `initial` still holds the opening quote
fn read_quoted_value(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    initial: &str,
) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        return Ok(value[..quote_pos].to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_year(field: &str, value: &str) -> Result<i32> {
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Invalid {} year: '{}' (expected YYYY)", field, value));
    }
    value.parse().with_context(|| format!("Invalid {} year: '{}'", field, value))
}

fn parse_token(token: Token) -> Result<Directive> {
    let value = token.value.trim().to_string();
    match token.field.to_lowercase().as_str() {
        "layer" => Ok(Directive::Layer(value)),
        "from" => parse_year("from", &value).map(Directive::From),
        "to" => parse_year("to", &value).map(Directive::To),
        "sort" => Ok(Directive::Sort(value.parse()?)),
        "category" => Ok(Directive::Category(value)),
        _ => Err(anyhow!(
            "Unknown field: '{}' (valid fields: layer, from, to, sort, category)",
            token.field
        )),
    }
}

/// Parse the directive portion of the query line
pub fn parse_directives(input: &str) -> Result<QueryDirectives> {
    let mut parsed = QueryDirectives::new();
    if input.trim().is_empty() {
        return Ok(parsed);
    }

    let tokens = tokenize(input).context("Failed to tokenize directives")?;
    for token in tokens {
        parsed.push(parse_token(token)?);
    }

    Ok(parsed)
}
