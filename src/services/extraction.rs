use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Matches the opening of an array-of-objects region.
static ARRAY_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*\{").expect("ARRAY_OPENER is a valid regex pattern")
});

static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r",\s*([}\]])").expect("TRAILING_COMMA is a valid regex pattern")
});

static SMART_DOUBLE_QUOTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new("[\u{201C}\u{201D}]").expect("SMART_DOUBLE_QUOTES is a valid regex pattern")
});

static SMART_SINGLE_QUOTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new("[\u{2018}\u{2019}]").expect("SMART_SINGLE_QUOTES is a valid regex pattern")
});

// Only lines that are entirely a comment; `//` inside content is left alone.
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*//.*$").expect("LINE_COMMENT is a valid regex pattern")
});

/// Converts raw model output into a list of question candidates, or `None`
/// when no usable content can be recovered. Staged: bracket isolation,
/// lexical normalization, strict parse, structural repair, terminal failure.
/// Never errors to the caller.
pub fn extract(raw: &str) -> Option<Vec<Value>> {
    let region = isolate_array_region(raw).unwrap_or(raw);
    let normalized = normalize(region);

    if let Some(parsed) = strict_parse(&normalized) {
        return Some(parsed);
    }

    log::debug!("strict parse failed, attempting structural repair");
    let repaired = repair(&normalized);
    let parsed = strict_parse(&repaired);
    if parsed.is_none() {
        log::debug!("structural repair did not yield a parseable array");
    }
    parsed
}

/// Isolates the FIRST substring that opens an array of objects, scanned
/// string-aware to its balanced closing bracket. An opener that never closes
/// (truncated output) yields the region through end-of-text so the repair
/// stage can balance it. No opener at all yields `None`.
pub fn isolate_array_region(raw: &str) -> Option<&str> {
    let start = ARRAY_OPENER.find(raw)?.start();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    Some(&raw[start..])
}

/// Deterministic lexical rewrites for near-miss JSON: trailing commas, smart
/// quotes, escaped backticks, full-line comments. Comment stripping runs last,
/// after quote normalization.
pub fn normalize(region: &str) -> String {
    let no_trailing = TRAILING_COMMA.replace_all(region, "$1");
    let ascii_double = SMART_DOUBLE_QUOTES.replace_all(&no_trailing, "\"");
    let ascii_single = SMART_SINGLE_QUOTES.replace_all(&ascii_double, "'");
    let unescaped = ascii_single.replace("\\`", "`");
    LINE_COMMENT.replace_all(&unescaped, "").into_owned()
}

/// Standards-compliant parse. The contract is a list of candidates, so only a
/// top-level array counts as success.
pub fn strict_parse(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn is_atom_start(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn is_atom_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '+' | '.')
}

// A separator is owed after a completed value: a closed string, a closed
// container, or a bare atom.
fn needs_separator(last_sig: Option<char>) -> bool {
    matches!(last_sig, Some('"' | '}' | ']' | '0'))
}

/// Permissive single-pass rewrite tolerating the common model mistakes strict
/// parsing cannot: unquoted keys, missing commas between elements, unbalanced
/// brackets, and unterminated strings. Output is re-fed to the strict parser;
/// this stage never judges success itself.
pub fn repair(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut last_sig: Option<char> = None;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
                last_sig = Some('"');
            }
            continue;
        }

        match ch {
            '"' => {
                if needs_separator(last_sig) {
                    out.push(',');
                }
                out.push('"');
                in_string = true;
            }
            '{' | '[' => {
                if needs_separator(last_sig) {
                    out.push(',');
                }
                out.push(ch);
                stack.push(ch);
                last_sig = Some(ch);
            }
            '}' => {
                // Unmatched closers are dropped.
                if stack.last() == Some(&'{') {
                    stack.pop();
                    out.push('}');
                    last_sig = Some('}');
                }
            }
            ']' => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                    out.push(']');
                    last_sig = Some(']');
                }
            }
            ':' => {
                out.push(':');
                last_sig = Some(':');
            }
            ',' => {
                out.push(',');
                last_sig = Some(',');
            }
            c if c.is_whitespace() => out.push(c),
            c if is_atom_start(c) => {
                let mut atom = String::new();
                atom.push(c);
                while let Some(&next) = chars.peek() {
                    if is_atom_char(next) {
                        atom.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let mut trailing_ws = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() {
                        trailing_ws.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if needs_separator(last_sig) {
                    out.push(',');
                }

                let is_key = chars.peek() == Some(&':') && stack.last() == Some(&'{');
                if is_key {
                    out.push('"');
                    out.push_str(&atom);
                    out.push('"');
                    last_sig = Some('"');
                } else {
                    out.push_str(&atom);
                    last_sig = Some('0');
                }
                out.push_str(&trailing_ws);
            }
            other => out.push(other),
        }
    }

    if in_string {
        out.push('"');
    }
    while let Some(open) = stack.pop() {
        out.push(if open == '{' { '}' } else { ']' });
    }
    out
}
