//! Recognition of the input-request form in `io` node code.
//!
//! Accepted shapes, case-insensitive on the keyword, quoting optional:
//!
//! ```text
//! input("Name?", name)    read(prompt, var)
//! input(Name?, name)      input(name)        input("Age:")    input()
//! ```
//!
//! An omitted prompt defaults to `INPUT:`; an omitted variable defaults to
//! `x`. A single bare identifier argument is the variable; a single
//! non-identifier argument is the prompt.

/// A recognized request: prompt to show and variable to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InputRequest {
    pub prompt: String,
    pub var: String,
}

const DEFAULT_PROMPT: &str = "INPUT:";
const DEFAULT_VAR: &str = "x";

/// Matches `code` against the input-request form. Returns `None` when the
/// code is anything else (it then executes as ordinary statements).
pub(crate) fn parse_input_request(code: &str) -> Option<InputRequest> {
    let code = code.trim();
    let lower = code.to_ascii_lowercase();
    let keyword_len = if lower.starts_with("input") {
        5
    } else if lower.starts_with("read") {
        4
    } else {
        return None;
    };

    let rest = code[keyword_len..].trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?.trim();

    let (prompt, var) = if inner.is_empty() {
        (String::new(), String::new())
    } else {
        let commas = top_level_commas(inner);
        if commas.is_empty() {
            let token = unquote(inner);
            if is_identifier(token) {
                (String::new(), token.to_string())
            } else {
                (token.to_string(), String::new())
            }
        } else {
            split_at_var(inner, &commas)?
        }
    };

    Some(InputRequest {
        prompt: if prompt.is_empty() {
            DEFAULT_PROMPT.to_string()
        } else {
            prompt
        },
        var: if var.is_empty() {
            DEFAULT_VAR.to_string()
        } else {
            var
        },
    })
}

/// Splits `prompt, var` at the last comma whose tail is a valid (possibly
/// quoted) identifier or empty. No such comma means the code is not an
/// input request after all.
fn split_at_var(inner: &str, commas: &[usize]) -> Option<(String, String)> {
    for &idx in commas.iter().rev() {
        let tail = unquote(&inner[idx + 1..]);
        if tail.is_empty() || is_identifier(tail) {
            let prompt = unquote(&inner[..idx]);
            return Some((prompt.to_string(), tail.to_string()));
        }
    }
    None
}

/// Byte offsets of commas outside single/double quotes.
fn top_level_commas(s: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                ',' => out.push(i),
                _ => {}
            },
        }
    }
    out
}

/// Strips one matching pair of surrounding quotes, if present.
fn unquote(s: &str) -> &str {
    let s = s.trim();
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && (bytes[0] == b'"' || bytes[0] == b'\'') && bytes[bytes.len() - 1] == bytes[0]
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
