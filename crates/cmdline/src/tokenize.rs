use crate::error::{Error, Result};

/// Split a command line into argv-like tokens.
///
/// Tokens are separated by unquoted spaces; runs of spaces do not produce
/// empty tokens. `"` toggles quoting and is dropped, `\` makes the next
/// character literal and is dropped. `""` yields an empty token.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    // A quote or escape starts a token even if nothing is pushed into `buf`.
    let mut started = false;
    let mut in_quote = false;

    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quote = !in_quote;
                started = true;
            }
            ' ' if !in_quote => {
                if started {
                    tokens.push(std::mem::take(&mut buf));
                    started = false;
                }
            }
            '\\' => {
                let escaped = chars.next().ok_or(Error::UnterminatedEscape)?;
                buf.push(escaped);
                started = true;
            }
            _ => {
                buf.push(c);
                started = true;
            }
        }
    }

    if in_quote {
        return Err(Error::UnterminatedQuote);
    }
    if started {
        tokens.push(buf);
    }
    Ok(tokens)
}
