//! Scalar encoding: plain, double-quoted or block-literal text.
//!
//! The quoting rules are deliberately wider than the YAML 1.2 core schema:
//! anything a 1.1 or 1.2 parser could read as a non-string, and anything
//! starting with an indicator character, is quoted.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::node::Scalar;

/// Numeric-looking text under either YAML 1.1 or 1.2 resolution.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[-+]?(?:0b[01_]+|0o[0-7_]+|0x[0-9a-fA-F_]+|(?:\.[0-9][0-9_]*|[0-9][0-9_]*(?:\.[0-9_]*)?)(?:[eE][-+]?[0-9]+)?|[0-9][0-9_]*(?::[0-5]?[0-9])+(?:\.[0-9_]*)?|\.(?:inf|Inf|INF|nan|NaN|NAN))$",
    )
    .expect("number pattern is valid")
});

/// Words every YAML version resolves to null or a boolean.
const CORE_WORDS: &[&str] = &["~", "null", "true", "false"];

/// Words only YAML 1.1 resolves to booleans.
const LEGACY_BOOL_WORDS: &[&str] = &["yes", "no", "on", "off", "y", "n"];

/// Characters that may not start a plain scalar.
const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

/// Where an encoded string ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Key,
    Value,
}

/// An encoded scalar, ready to be placed after a key or list marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Encoded {
    /// Single-line text that goes on the current line.
    Inline(String),
    /// A block header (`|`, `|-` or `|+`) on the current line, followed by raw
    /// content lines that the caller indents one level deeper.
    Block { header: &'static str, lines: Vec<String> },
}

/// Encode a scalar in value position.
pub(crate) fn encode_value(scalar: &Scalar) -> Encoded {
    match scalar {
        Scalar::Null => Encoded::Inline("null".to_string()),
        Scalar::Bool(value) => Encoded::Inline(value.to_string()),
        Scalar::Int(value) => Encoded::Inline(value.to_string()),
        Scalar::Float(value) => Encoded::Inline(format_float(*value)),
        Scalar::Str(text) => encode_str(text),
    }
}

/// Encode a mapping key. Keys never use block form.
pub(crate) fn encode_key(key: &str) -> String {
    if needs_quotes(key, Position::Key) {
        double_quote(key)
    } else {
        key.to_string()
    }
}

fn encode_str(text: &str) -> Encoded {
    if text.contains('\n') {
        if let Some(block) = block_literal(text) {
            return block;
        }
        trace!("Multi-line string cannot use block form, quoting");
        return Encoded::Inline(double_quote(text));
    }
    if needs_quotes(text, Position::Value) {
        Encoded::Inline(double_quote(text))
    } else {
        Encoded::Inline(text.to_string())
    }
}

/// Block-literal form, when it can reproduce `text` exactly without
/// trailing whitespace or an indentation indicator.
fn block_literal(text: &str) -> Option<Encoded> {
    let body = text.trim_end_matches('\n');
    let trailing = text.len() - body.len();
    let header = match trailing {
        0 => "|-",
        1 => "|",
        _ => "|+",
    };

    let mut lines: Vec<&str> = body.split('\n').collect();
    let first_content = lines.iter().find(|line| !line.is_empty())?;
    if first_content.starts_with([' ', '\t']) {
        return None;
    }
    let representable = lines.iter().all(|line| {
        !line.starts_with('\t')
            && !line.ends_with([' ', '\t'])
            && line.chars().all(|c| c == '\t' || is_printable(c))
    });
    if !representable {
        return None;
    }

    // Kept line breaks beyond the first become empty content lines.
    lines.extend(std::iter::repeat("").take(trailing.saturating_sub(1)));
    Some(Encoded::Block {
        header,
        lines: lines.into_iter().map(str::to_string).collect(),
    })
}

fn needs_quotes(text: &str, position: Position) -> bool {
    let (first, last) = match (text.chars().next(), text.chars().last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return true,
    };

    if first.is_whitespace() || last.is_whitespace() || last == ':' {
        return true;
    }
    if INDICATORS.contains(&first) || text.starts_with("...") || text.starts_with("<<") {
        return true;
    }
    if text.contains(": ") || text.contains(" #") || text.contains('\t') {
        return true;
    }
    if !text.chars().all(is_printable) {
        return true;
    }

    let lowered = text.to_lowercase();
    if CORE_WORDS.contains(&lowered.as_str()) {
        return true;
    }
    // `on` is the trigger key of every workflow and stays plain there.
    if LEGACY_BOOL_WORDS.contains(&lowered.as_str()) && !(position == Position::Key && text == "on") {
        return true;
    }
    NUMBER_PATTERN.is_match(text)
}

/// Characters YAML allows unescaped, minus the ones some parsers treat as
/// line breaks or byte order marks.
fn is_printable(c: char) -> bool {
    matches!(c,
        '\u{20}'..='\u{7E}'
        | '\u{A0}'..='\u{2027}'
        | '\u{202A}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FEFE}'
        | '\u{FF00}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn double_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if is_printable(c) => out.push(c),
            c => escape_char(&mut out, c),
        }
    }
    out.push('"');
    out
}

/// Text for one header comment line. Characters a parser could read as a
/// line break, or that are not printable, are written as escapes.
pub(crate) fn comment_text(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        if c == '\t' || is_printable(c) {
            out.push(c);
        } else {
            escape_char(&mut out, c);
        }
    }
    out
}

fn escape_char(out: &mut String, c: char) {
    let code = c as u32;
    if code <= 0xFF {
        let _ = write!(out, "\\x{:02X}", code);
    } else if code <= 0xFFFF {
        let _ = write!(out, "\\u{:04X}", code);
    } else {
        let _ = write!(out, "\\U{:08X}", code);
    }
}

/// Shortest round-trip form that a YAML parser still reads as a float.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        ".nan".to_string()
    } else if value == f64::INFINITY {
        ".inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        // Debug output may use a bare exponent (`1e20`); YAML 1.1 wants a
        // `.` in the mantissa and a signed exponent.
        let text = format!("{:?}", value);
        match text.split_once('e') {
            Some((mantissa, exponent)) => {
                let dot = if mantissa.contains('.') { "" } else { ".0" };
                let sign = if exponent.starts_with('-') { "" } else { "+" };
                format!("{}{}e{}{}", mantissa, dot, sign, exponent)
            }
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(scalar: Scalar) -> String {
        match encode_value(&scalar) {
            Encoded::Inline(text) => text,
            other => panic!("expected inline, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_strings() {
        for text in ["macos-latest", "Simple Workflow", "Echoing!", "echo \"Hello World!\"", "read", "a:b", "v1.2.3", "3rd-party", "${{ matrix.os }}"] {
            assert_eq!(inline(text.into()), text, "{} should stay plain", text);
        }
    }

    #[test]
    fn test_ambiguous_strings_are_quoted() {
        assert_eq!(inline("true".into()), "\"true\"");
        assert_eq!(inline("False".into()), "\"False\"");
        assert_eq!(inline("null".into()), "\"null\"");
        assert_eq!(inline("~".into()), "\"~\"");
        assert_eq!(inline("yes".into()), "\"yes\"");
        assert_eq!(inline("off".into()), "\"off\"");
        assert_eq!(inline("".into()), "\"\"");
        assert_eq!(inline("1".into()), "\"1\"");
        assert_eq!(inline("-12".into()), "\"-12\"");
        assert_eq!(inline("3.10".into()), "\"3.10\"");
        assert_eq!(inline("1e5".into()), "\"1e5\"");
        assert_eq!(inline("0x1F".into()), "\"0x1F\"");
        assert_eq!(inline("1_000".into()), "\"1_000\"");
        assert_eq!(inline("12:30".into()), "\"12:30\"");
        assert_eq!(inline(".inf".into()), "\".inf\"");
    }

    #[test]
    fn test_structural_strings_are_quoted() {
        assert_eq!(inline("key: value".into()), "\"key: value\"");
        assert_eq!(inline("ends:".into()), "\"ends:\"");
        assert_eq!(inline("a #comment".into()), "\"a #comment\"");
        assert_eq!(inline(" padded".into()), "\" padded\"");
        assert_eq!(inline("padded ".into()), "\"padded \"");
        assert_eq!(inline("*alias".into()), "\"*alias\"");
        assert_eq!(inline("&anchor".into()), "\"&anchor\"");
        assert_eq!(inline("@user".into()), "\"@user\"");
        assert_eq!(inline("- item".into()), "\"- item\"");
        assert_eq!(inline("'single'".into()), "\"'single'\"");
        assert_eq!(inline("\"double\"".into()), "\"\\\"double\\\"\"");
        assert_eq!(inline("...".into()), "\"...\"");
        assert_eq!(inline("<<".into()), "\"<<\"");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(inline("tab\there".into()), "\"tab\\there\"");
        assert_eq!(inline("back\\slash #x".into()), "\"back\\\\slash #x\"");
        assert_eq!(inline("bell\u{7}".into()), "\"bell\\x07\"");
        assert_eq!(inline("\u{FEFF}bom".into()), "\"\\uFEFFbom\"");
    }

    #[test]
    fn test_non_strings() {
        assert_eq!(inline(Scalar::Bool(true)), "true");
        assert_eq!(inline(Scalar::Int(-42)), "-42");
        assert_eq!(inline(Scalar::Null), "null");
        assert_eq!(inline(Scalar::Float(1.0)), "1.0");
        assert_eq!(inline(Scalar::Float(3.1)), "3.1");
        assert_eq!(inline(Scalar::Float(1e20)), "1.0e+20");
        assert_eq!(inline(Scalar::Float(-2.5e-7)), "-2.5e-7");
        assert_eq!(inline(Scalar::Float(1e-7)), "1.0e-7");
        assert_eq!(inline(Scalar::Float(f64::INFINITY)), ".inf");
        assert_eq!(inline(Scalar::Float(f64::NEG_INFINITY)), "-.inf");
        assert_eq!(inline(Scalar::Float(f64::NAN)), ".nan");
    }

    #[test]
    fn test_block_literal_chomping() {
        assert_eq!(
            encode_value(&"echo \"Hello World!\"\n".into()),
            Encoded::Block {
                header: "|",
                lines: vec!["echo \"Hello World!\"".to_string()],
            }
        );
        assert_eq!(
            encode_value(&"a\n\nb".into()),
            Encoded::Block {
                header: "|-",
                lines: vec!["a".to_string(), String::new(), "b".to_string()],
            }
        );
        assert_eq!(
            encode_value(&"a\n\n\n".into()),
            Encoded::Block {
                header: "|+",
                lines: vec!["a".to_string(), String::new(), String::new()],
            }
        );
    }

    #[test]
    fn test_block_literal_fallbacks() {
        assert_eq!(inline("  indented\nx".into()), "\"  indented\\nx\"");
        assert_eq!(inline("trailing \nx".into()), "\"trailing \\nx\"");
        assert_eq!(inline("\n".into()), "\"\\n\"");
        assert_eq!(inline("\n\n".into()), "\"\\n\\n\"");
        assert_eq!(inline("cr\r\nlf".into()), "\"cr\\r\\nlf\"");
    }

    #[test]
    fn test_keys() {
        assert_eq!(encode_key("on"), "on");
        assert_eq!(encode_key("On"), "\"On\"");
        assert_eq!(encode_key("yes"), "\"yes\"");
        assert_eq!(encode_key("n"), "\"n\"");
        assert_eq!(encode_key("off"), "\"off\"");
        assert_eq!(encode_key("runs-on"), "runs-on");
        assert_eq!(encode_key("true"), "\"true\"");
        assert_eq!(encode_key("8080"), "\"8080\"");
        assert_eq!(encode_key(""), "\"\"");
        assert_eq!(encode_key("multi\nline"), "\"multi\\nline\"");
    }
}
