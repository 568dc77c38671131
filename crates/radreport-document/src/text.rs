// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Summary text preparation — sentence capitalisation, word wrapping, and the
// encodability check for the built-in PDF fonts.

use radreport_core::error::{ReportError, Result};

/// Literal sentence delimiter. Periods not followed by exactly one space
/// (abbreviations at line end, decimals) are not boundaries.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Uppercase the first character of every `". "`-delimited fragment.
///
/// The rest of each fragment is left untouched: this is not sentence-case
/// conversion, and `"no acute CXR findings"` keeps its acronym rather than
/// becoming `"No acute cxr findings"`. The function is idempotent.
pub fn capitalize_sentences(text: &str) -> String {
    text.split(SENTENCE_DELIMITER)
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(SENTENCE_DELIMITER)
}

fn capitalize_first(fragment: &str) -> String {
    let mut chars = fragment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Greedy word wrap to at most `max_width` characters per line.
///
/// Any run of whitespace (newlines included) separates words. Words longer
/// than `max_width` are force-broken. Width is counted in characters, not
/// rendered glyph width.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_width {
            if !current_line.is_empty() {
                result.push(std::mem::take(&mut current_line));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(max_width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    result.push(piece);
                } else {
                    current_len = chunk.len();
                    current_line = piece;
                }
            }
        } else if current_line.is_empty() {
            current_line.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            result.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        result.push(current_line);
    }

    result
}

/// Fail if `text` holds a character the base-14 fonts cannot show.
///
/// Built-in fonts are written with WinAnsiEncoding (Windows-1252). Rather than
/// let unsupported characters vanish from the page, the whole render fails.
pub fn ensure_encodable(text: &str) -> Result<()> {
    match text.chars().find(|c| win_ansi_byte(*c).is_none()) {
        None => Ok(()),
        Some(bad) => Err(unencodable(bad)),
    }
}

/// Encode `text` as Windows-1252 bytes for a built-in font string operand.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| win_ansi_byte(c).ok_or_else(|| unencodable(c)))
        .collect()
}

/// Decode a Windows-1252 string operand. Bytes with no assigned character
/// map to U+FFFD.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => WIN_ANSI_HIGH[usize::from(b - 0x80)].unwrap_or('\u{FFFD}'),
            _ => char::from(b),
        })
        .collect()
}

fn unencodable(c: char) -> ReportError {
    ReportError::Render(format!(
        "character {:?} (U+{:04X}) cannot be encoded with the built-in fonts",
        c, c as u32
    ))
}

/// Windows-1252 assignments for 0x80..=0x9F. Unassigned slots are `None`.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
    Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
    None, Some('‘'), Some('’'), Some('“'), Some('”'), Some('•'), Some('–'), Some('—'),
    Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
];

fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => u8::try_from(u32::from(c)).ok(),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|slot| *slot == Some(c))
            .and_then(|i| u8::try_from(0x80 + i).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_sentence() {
        assert_eq!(
            capitalize_sentences("the lungs are clear. no effusion noted."),
            "The lungs are clear. No effusion noted."
        );
    }

    #[test]
    fn capitalization_is_idempotent() {
        let inputs = [
            "the lungs are clear. no effusion noted.",
            "Heart size normal. AP view only. ",
            "dr. smith reviewed. value 2.5 cm.",
            "",
            ". . .",
        ];
        for input in inputs {
            let once = capitalize_sentences(input);
            assert_eq!(capitalize_sentences(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn capitalization_leaves_rest_of_fragment_alone() {
        assert_eq!(capitalize_sentences("no acute CXR findings"), "No acute CXR findings");
    }

    #[test]
    fn delimiter_requires_single_space() {
        // "clear.no" and "clear.\nno" are not sentence boundaries.
        assert_eq!(capitalize_sentences("clear.no effusion"), "Clear.no effusion");
        assert_eq!(capitalize_sentences("clear.\nno effusion"), "Clear.\nno effusion");
    }

    #[test]
    fn wrap_respects_width() {
        let text = "the cardiomediastinal silhouette is within normal limits for size and contour. \
                    the lungs are normally inflated without evidence of focal airspace disease, \
                    pleural effusion, or pneumothorax. stable calcified granuloma in the right upper lobe.";
        let lines = wrap_text(text, 90);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 90, "too long: {line:?}");
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn wrap_is_greedy() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn wrap_collapses_newlines() {
        assert_eq!(wrap_text("one\ntwo\n\nthree\n", 90), vec!["one two three"]);
    }

    #[test]
    fn wrap_breaks_oversized_words() {
        let word = "x".repeat(25);
        let lines = wrap_text(&format!("ab {word} cd"), 10);
        assert_eq!(lines, vec!["ab", "xxxxxxxxxx", "xxxxxxxxxx", "xxxxx cd"]);
    }

    #[test]
    fn wrap_counts_characters_not_bytes() {
        let lines = wrap_text("éééé éééé", 9);
        assert_eq!(lines, vec!["éééé éééé"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_text("  \n ", 90).is_empty());
    }

    #[test]
    fn latin_text_is_encodable() {
        assert!(ensure_encodable("Patient Name: José Müller – “clear”").is_ok());
    }

    #[test]
    fn cjk_text_is_rejected() {
        let err = ensure_encodable("肺野清晰").unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn encodes_latin_and_typographic_characters_as_single_bytes() {
        assert_eq!(encode_win_ansi("José").unwrap(), b"Jos\xE9");
        assert_eq!(
            encode_win_ansi("– “x” …").unwrap(),
            vec![0x96, b' ', 0x93, b'x', 0x94, b' ', 0x85]
        );
        assert_eq!(encode_win_ansi("€").unwrap(), vec![0x80]);
    }

    #[test]
    fn win_ansi_decoding_inverts_encoding() {
        let text = "Patient Name: José Müller – “clear” … €";
        assert_eq!(decode_win_ansi(&encode_win_ansi(text).unwrap()), text);
        assert_eq!(decode_win_ansi(&[0x81]), "\u{FFFD}");
    }

    #[test]
    fn encoding_rejects_what_the_check_rejects() {
        assert!(matches!(encode_win_ansi("肺"), Err(ReportError::Render(_))));
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(ensure_encodable("tab\there").is_err());
    }
}
