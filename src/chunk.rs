/// Discord rejects messages longer than this many characters.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Split `text` into pieces of at most `max_len` characters, preferring
/// to cut at whitespace so words stay intact.
///
/// Each window is cut at its last whitespace character (the whitespace
/// itself is dropped by the per-piece trim); a window with no usable
/// whitespace is hard-cut at `max_len`, which also guarantees the
/// cursor advances every iteration. Lengths are measured in characters,
/// not bytes, so a hard cut never lands inside a UTF-8 sequence.
pub fn split_chunks(text: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = start + max_len;
        if end >= chars.len() {
            let tail: String = chars[start..].iter().collect();
            let tail = tail.trim();
            if !tail.is_empty() {
                chunks.push(tail.to_string());
            }
            break;
        }

        // Whitespace at window position 0 would yield an empty piece and
        // a stuck cursor, so it doesn't count as a cut point.
        let cut = chars[start..end]
            .iter()
            .rposition(|c| c.is_whitespace())
            .filter(|&i| i > 0)
            .map(|i| start + i)
            .unwrap_or(end);

        let piece: String = chars[start..cut].iter().collect();
        let piece = piece.trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }
        start = cut;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_passes_through() {
        assert_eq!(split_chunks("hello world", 100), vec!["hello world"]);
        assert_eq!(split_chunks("", 10), vec![""]);
    }

    #[test]
    fn test_exact_fit_is_single_piece() {
        assert_eq!(split_chunks("abcde", 5), vec!["abcde"]);
    }

    #[test]
    fn test_cuts_at_whitespace() {
        let chunks = split_chunks("alpha beta gamma delta", 12);
        assert_eq!(chunks, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_no_piece_exceeds_max() {
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        for max in [5, 17, 64, 200] {
            for piece in split_chunks(&text, max) {
                assert!(piece.chars().count() <= max, "piece over {}: {:?}", max, piece);
                assert!(!piece.is_empty());
            }
        }
    }

    #[test]
    fn test_no_words_dropped() {
        let text = "one two three four five six seven eight nine ten ".repeat(20);
        let chunks = split_chunks(&text, 23);
        let rejoined: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.split_whitespace())
            .collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn test_hard_cut_without_whitespace() {
        let text = "a".repeat(25);
        let chunks = split_chunks(&text, 10);
        assert_eq!(chunks, vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]);
    }

    #[test]
    fn test_window_with_only_leading_whitespace_advances() {
        // After a cut the cursor sits on the whitespace; if the rest of
        // the window has none, the hard-cut branch must still advance.
        let text = format!("word {}", "x".repeat(30));
        let chunks = split_chunks(&text, 6);
        assert!(!chunks.iter().any(|c| c.is_empty()));
        let rejoined: String = chunks.concat();
        assert_eq!(rejoined.matches('x').count(), 30);
    }

    #[test]
    fn test_multibyte_hard_cut() {
        let text = "日本語のテキスト".repeat(10);
        let chunks = split_chunks(&text, 7);
        for piece in &chunks {
            assert!(piece.chars().count() <= 7);
        }
        assert_eq!(chunks.concat(), text);
    }
}
