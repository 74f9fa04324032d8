//! Recursive character splitting for document ingestion.

use crate::error::StoreError;
use crate::store::TextSegment;

/// Split text into segments of at most `max_chars` characters with
/// roughly `overlap` characters of word-aligned overlap between
/// neighbors. The overlap tail is trimmed away when the next word
/// would not fit beside it.
///
/// Splitting never breaks inside a word unless a single word exceeds
/// `max_chars`, in which case that word is hard-split.
///
/// Fails with [`StoreError::InvalidSplitParams`] when `max_chars` is
/// zero or `overlap` is not below `max_chars`.
pub fn split_recursive(
    text: &str,
    max_chars: usize,
    overlap: usize,
) -> Result<Vec<TextSegment>, StoreError> {
    if max_chars == 0 || overlap >= max_chars {
        return Err(StoreError::InvalidSplitParams { max_chars, overlap });
    }

    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            flush(&mut segments, &mut current, &mut current_len, overlap);
            hard_split(word, max_chars, &mut segments);
            continue;
        }
        if current_len + word_len + usize::from(current_len > 0) > max_chars {
            flush(&mut segments, &mut current, &mut current_len, overlap);
            // The seeded tail may still crowd out the incoming word.
            while !current.is_empty()
                && current_len + word_len + usize::from(current_len > 0) > max_chars
            {
                let dropped = current.remove(0);
                current_len -= dropped.chars().count();
                if !current.is_empty() {
                    current_len -= 1;
                }
            }
        }
        current_len += word_len + usize::from(current_len > 0);
        current.push(word);
    }
    if !current.is_empty() {
        segments.push(TextSegment::new(current.join(" ")));
    }
    Ok(segments)
}

/// Push the current chunk and seed the next one with its overlap tail.
fn flush<'a>(
    segments: &mut Vec<TextSegment>,
    current: &mut Vec<&'a str>,
    current_len: &mut usize,
    overlap: usize,
) {
    if current.is_empty() {
        return;
    }
    segments.push(TextSegment::new(current.join(" ")));

    let mut tail: Vec<&str> = Vec::new();
    let mut tail_len = 0usize;
    for word in current.iter().rev() {
        let extra = word.chars().count() + usize::from(tail_len > 0);
        if tail_len + extra > overlap {
            break;
        }
        tail_len += extra;
        tail.push(word);
    }
    tail.reverse();
    *current = tail;
    *current_len = tail_len;
}

fn hard_split(word: &str, max_chars: usize, segments: &mut Vec<TextSegment>) {
    let chars: Vec<char> = word.chars().collect();
    for chunk in chars.chunks(max_chars) {
        segments.push(TextSegment::new(chunk.iter().collect::<String>()));
    }
}

#[cfg(test)]
mod tests {
    use super::split_recursive;
    use crate::error::StoreError;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_one_segment() {
        let segments = split_recursive("hello world", 100, 20).expect("segments");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "hello world");
    }

    #[test]
    fn segments_respect_the_size_bound() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let segments = split_recursive(text, 20, 5).expect("segments");
        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(segment.text.chars().count() <= 20, "{}", segment.text);
        }
    }

    #[test]
    fn neighbors_share_an_overlap_tail() {
        let text = "one two three four five six seven eight";
        let segments = split_recursive(text, 18, 6).expect("segments");
        let first_tail = segments[0].text.split(' ').next_back().expect("word");
        assert!(segments[1].text.starts_with(first_tail));
    }

    #[test]
    fn overlap_tail_yields_to_an_incoming_word() {
        let segments = split_recursive("abcdefgh ijklmnop", 10, 8).expect("segments");
        for segment in &segments {
            assert!(segment.text.chars().count() <= 10, "{}", segment.text);
        }
        assert_eq!(segments[0].text, "abcdefgh");
        assert_eq!(segments[1].text, "ijklmnop");
    }

    #[test]
    fn oversized_words_are_hard_split() {
        let segments = split_recursive("abcdefghij", 4, 1).expect("segments");
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "abcdefghij");
        assert!(segments.iter().all(|s| s.text.len() <= 4));
    }

    #[test]
    fn inconsistent_parameters_are_rejected() {
        assert!(matches!(
            split_recursive("hello", 0, 0),
            Err(StoreError::InvalidSplitParams { .. })
        ));
        assert!(matches!(
            split_recursive("hello", 10, 10),
            Err(StoreError::InvalidSplitParams { .. })
        ));
    }
}
