//! Length limiting that prefers paragraph and sentence boundaries

const ELLIPSIS: &str = "...";
const PARAGRAPH_ELLIPSIS: &str = "\n\n...";
const SENTENCE_ELLIPSIS: &str = " ...";

/// Shorten `text` to at most `limit` characters.
///
/// The cut lands on the last paragraph break, or failing that the last
/// sentence end, provided it sits in the second half of the kept text.
/// Otherwise the text is cut hard. Lengths count `char`s, not bytes.
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.len());
    let candidate = match text.char_indices().nth(keep) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    };
    let midpoint = keep / 2;
    let char_pos = |byte_idx: usize| candidate[..byte_idx].chars().count();

    if let Some(idx) = candidate.rfind("\n\n") {
        if char_pos(idx) >= midpoint {
            return format!("{}{}", &candidate[..idx], PARAGRAPH_ELLIPSIS);
        }
    }

    if let Some(idx) = candidate.rfind(". ") {
        if char_pos(idx) >= midpoint {
            return format!("{}{}", &candidate[..=idx], SENTENCE_ELLIPSIS);
        }
    }

    format!("{}{}", candidate, ELLIPSIS)
}
