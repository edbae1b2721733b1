//! Sentence segmentation with byte spans

/// A sentence located within the original narrative
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sentence {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character (terminator included)
    pub end: usize,
}

impl Sentence {
    pub(crate) fn text<'a>(&self, narrative: &'a str) -> &'a str {
        &narrative[self.start..self.end]
    }
}

/// Split a narrative into sentences.
///
/// A sentence ends at '.', '!' or '?' (the terminator is part of the
/// sentence) or at a paragraph break. Whitespace between sentences belongs to
/// neither. Abbreviation handling is deliberately minimal: the classifier is
/// density-based and tolerates occasional over-splitting.
pub(crate) fn sentences(narrative: &str) -> Vec<Sentence> {
    let mut result = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev_newline = false;

    for (idx, ch) in narrative.char_indices() {
        if ch.is_whitespace() {
            // Blank line terminates the current sentence
            if ch == '\n' {
                if prev_newline {
                    if let Some(s) = start.take() {
                        push_trimmed(narrative, s, idx, &mut result);
                    }
                }
                prev_newline = true;
            }
            continue;
        }
        prev_newline = false;

        if start.is_none() {
            start = Some(idx);
        }

        if matches!(ch, '.' | '!' | '?') {
            if let Some(s) = start.take() {
                let end = idx + ch.len_utf8();
                push_trimmed(narrative, s, end, &mut result);
            }
        }
    }

    if let Some(s) = start {
        push_trimmed(narrative, s, narrative.len(), &mut result);
    }

    result
}

fn push_trimmed(narrative: &str, start: usize, end: usize, out: &mut Vec<Sentence>) {
    let raw = &narrative[start..end];
    let trimmed = raw.trim_end();
    if trimmed.is_empty() {
        return;
    }
    out.push(Sentence {
        start,
        end: start + trimmed.len(),
    });
}
