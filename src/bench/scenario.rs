use crate::types::PatternKind;

/// One (text, pattern) pairing to time every matcher on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Index into the corpus list this scenario searches.
    pub corpus: usize,
    pub text_name: String,
    pub kind: PatternKind,
    pub pattern: Vec<u8>,
}

impl Scenario {
    /// `text/Pattern Type`, used in logs and error messages.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.text_name, self.kind.label())
    }
}

/// Slice of `text` to use as a pattern that is guaranteed to occur.
///
/// Normally `text[start..end]`, cut short at the end of the text. Texts no
/// longer than `start` fall back to their second half so short inputs still
/// get an existing-pattern scenario. Empty texts get none.
///
/// The window is cut from each text separately, so two texts in one run are
/// searched for different existing patterns.
#[must_use]
pub fn existing_window(text: &[u8], window: (usize, usize)) -> Option<&[u8]> {
    let (start, end) = window;
    let len = text.len();
    if len == 0 {
        None
    } else if len > start {
        Some(&text[start..end.min(len)])
    } else {
        Some(&text[len / 2..])
    }
}

/// Existing and missing scenarios for one text, in that order.
#[must_use]
pub fn scenarios_for(
    corpus: usize,
    text_name: &str,
    text: &[u8],
    window: (usize, usize),
    missing: &str,
) -> Vec<Scenario> {
    let mut out = Vec::with_capacity(2);
    if let Some(pattern) = existing_window(text, window) {
        out.push(Scenario {
            corpus,
            text_name: text_name.to_string(),
            kind: PatternKind::Existing,
            pattern: pattern.to_vec(),
        });
    }
    out.push(Scenario {
        corpus,
        text_name: text_name.to_string(),
        kind: PatternKind::Missing,
        pattern: missing.as_bytes().to_vec(),
    });
    out
}
