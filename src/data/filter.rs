use std::borrow::Cow;

use super::model::SkipReason;

// ---------------------------------------------------------------------------
// Line rules: which markers turn a line into noise
// ---------------------------------------------------------------------------

/// Something that marks a trimmed line as not being data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMarker {
    /// The line starts with this character.
    Leading(char),
    /// The lowercased line contains this (lowercase) keyword anywhere.
    Contains(Cow<'static, str>),
}

impl LineMarker {
    /// `line` must already be trimmed, `lowered` is its lowercase form.
    fn matches(&self, line: &str, lowered: &str) -> bool {
        match self {
            LineMarker::Leading(c) => line.starts_with(*c),
            LineMarker::Contains(keyword) => lowered.contains(&**keyword),
        }
    }
}

/// Default marker → skip reason table.
///
/// Leading markers come first so a commented header line is reported as a
/// comment rather than a keyword hit.
pub static LINE_RULES: &[(LineMarker, SkipReason)] = &[
    (LineMarker::Leading('#'), SkipReason::Comment),
    (LineMarker::Leading(';'), SkipReason::Comment),
    (LineMarker::Leading('*'), SkipReason::Comment),
    (LineMarker::Leading('!'), SkipReason::Comment),
    (LineMarker::Leading('%'), SkipReason::Comment),
    (LineMarker::Contains(Cow::Borrowed("theta")), SkipReason::HeaderKeyword),
    (LineMarker::Contains(Cow::Borrowed("angle")), SkipReason::HeaderKeyword),
    (LineMarker::Contains(Cow::Borrowed("field")), SkipReason::HeaderKeyword),
    (LineMarker::Contains(Cow::Borrowed("moment")), SkipReason::HeaderKeyword),
    (LineMarker::Contains(Cow::Borrowed("temp")), SkipReason::HeaderKeyword),
    (LineMarker::Contains(Cow::Borrowed("intensity")), SkipReason::HeaderKeyword),
    (LineMarker::Contains(Cow::Borrowed("header")), SkipReason::HeaderKeyword),
    (LineMarker::Contains(Cow::Borrowed("scan")), SkipReason::HeaderKeyword),
];

// ---------------------------------------------------------------------------
// LineFilter
// ---------------------------------------------------------------------------

/// Ordered marker table applied to every trimmed line before tokenising.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    rules: Vec<(LineMarker, SkipReason)>,
}

impl Default for LineFilter {
    fn default() -> Self {
        LineFilter {
            rules: LINE_RULES.to_vec(),
        }
    }
}

impl LineFilter {
    /// Default table extended with extra comment characters and keywords.
    /// Keywords are lowercased so matching stays case-insensitive.
    pub fn with_extra<K>(comment_markers: &[char], keywords: K) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let mut filter = LineFilter::default();
        for &c in comment_markers {
            filter.push(LineMarker::Leading(c), SkipReason::Comment);
        }
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }
            filter.push(LineMarker::Contains(Cow::Owned(keyword)), SkipReason::HeaderKeyword);
        }
        filter
    }

    /// Add a rule unless the same marker is already present.
    pub fn push(&mut self, marker: LineMarker, reason: SkipReason) {
        if self.rules.iter().any(|(m, _)| *m == marker) {
            return;
        }
        self.rules.push((marker, reason));
    }

    pub fn rules(&self) -> &[(LineMarker, SkipReason)] {
        &self.rules
    }

    /// Why `line` (already trimmed, non-empty) is not data, if it is not.
    pub fn skip_reason(&self, line: &str) -> Option<SkipReason> {
        let lowered = line.to_lowercase();
        self.rules
            .iter()
            .find(|(marker, _)| marker.matches(line, &lowered))
            .map(|(_, reason)| *reason)
    }
}
