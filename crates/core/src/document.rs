//! The preview's editable content: plain text runs and styled spans.

use std::ops::Range;

/// Text wrapped with explicit feature and variation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub feature_settings: String,
    pub variation_settings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Span(StyledSpan),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Span(span) => &span.text,
        }
    }

    fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    /// The same segment restricted to chars `range`.
    fn slice(&self, range: Range<usize>) -> Segment {
        let text = char_slice(self.text(), range);
        match self {
            Segment::Text(_) => Segment::Text(text),
            Segment::Span(span) => Segment::Span(StyledSpan { text, ..span.clone() }),
        }
    }
}

fn char_slice(s: &str, range: Range<usize>) -> String {
    s.chars().skip(range.start).take(range.len()).collect()
}

/// Preview content plus an optional selection over its plain text.
///
/// Selection offsets count characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewDocument {
    segments: Vec<Segment>,
    selection: Option<Range<usize>>,
}

impl PreviewDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let mut doc = Self::default();
        doc.set_text(text);
        doc
    }

    /// Replace all content with plain text and drop the selection.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.segments = if text.is_empty() { Vec::new() } else { vec![Segment::Text(text)] };
        self.selection = None;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn plain_text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    pub fn char_len(&self) -> usize {
        self.segments.iter().map(Segment::char_len).sum()
    }

    /// Select chars `range`. Returns `false` and keeps the old selection if it
    /// falls outside the text.
    pub fn select(&mut self, range: Range<usize>) -> bool {
        if range.start > range.end || range.end > self.char_len() {
            return false;
        }
        self.selection = Some(range);
        true
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The selected text, or `None` when nothing or only an empty range is selected.
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection.clone().filter(|r| !r.is_empty())?;
        Some(char_slice(&self.plain_text(), range))
    }

    /// Replace the selected text with a span built from it and clear the selection.
    ///
    /// Segments partly covered by the selection keep their own styling outside of
    /// it; styling inside the selection is replaced by the new span. Returns
    /// `false` without changes when the selection is empty.
    pub fn wrap_selection(
        &mut self,
        feature_settings: String,
        variation_settings: Option<String>,
    ) -> bool {
        let Some(text) = self.selected_text() else {
            return false;
        };
        let Some(Range { start, end }) = self.selection.take() else {
            return false;
        };

        let mut span =
            Some(Segment::Span(StyledSpan { text, feature_settings, variation_settings }));
        let mut out = Vec::with_capacity(self.segments.len() + 2);
        let mut pos = 0;
        for segment in self.segments.drain(..) {
            let len = segment.char_len();
            let (seg_start, seg_end) = (pos, pos + len);
            pos = seg_end;

            if seg_end <= start || seg_start >= end {
                if seg_start >= end
                    && let Some(span) = span.take()
                {
                    out.push(span);
                }
                out.push(segment);
                continue;
            }

            let local_start = start.saturating_sub(seg_start);
            let local_end = (end - seg_start).min(len);
            if local_start > 0 {
                out.push(segment.slice(0..local_start));
            }
            if let Some(span) = span.take() {
                out.push(span);
            }
            if local_end < len {
                out.push(segment.slice(local_end..len));
            }
        }
        out.extend(span);

        self.segments = merge_text_runs(out);
        true
    }

    /// Render as HTML with styled spans.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => html.push_str(&escape(text)),
                Segment::Span(span) => {
                    let mut style = format!("font-feature-settings: {};", span.feature_settings);
                    if let Some(variation) = &span.variation_settings {
                        style.push_str(&format!(" font-variation-settings: {variation};"));
                    }
                    html.push_str(&format!(
                        "<span style=\"{}\">{}</span>",
                        escape(&style),
                        escape(&span.text)
                    ));
                }
            }
        }
        html
    }
}

fn merge_text_runs(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.text().is_empty() {
            continue;
        }
        match (merged.last_mut(), segment) {
            (Some(Segment::Text(prev)), Segment::Text(next)) => prev.push_str(&next),
            (_, segment) => merged.push(segment),
        }
    }
    merged
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liga() -> String {
        r#""liga" 1"#.to_string()
    }

    #[test]
    fn wrap_middle_of_text() {
        let mut doc = PreviewDocument::new("hello world");
        assert!(doc.select(6..11));
        assert!(doc.wrap_selection(liga(), None));
        assert_eq!(doc.segments().len(), 2);
        assert_eq!(doc.segments()[0], Segment::Text("hello ".into()));
        assert_eq!(doc.segments()[1].text(), "world");
        assert_eq!(doc.plain_text(), "hello world");
        assert!(doc.selection().is_none());
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        let mut doc = PreviewDocument::new("مرحبا بالعالم");
        assert!(doc.select(0..5));
        assert_eq!(doc.selected_text().as_deref(), Some("مرحبا"));
        assert!(doc.wrap_selection(liga(), None));
        assert_eq!(doc.plain_text(), "مرحبا بالعالم");
    }

    #[test]
    fn wrap_across_existing_span_flattens_inside_selection() {
        let mut doc = PreviewDocument::new("abcdef");
        doc.select(2..4);
        doc.wrap_selection(liga(), None);
        doc.select(1..3);
        doc.wrap_selection(r#""kern" 1"#.into(), None);

        let texts: Vec<_> = doc.segments().iter().map(Segment::text).collect();
        assert_eq!(texts, vec!["a", "bc", "d", "ef"]);
        let Segment::Span(outer) = &doc.segments()[1] else { panic!("expected span") };
        assert_eq!(outer.feature_settings, r#""kern" 1"#);
        let Segment::Span(rest) = &doc.segments()[2] else { panic!("expected span") };
        assert_eq!(rest.feature_settings, r#""liga" 1"#);
    }

    #[test]
    fn rewrapping_same_range_is_idempotent() {
        let mut doc = PreviewDocument::new("abcdef");
        doc.select(1..4);
        doc.wrap_selection(liga(), Some(r#""wght" 700"#.into()));
        let once = doc.clone();
        doc.select(1..4);
        doc.wrap_selection(liga(), Some(r#""wght" 700"#.into()));
        assert_eq!(doc, once);
    }

    #[test]
    fn empty_selection_is_not_wrapped() {
        let mut doc = PreviewDocument::new("abc");
        doc.select(1..1);
        assert_eq!(doc.selected_text(), None);
        assert!(!doc.wrap_selection(liga(), None));
        assert_eq!(doc.segments().len(), 1);
    }

    #[test]
    fn out_of_range_selection_is_refused() {
        let mut doc = PreviewDocument::new("abc");
        assert!(doc.select(0..2));
        assert!(!doc.select(1..9));
        assert_eq!(doc.selection(), Some(0..2));
    }

    #[test]
    fn html_escapes_and_styles() {
        let mut doc = PreviewDocument::new("a<b>c");
        doc.select(4..5);
        doc.wrap_selection(liga(), Some(r#""wght" 700"#.into()));
        assert_eq!(
            doc.to_html(),
            "a&lt;b&gt;<span style=\"font-feature-settings: &quot;liga&quot; 1; \
             font-variation-settings: &quot;wght&quot; 700;\">c</span>"
        );
    }
}
