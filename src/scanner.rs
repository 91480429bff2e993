/// A piece of scanned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text emitted verbatim.
    Literal(&'a str),
    /// A complete span, start tag and end tag included.
    Shortcode(&'a str),
}

/// Splits content into literal text and `start ... end` spans.
///
/// A start tag with no end tag after it turns the rest of the input into a
/// single literal and ends the scan.
pub struct Scanner<'a> {
    rest: &'a str,
    start: &'a str,
    end: &'a str,
    pending: Option<&'a str>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, start: &'a str, end: &'a str) -> Self {
        Self {
            rest: input,
            start,
            end,
            pending: None,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(code) = self.pending.take() {
            return Some(Segment::Shortcode(code));
        }
        if self.rest.is_empty() {
            return None;
        }

        let Some(pos) = self.rest.find(self.start) else {
            return Some(Segment::Literal(std::mem::take(&mut self.rest)));
        };

        let (before, from_tag) = self.rest.split_at(pos);
        // The end tag may not overlap the start tag itself.
        let Some(end_pos) = from_tag[self.start.len()..].find(self.end) else {
            return Some(Segment::Literal(std::mem::take(&mut self.rest)));
        };
        let span_len = self.start.len() + end_pos + self.end.len();
        let (code, rest) = from_tag.split_at(span_len);
        self.rest = rest;

        if before.is_empty() {
            Some(Segment::Shortcode(code))
        } else {
            self.pending = Some(code);
            Some(Segment::Literal(before))
        }
    }
}

/// Rebuilds the content, passing every span through `transform`.
pub fn replace_spans<F>(input: &str, start: &str, end: &str, mut transform: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = String::with_capacity(input.len());
    for segment in Scanner::new(input, start, end) {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Shortcode(code) => output.push_str(&transform(code)),
        }
    }
    output
}
