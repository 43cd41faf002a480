use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use super::{SpanRef, TokenLine};

/// Included annotation: an inclusive token range with its label.
struct IncludedSpan {
    span: SpanRef,
    label: String,
}

/// Renders a [`TokenLine`] with underlined annotations, one per row.
///
/// ```text
/// проживает  в  Московской  области
///               ╰────────╯Terr(ОБЛАСТЬ)
/// ```
///
/// Tokens are separated by their original whitespace (at least one space);
/// a newline boundary is drawn as ` ↵ `.
pub struct TokenLineDisplay<'a> {
    line: &'a TokenLine,
    include: Vec<IncludedSpan>,
}

impl<'a> TokenLineDisplay<'a> {
    pub fn new(line: &'a TokenLine) -> Self {
        Self {
            line,
            include: Vec::new(),
        }
    }

    /// Add an arbitrary labelled span.
    pub fn include_span(&mut self, span: SpanRef, label: impl Into<String>) -> &mut Self {
        if span.end_idx < self.line.len() {
            self.include.push(IncludedSpan {
                span,
                label: label.into(),
            });
        }
        self
    }

    /// Add every attached tag, underlining the item it describes.
    pub fn include_tags(&mut self) -> &mut Self {
        for (idx, token) in self.line.tokens().iter().enumerate() {
            if let Some(tag) = &token.tag {
                let end = [
                    tag.terr.as_ref().map(|t| t.end),
                    tag.city.as_ref().map(|c| c.end),
                    tag.street.as_ref().map(|s| s.end),
                ]
                .iter()
                .flatten()
                .copied()
                .max()
                .unwrap_or(idx)
                .max(idx);
                let label = tag.label();
                self.include_span(SpanRef::new(idx, end), label);
            }
        }
        self
    }

    /// Add one row per contiguous entity reference.
    pub fn include_entities(&mut self) -> &mut Self {
        let mut idx = 0;
        while idx < self.line.len() {
            if let Some((span, entity)) = self.line.entity_span(idx) {
                self.include_span(span, format!("{:?}", entity));
                idx = span.end_idx + 1;
            } else {
                idx += 1;
            }
        }
        self
    }
}

impl<'a> std::fmt::Display for TokenLineDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut starts = Vec::with_capacity(self.line.len());
        let mut ends = Vec::with_capacity(self.line.len());

        let mut opening_line = String::new();
        for (idx, token) in self.line.tokens().iter().enumerate() {
            if idx > 0 {
                if token.is_newline_before() {
                    opening_line.push_str(" ↵ ");
                } else {
                    let gap = token.whitespace_before.max(1);
                    opening_line.extend(std::iter::repeat(' ').take(gap));
                }
            }
            starts.push(UnicodeWidthStr::width(opening_line.as_str()));
            opening_line.push_str(token.text());
            ends.push(UnicodeWidthStr::width(opening_line.as_str()));
        }

        f.write_str(&opening_line)?;

        for included in &self.include {
            f.write_char('\n')?;

            let start = starts[included.span.start_idx];
            let end = ends[included.span.end_idx];
            for _ in 0..start {
                f.write_char(' ')?;
            }
            f.write_char('╰')?;
            for _ in (start + 1)..end.saturating_sub(1) {
                f.write_char('─')?;
            }
            if end - start > 1 {
                f.write_char('╯')?;
            }
            f.write_str(&included.label)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_line::TerrItem;

    #[test]
    fn underline_single_and_multi_char_tokens() {
        let mut line = TokenLine::from_text("в Тверской обл");
        line.tag_mut(2).unwrap().terr = Some(TerrItem {
            termin: Some("ОБЛАСТЬ".to_string()),
            onto: None,
            end: 2,
        });

        let mut display = TokenLineDisplay::new(&line);
        display
            .include_span(SpanRef::single(0), "Prep")
            .include_tags();

        insta::assert_snapshot!(display.to_string(), @r###"
        в Тверской обл
        ╰Prep
                   ╰─╯Terr(ОБЛАСТЬ)
        "###);
    }

    #[test]
    fn newline_boundary_is_marked() {
        let line = TokenLine::from_text("край\nгород");
        let display = TokenLineDisplay::new(&line);
        assert_eq!(display.to_string(), "край ↵ город");
    }
}
