//! Prefix transformations: markdown headings and blockquotes rendered as
//! styled text with the literal prefix hidden.
//!
//! Rules never touch stored text. The indicator stays in the raw line; only
//! the displayed text is stripped, and only when the line does not hold the
//! cursor.

/// What a rule renders a line as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Heading level 1..=6.
    Heading(u8),
    BlockQuote,
}

/// Spacing around a transformed line, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    /// Blank rows drawn above the line.
    pub above: u16,
    /// Columns of indent before the text.
    pub left: u16,
}

/// A prefix → style mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    /// Literal prefix that activates the rule, e.g. `"## "`.
    pub indicator: &'static str,
    pub margins: Margins,
}

impl Rule {
    const fn heading(level: u8, indicator: &'static str, above: u16) -> Self {
        Self {
            kind: RuleKind::Heading(level),
            indicator,
            margins: Margins { above, left: 0 },
        }
    }

    /// Whether the rule applies to `text`.
    pub fn matches(&self, text: &str) -> bool {
        text.starts_with(self.indicator)
    }
}

/// Rules in priority order; the first match wins.
pub const RULES: [Rule; 7] = [
    Rule::heading(1, "# ", 1),
    Rule::heading(2, "## ", 1),
    Rule::heading(3, "### ", 0),
    Rule::heading(4, "#### ", 0),
    Rule::heading(5, "##### ", 0),
    Rule::heading(6, "###### ", 0),
    Rule {
        kind: RuleKind::BlockQuote,
        indicator: "> ",
        margins: Margins { above: 0, left: 2 },
    },
];

/// First rule whose indicator prefixes `text`.
pub fn classify(text: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(text))
}

/// How a line is shown for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display<'a> {
    pub rule: Option<&'static Rule>,
    /// Muted indicator span. Only present when a rule matched and the line
    /// holds the cursor.
    pub indicator: Option<&'a str>,
    /// Text after the indicator, or the whole line when nothing matched.
    pub text: &'a str,
}

impl Display<'_> {
    /// Bytes of raw text hidden in front of [`Display::text`].
    pub fn hidden_prefix_len(&self) -> usize {
        match (self.rule, self.indicator) {
            (Some(rule), None) => rule.indicator.len(),
            _ => 0,
        }
    }
}

/// Derive the displayed form of `text`. `focused` is whether the line holds
/// the cursor.
pub fn display(text: &str, focused: bool) -> Display<'_> {
    let Some(rule) = classify(text) else {
        return Display {
            rule: None,
            indicator: None,
            text,
        };
    };
    let (indicator, rest) = text.split_at(rule.indicator.len());
    Display {
        rule: Some(rule),
        indicator: focused.then_some(indicator),
        text: rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_classify_by_level() {
        for level in 1..=6u8 {
            let text = format!("{} x", "#".repeat(level as usize));
            let rule = classify(&text).unwrap();
            assert_eq!(rule.kind, RuleKind::Heading(level), "{text}");
        }
    }

    #[test]
    fn test_level_six_never_matches_lower_priority_rule() {
        let rule = classify("###### x").unwrap();
        assert_eq!(rule.kind, RuleKind::Heading(6));
        assert_eq!(display("###### x", false).text, "x");
    }

    #[test]
    fn test_blockquote_classifies() {
        let rule = classify("> quoted").unwrap();
        assert_eq!(rule.kind, RuleKind::BlockQuote);
        assert_eq!(rule.indicator, "> ");
    }

    #[test]
    fn test_prefix_without_space_is_plain() {
        assert!(classify("#hashtag").is_none());
        assert!(classify(">no space").is_none());
        assert!(classify("####### seven").is_none());
    }

    #[test]
    fn test_heading_display_unfocused_hides_indicator() {
        let d = display("## Title", false);
        assert_eq!(d.rule.map(|r| r.kind), Some(RuleKind::Heading(2)));
        assert_eq!(d.indicator, None);
        assert_eq!(d.text, "Title");
        assert_eq!(d.hidden_prefix_len(), 3);
    }

    #[test]
    fn test_heading_display_focused_shows_indicator() {
        let d = display("## Title", true);
        assert_eq!(d.indicator, Some("## "));
        assert_eq!(d.text, "Title");
        assert_eq!(d.hidden_prefix_len(), 0);
    }

    #[test]
    fn test_plain_text_displays_unchanged() {
        let d = display("just text", true);
        assert!(d.rule.is_none());
        assert!(d.indicator.is_none());
        assert_eq!(d.text, "just text");
    }

    #[test]
    fn test_indicator_only_line_displays_empty_text() {
        let d = display("# ", false);
        assert_eq!(d.text, "");
    }

    #[test]
    fn test_rules_are_in_priority_order() {
        let kinds: Vec<_> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(kinds.last(), Some(&RuleKind::BlockQuote));
        let lengths: Vec<_> = RULES[..6].iter().map(|r| r.indicator.len()).collect();
        assert_eq!(lengths, vec![2, 3, 4, 5, 6, 7]);
    }
}
