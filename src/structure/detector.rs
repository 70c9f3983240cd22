//! Line classification engine
//!
//! Runs every [`LineRule`] over every non-blank line in a fixed order. A line
//! is structural when at least one rule matches; its level is the most
//! important level any matching rule assigned, and the first rule to assign
//! that level is recorded.

use super::rules::{default_rules, LineContext, LineRule};
use crate::types::{Level, StructuralLine, Structure};

/// Heading detector over an ordered rule list
pub struct StructureDetector {
    rules: Vec<Box<dyn LineRule>>,
}

impl std::fmt::Debug for StructureDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureDetector")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl Default for StructureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureDetector {
    /// Create a detector with the built-in rules
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create a detector with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after the existing ones
    pub fn add_rule(&mut self, rule: Box<dyn LineRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classify the lines of `text`.
    ///
    /// Never fails; text with no heading-like line yields [`Structure::Empty`].
    pub fn detect(&self, text: &str) -> Structure {
        let lines = non_blank_lines(text);
        let mut found = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let next = lines.get(idx + 1).map(|l| l.text);
            let ctx = LineContext::new(line.text, next, line.preceded_by_blank);

            if let Some((level, rule)) = self.classify(&ctx) {
                found.push(StructuralLine {
                    text: line.text.to_string(),
                    level,
                    line_index: idx,
                    rule,
                });
            }
        }

        Structure::from_lines(found)
    }

    fn classify(&self, ctx: &LineContext<'_>) -> Option<(Level, &'static str)> {
        let mut best: Option<(Level, &'static str)> = None;
        for rule in &self.rules {
            let Some(level) = rule.classify(ctx) else {
                continue;
            };
            match best {
                Some((current, _)) if current <= level => {}
                _ => best = Some((level, rule.name())),
            }
            if level == Level::Major {
                break;
            }
        }
        best
    }
}

struct SourceLine<'a> {
    text: &'a str,
    preceded_by_blank: bool,
}

/// Trimmed non-blank lines, remembering whether a blank line (or the start of
/// the text) came right before each one.
fn non_blank_lines(text: &str) -> Vec<SourceLine<'_>> {
    let mut out = Vec::new();
    let mut previous_blank = true;

    // `\r\n`, `\n` and a lone `\r` all end a line
    let lines = text
        .split('\n')
        .flat_map(|l| l.strip_suffix('\r').unwrap_or(l).split('\r'));

    for raw in lines {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            previous_blank = true;
            continue;
        }
        out.push(SourceLine {
            text: trimmed,
            preceded_by_blank: previous_blank,
        });
        previous_blank = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Structure {
        StructureDetector::new().detect(text)
    }

    fn texts_at(structure: &Structure, level: Level) -> Vec<&str> {
        structure.at_level(level).map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(detect(""), Structure::Empty);
        assert_eq!(detect("   \n\n\t\n"), Structure::Empty);
    }

    #[test]
    fn test_caps_heading_before_body() {
        let s = detect("INTRODUCTION\n\nThis is a simple test sentence about testing.");
        assert_eq!(texts_at(&s, Level::Major), vec!["INTRODUCTION"]);
        assert_eq!(s.lines()[0].rule, "all_caps");
    }

    #[test]
    fn test_numbered_points() {
        let s = detect(
            "1. First point\nSome longer explanatory content follows this line.\n2. Second point\nMore content.",
        );
        assert_eq!(texts_at(&s, Level::Major), vec!["1. First point", "2. Second point"]);
        let idx: Vec<_> = s.at_level(Level::Major).map(|l| l.line_index).collect();
        assert_eq!(idx, vec![0, 2]);
    }

    #[test]
    fn test_line_index_skips_blank_lines() {
        let s = detect("\n\nCHAPTER ONE\n\n\nSECOND PART");
        let idx: Vec<_> = s.lines().iter().map(|l| l.line_index).collect();
        assert_eq!(idx, vec![0, 1]);
    }

    #[test]
    fn test_plain_paragraph_only_edges_qualify() {
        let text = "This paragraph is written as ordinary prose and keeps going for a while,\n\
                    with a second line that is roughly the same length as the first one\n\
                    and a third line, also about as long as the others in this paragraph,\n\
                    before a final line that wraps up the whole thought in similar length.";
        // Only the edges qualify: the first line follows the start of the
        // text and the last line closes it.
        let s = detect(text);
        let idx: Vec<_> = s.lines().iter().map(|l| l.line_index).collect();
        assert_eq!(idx, vec![0, 3]);
        assert!(s.lines().iter().all(|l| l.level == Level::Minor));

        let text = format!("{}\n{}", "w".repeat(85), "v".repeat(85));
        assert_eq!(detect(&text), Structure::Empty);
    }

    #[test]
    fn test_title_followed_by_paragraph_is_major() {
        let s = detect("Memory palaces\nThe method of loci places items along an imagined route through a building.");
        assert_eq!(s.lines()[0].text, "Memory palaces");
        assert_eq!(s.lines()[0].level, Level::Major);
        assert_eq!(s.lines()[0].rule, "isolated_line");
    }

    #[test]
    fn test_colon_label_is_minor() {
        let text = format!("{}\nKey points:\n{}", "z".repeat(85), "z".repeat(85));
        let s = detect(&text);
        assert_eq!(s.lines().len(), 1);
        assert_eq!(s.lines()[0].text, "Key points:");
        assert_eq!(s.lines()[0].level, Level::Minor);
    }

    #[test]
    fn test_major_wins_over_minor() {
        // Matches colon (minor) and heading word (major)
        let text = format!("{}\nSummary:\n{}", "z".repeat(85), "z".repeat(85));
        let s = detect(&text);
        assert_eq!(s.lines()[0].level, Level::Major);
        assert_eq!(s.lines()[0].rule, "heading_word");
    }

    #[test]
    fn test_crlf_lines() {
        let s = detect("OVERVIEW\r\n\r\nbody text that is long enough to not matter much here\r\n");
        assert_eq!(s.lines()[0].text, "OVERVIEW");
    }

    #[test]
    fn test_line_endings_agree() {
        let body = "body text that is long enough to sit well past the ratio threshold";
        let unix = detect(&format!("OVERVIEW\n\nKey points:\n{body}\n"));
        let windows = detect(&format!("OVERVIEW\r\n\r\nKey points:\r\n{body}\r\n"));
        let classic = detect(&format!("OVERVIEW\r\rKey points:\r{body}\r"));

        let texts: Vec<_> = classic.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["OVERVIEW", "Key points:", body]);
        assert_eq!(classic.lines()[1].level, Level::Major);
        assert_eq!(windows, unix);
        assert_eq!(classic, unix);
    }

    #[test]
    fn test_levels_in_range_and_ordered() {
        let s = detect("TITLE\n- item\nsub:\n\nAnother heading\nA long body line that keeps on going and going for a while.");
        let mut last = None;
        for line in s.lines() {
            assert!(matches!(line.level.as_u8(), 1 | 2));
            if let Some(prev) = last {
                assert!(line.line_index > prev);
            }
            last = Some(line.line_index);
        }
    }

    #[test]
    fn test_detect_is_idempotent() {
        let text = "PART ONE\n\nSome text here.\n2) Next";
        assert_eq!(detect(text), detect(text));
    }

    #[test]
    fn test_custom_rule_appended() {
        struct QuestionRule;
        impl LineRule for QuestionRule {
            fn name(&self) -> &'static str {
                "question"
            }
            fn classify(&self, line: &LineContext<'_>) -> Option<Level> {
                line.text.ends_with('?').then_some(Level::Minor)
            }
        }

        let mut detector = StructureDetector::empty();
        detector.add_rule(Box::new(QuestionRule));
        let s = detector.detect("Why does spacing work?\nBecause of retrieval.");
        assert_eq!(s.lines().len(), 1);
        assert_eq!(s.lines()[0].rule, "question");
        assert_eq!(detector.rule_names(), vec!["question"]);
    }
}
