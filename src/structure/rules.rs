//! Heading heuristics
//!
//! Each heuristic is a named [`LineRule`] that looks at one line and its
//! neighbourhood. Rules are independent; the detector decides how their
//! verdicts combine.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Level;

/// Enumeration or bullet prefix: `1.`, `2)`, `IV.`, `b.`, `*`, `-`, `+`.
/// The `roman` group is only a candidate; see [`ROMAN_NUMERAL`].
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+[.)]|(?P<roman>[IVXLCDM]+|[ivxlcdm]+)\.|[A-Za-z]\.|[*+-])(?:\s|$)")
        .expect("list marker pattern")
});

/// Well-formed Roman numeral up to 3999. Also matches the empty string.
static ROMAN_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:M{0,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3}))$")
        .expect("roman numeral pattern")
});

/// First words that introduce a section, in French and English.
pub const HEADING_WORDS: &[&str] = &[
    "chapitre",
    "chapter",
    "section",
    "partie",
    "part",
    "introduction",
    "conclusion",
    "résumé",
    "summary",
    "sommaire",
    "overview",
];

/// A non-blank line together with what surrounds it in the source.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Trimmed line text
    pub text: &'a str,
    /// Length of `text` in characters
    pub chars: usize,
    /// Length of the next non-blank line, `None` for the last one
    pub next_chars: Option<usize>,
    /// The previous source line is blank, or this is the first line
    pub preceded_by_blank: bool,
}

impl<'a> LineContext<'a> {
    pub fn new(text: &'a str, next: Option<&str>, preceded_by_blank: bool) -> Self {
        Self {
            text,
            chars: text.chars().count(),
            next_chars: next.map(|n| n.chars().count()),
            preceded_by_blank,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_chars.is_none()
    }
}

/// One heading heuristic.
pub trait LineRule: Send + Sync {
    /// Short, stable identifier (e.g. `"all_caps"`).
    fn name(&self) -> &'static str;

    /// The level this rule assigns to `line`, or `None` if it does not apply.
    fn classify(&self, line: &LineContext<'_>) -> Option<Level>;
}

/// Numbered, lettered or bulleted list item.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListMarkerRule;

impl LineRule for ListMarkerRule {
    fn name(&self) -> &'static str {
        "list_marker"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<Level> {
        let caps = LIST_MARKER.captures(line.text)?;
        if let Some(roman) = caps.name("roman") {
            // "DID." or "mild." are words, not numerals
            let numeral = roman.as_str();
            if numeral.is_empty() || !ROMAN_NUMERAL.is_match(numeral) {
                return None;
            }
        }
        Some(Level::Major)
    }
}

/// Upper-case line with at least one letter.
#[derive(Debug, Clone, Copy)]
pub struct AllCapsRule {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for AllCapsRule {
    fn default() -> Self {
        Self {
            min_chars: 3,
            max_chars: 100,
        }
    }
}

impl LineRule for AllCapsRule {
    fn name(&self) -> &'static str {
        "all_caps"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<Level> {
        let in_range = line.chars > self.min_chars && line.chars < self.max_chars;
        let has_letter = line.text.chars().any(char::is_alphabetic);
        (in_range && has_letter && line.text.to_uppercase() == line.text).then_some(Level::Major)
    }
}

/// Line whose first word is a section word such as "Chapter" or "Résumé".
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingWordRule;

impl LineRule for HeadingWordRule {
    fn name(&self) -> &'static str {
        "heading_word"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<Level> {
        let first = line.text.split_whitespace().next()?;
        let word = first
            .trim_end_matches([':', '.', ',', ';'])
            .to_lowercase();
        HEADING_WORDS.contains(&word.as_str()).then_some(Level::Major)
    }
}

/// Short line that stands apart: last in the text, followed by a much longer
/// line, or preceded by a blank line. Both of the latter together make it a
/// major heading.
#[derive(Debug, Clone, Copy)]
pub struct IsolatedLineRule {
    /// Lines must be strictly shorter than this
    pub max_chars: usize,
    /// How much longer the next line must be
    pub next_ratio: f64,
}

impl Default for IsolatedLineRule {
    fn default() -> Self {
        Self {
            max_chars: 80,
            next_ratio: 1.5,
        }
    }
}

impl IsolatedLineRule {
    fn followed_by_longer(&self, line: &LineContext<'_>) -> bool {
        line.next_chars
            .is_some_and(|next| next as f64 >= line.chars as f64 * self.next_ratio)
    }
}

impl LineRule for IsolatedLineRule {
    fn name(&self) -> &'static str {
        "isolated_line"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<Level> {
        if line.chars >= self.max_chars {
            return None;
        }
        let longer_next = self.followed_by_longer(line);
        match (longer_next, line.preceded_by_blank) {
            (true, true) => Some(Level::Major),
            (true, false) | (false, true) => Some(Level::Minor),
            (false, false) if line.is_last() => Some(Level::Minor),
            _ => None,
        }
    }
}

/// Label ending in a colon.
#[derive(Debug, Clone, Copy)]
pub struct ColonRule {
    pub max_chars: usize,
}

impl Default for ColonRule {
    fn default() -> Self {
        Self { max_chars: 100 }
    }
}

impl LineRule for ColonRule {
    fn name(&self) -> &'static str {
        "colon_label"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<Level> {
        (line.text.ends_with(':') && line.chars < self.max_chars).then_some(Level::Minor)
    }
}

/// The built-in rules in priority order.
pub fn default_rules() -> Vec<Box<dyn LineRule>> {
    vec![
        Box::new(ListMarkerRule),
        Box::new(AllCapsRule::default()),
        Box::new(HeadingWordRule),
        Box::new(IsolatedLineRule::default()),
        Box::new(ColonRule::default()),
    ]
}
