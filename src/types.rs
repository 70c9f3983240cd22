//! Core types shared by the analyzers and the service.

use serde::{Deserialize, Serialize, Serializer};

/// Importance of a structural line. Lower numbers are more important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Level 1: titles, numbered items, chapter headings
    Major,
    /// Level 2: sub-headings, labels, short isolated lines
    Minor,
}

impl Level {
    pub fn as_u8(self) -> u8 {
        match self {
            Level::Major => 1,
            Level::Minor => 2,
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// A line classified as heading-like
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralLine {
    /// Trimmed line content
    pub text: String,
    pub level: Level,
    /// Position among the non-blank lines of the source
    pub line_index: usize,
    /// Name of the rule that decided the level
    pub rule: &'static str,
}

/// Outcome of structure detection.
///
/// `Empty` replaces a placeholder row, so a genuine one-line outline can
/// never be mistaken for "nothing found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "lines", rename_all = "snake_case")]
pub enum Structure {
    Empty,
    Found(Vec<StructuralLine>),
}

impl Structure {
    pub fn from_lines(lines: Vec<StructuralLine>) -> Self {
        if lines.is_empty() {
            Structure::Empty
        } else {
            Structure::Found(lines)
        }
    }

    /// Structural lines in source order (empty slice for `Empty`)
    pub fn lines(&self) -> &[StructuralLine] {
        match self {
            Structure::Empty => &[],
            Structure::Found(lines) => lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Structure::Empty)
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    /// Lines at exactly `level`
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &StructuralLine> {
        self.lines().iter().filter(move |l| l.level == level)
    }
}

/// A ranked keyword or key phrase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    /// Lowercase token or phrase
    pub term: String,
    /// Token occurrences plus weighted phrase occurrences
    pub frequency: u32,
    pub score: f64,
}

/// Keyword scoring formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// `count * 1.5` for terms longer than six characters, `count` otherwise
    #[default]
    LengthBiasedFrequency,
    /// Term frequency times inverse frequency against the document's own
    /// token population
    TfIdf,
}

impl ScoringStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LengthBiasedFrequency => "length_biased_frequency",
            Self::TfIdf => "tf_idf",
        }
    }
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Minimum trimmed input length in characters (0 = no minimum)
    pub min_input_length: usize,
    /// Maximum number of keywords returned
    pub max_keywords: usize,
    /// Weight each phrase occurrence adds to its term's frequency
    pub phrase_weight: u32,
    pub scoring: ScoringStrategy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_input_length: 0,
            max_keywords: 20,
            phrase_weight: 2,
            scoring: ScoringStrategy::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_min_input_length(mut self, min_input_length: usize) -> Self {
        self.min_input_length = min_input_length;
        self
    }

    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    pub fn with_phrase_weight(mut self, phrase_weight: u32) -> Self {
        self.phrase_weight = phrase_weight;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringStrategy) -> Self {
        self.scoring = scoring;
        self
    }
}

/// Language-neutral marker for a layer with nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    StructureEmpty,
    KeywordsEmpty,
}
