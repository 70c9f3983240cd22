//! The analysis result bundle.
//!
//! An [`AnalysisResult`] is built once per call and never mutated; the layer
//! views borrow from it, so switching layers costs nothing.

use serde::Serialize;

use crate::layers::{Layer, LayerView};
use crate::types::{EmptyState, Keyword, Structure};

/// Structure, keywords and source text of one analyzed input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    structure: Structure,
    keywords: Vec<Keyword>,
    source_text: String,
}

impl AnalysisResult {
    pub(crate) fn new(structure: Structure, keywords: Vec<Keyword>, source_text: String) -> Self {
        Self {
            structure,
            keywords,
            source_text,
        }
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Keywords, best first
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// The input exactly as given
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// The view a presentation layer shows for `layer`.
    pub fn view(&self, layer: Layer) -> LayerView<'_> {
        match layer {
            Layer::Structure => LayerView::Structure(&self.structure),
            Layer::Keywords => LayerView::Keywords {
                structure: &self.structure,
                keywords: &self.keywords,
            },
            Layer::FullText => LayerView::FullText(&self.source_text),
        }
    }

    /// Layers that came out empty, for the presentation layer to label.
    pub fn empty_states(&self) -> Vec<EmptyState> {
        let mut states = Vec::new();
        if self.structure.is_empty() {
            states.push(EmptyState::StructureEmpty);
        }
        if self.keywords.is_empty() {
            states.push(EmptyState::KeywordsEmpty);
        }
        states
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, StructuralLine};

    fn sample() -> AnalysisResult {
        AnalysisResult::new(
            Structure::from_lines(vec![StructuralLine {
                text: "TITLE".to_string(),
                level: Level::Major,
                line_index: 0,
                rule: "all_caps",
            }]),
            vec![Keyword {
                term: "memory".to_string(),
                frequency: 2,
                score: 2.0,
            }],
            "TITLE\nmemory memory".to_string(),
        )
    }

    #[test]
    fn test_views() {
        let result = sample();
        match result.view(Layer::Structure) {
            LayerView::Structure(s) => assert_eq!(s.len(), 1),
            other => panic!("unexpected view {other:?}"),
        }
        match result.view(Layer::Keywords) {
            LayerView::Keywords { structure, keywords } => {
                assert_eq!(structure.len(), 1);
                assert_eq!(keywords[0].term, "memory");
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert_eq!(
            result.view(Layer::FullText),
            LayerView::FullText("TITLE\nmemory memory")
        );
    }

    #[test]
    fn test_empty_states() {
        assert!(sample().empty_states().is_empty());

        let empty = AnalysisResult::new(Structure::Empty, vec![], String::new());
        assert_eq!(
            empty.empty_states(),
            vec![EmptyState::StructureEmpty, EmptyState::KeywordsEmpty]
        );
    }

    #[test]
    fn test_to_json() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["structure"]["status"], "found");
        assert_eq!(json["keywords"][0]["term"], "memory");
        assert_eq!(json["source_text"], "TITLE\nmemory memory");
    }
}
