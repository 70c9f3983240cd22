//! Memory layers and the reader session.
//!
//! A reader moves through three layers of the same text: the outline, the
//! outline with keywords, and the full text. [`ReaderSession`] holds the
//! active layer and the latest analysis outcome, keeping "not analyzed yet",
//! "analyzed" and "rejected" apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pipeline::artifacts::AnalysisResult;
use crate::pipeline::errors::AnalysisError;
use crate::types::{Keyword, Structure};

/// One of the three progressive views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Titles only
    #[default]
    Structure,
    /// Titles and keywords
    Keywords,
    /// Complete text
    FullText,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Structure, Layer::Keywords, Layer::FullText];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Structure => "structure",
            Layer::Keywords => "keywords",
            Layer::FullText => "fulltext",
        }
    }

    /// Layer bound to a number key: `1`, `2` or `3`.
    pub fn from_shortcut(key: char) -> Option<Layer> {
        match key {
            '1' => Some(Layer::Structure),
            '2' => Some(Layer::Keywords),
            '3' => Some(Layer::FullText),
            _ => None,
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Layer::Structure => '1',
            Layer::Keywords => '2',
            Layer::FullText => '3',
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized layer name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid layer \"{0}\": expected structure, keywords or fulltext")]
pub struct ParseLayerError(pub String);

impl FromStr for Layer {
    type Err = ParseLayerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "structure" => Ok(Layer::Structure),
            "keywords" => Ok(Layer::Keywords),
            "fulltext" => Ok(Layer::FullText),
            other => Err(ParseLayerError(other.to_string())),
        }
    }
}

/// What a layer shows, borrowed from an [`AnalysisResult`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerView<'a> {
    Structure(&'a Structure),
    Keywords {
        structure: &'a Structure,
        keywords: &'a [Keyword],
    },
    FullText(&'a str),
}

/// Where the session stands with respect to analysis
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    NotRun,
    Ready(AnalysisResult),
    Rejected(AnalysisError),
}

/// Active layer plus the latest analysis outcome
#[derive(Debug, Clone, Default)]
pub struct ReaderSession {
    layer: Layer,
    state: SessionState,
}

impl ReaderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_layer(&self) -> Layer {
        self.layer
    }

    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    /// Switch layers by name, leaving the current one untouched on error.
    pub fn set_layer_by_name(&mut self, name: &str) -> Result<Layer, ParseLayerError> {
        let layer = name.parse()?;
        self.layer = layer;
        Ok(layer)
    }

    pub fn is_layer_active(&self, layer: Layer) -> bool {
        self.layer == layer
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Record the outcome of an analysis, replacing any previous one.
    pub fn record(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.state = match outcome {
            Ok(result) => SessionState::Ready(result),
            Err(err) => SessionState::Rejected(err),
        };
    }

    /// Forget the current analysis; the active layer is kept.
    pub fn clear(&mut self) {
        self.state = SessionState::NotRun;
    }

    /// View of the active layer, if an analysis is available.
    pub fn active_view(&self) -> Option<LayerView<'_>> {
        match &self.state {
            SessionState::Ready(result) => Some(result.view(self.layer)),
            _ => None,
        }
    }
}
