mod highlighter;
mod languages;

pub use highlighter::{Highlight, HighlightKind, HighlightedLine, Highlighter};
pub use languages::{Language, LanguageRegistry};
