//! Syntax highlighter using Tree-sitter

use std::path::Path;
use tree_sitter::{Parser, Tree};

use super::languages::{Language, LanguageRegistry};

/// A highlight span within a line (byte offsets)
#[derive(Debug, Clone)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub kind: HighlightKind,
}

/// Types of syntax elements for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Keyword,
    String,
    Number,
    Comment,
    Function,
    Type,
    Operator,
    Punctuation,
    Property,
    Constant,
    Tag,
    Default,
}

impl HighlightKind {
    /// Map a Tree-sitter node type to a highlight kind
    pub fn from_node_type(node_type: &str, lang: Language) -> Self {
        match node_type {
            "comment" | "line_comment" | "block_comment" => HighlightKind::Comment,

            "string" | "string_literal" | "char_literal" | "string_content"
            | "escape_sequence" | "heredoc_body" | "encapsed_string" => HighlightKind::String,

            "number" | "integer" | "float" | "number_literal" | "integer_literal"
            | "float_literal" => HighlightKind::Number,

            "call_expression" | "function_definition" | "method_definition"
            | "function_declaration" | "method_declaration" | "method_call" => {
                HighlightKind::Function
            }

            "type_identifier" | "primitive_type" | "class_definition" | "class_declaration"
            | "interface_declaration" => HighlightKind::Type,

            "binary_expression" | "unary_expression" | "assignment_operator"
            | "comparison_operator" => HighlightKind::Operator,

            "delimiter" | "semicolon" | "comma" | "colon" => HighlightKind::Punctuation,

            "property_identifier" | "field_expression" | "member_expression"
            | "property_name" | "attribute" | "attribute_name" => HighlightKind::Property,

            "true" | "false" | "null" | "none" | "nil" | "boolean" => HighlightKind::Constant,

            // Markup
            "tag_name" | "start_tag" | "end_tag" | "selector" | "class_selector"
            | "id_selector" => HighlightKind::Tag,

            _ => Self::from_language_specific(node_type, lang),
        }
    }

    fn from_language_specific(node_type: &str, lang: Language) -> Self {
        match lang {
            Language::Python => Self::from_python_node(node_type),
            Language::JavaScript | Language::Php => Self::from_c_like_node(node_type),
            Language::Java | Language::Cpp => Self::from_c_like_node(node_type),
            Language::Ruby => Self::from_ruby_node(node_type),
            _ => HighlightKind::Default,
        }
    }

    fn from_python_node(node_type: &str) -> Self {
        match node_type {
            "def" | "class" | "if" | "elif" | "else" | "for" | "while" | "try" | "except"
            | "finally" | "with" | "as" | "import" | "from" | "return" | "yield" | "raise"
            | "pass" | "break" | "continue" | "lambda" | "and" | "or" | "not" | "in" | "is"
            | "global" | "nonlocal" | "assert" | "async" | "await" => HighlightKind::Keyword,
            "decorator" => HighlightKind::Property,
            _ => HighlightKind::Default,
        }
    }

    fn from_c_like_node(node_type: &str) -> Self {
        match node_type {
            "function" | "const" | "let" | "var" | "if" | "else" | "for" | "while" | "do"
            | "switch" | "case" | "default" | "break" | "continue" | "return" | "throw"
            | "try" | "catch" | "finally" | "class" | "extends" | "new" | "this" | "super"
            | "import" | "export" | "from" | "async" | "await" | "typeof" | "instanceof"
            | "public" | "private" | "protected" | "static" | "final" | "void" | "struct"
            | "namespace" | "template" | "typename" | "using" | "echo" => {
                HighlightKind::Keyword
            }
            _ => HighlightKind::Default,
        }
    }

    fn from_ruby_node(node_type: &str) -> Self {
        match node_type {
            "def" | "end" | "class" | "module" | "if" | "elsif" | "else" | "unless" | "while"
            | "until" | "for" | "do" | "begin" | "rescue" | "ensure" | "return" | "yield"
            | "require" | "attr_accessor" | "puts" | "then" | "case" | "when" => {
                HighlightKind::Keyword
            }
            "symbol" | "simple_symbol" => HighlightKind::Constant,
            _ => HighlightKind::Default,
        }
    }
}

/// A line with its syntax highlights
#[derive(Debug, Clone, Default)]
pub struct HighlightedLine {
    pub highlights: Vec<Highlight>,
}

impl HighlightedLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the highlight kind at a given column
    pub fn kind_at(&self, col: usize) -> HighlightKind {
        for h in &self.highlights {
            if col >= h.start && col < h.end {
                return h.kind;
            }
        }
        HighlightKind::Default
    }
}

/// Per-buffer syntax highlighter. Missing grammars degrade to plain text.
pub struct Highlighter {
    parser: Parser,
    tree: Option<Tree>,
    language: Language,
    registry: LanguageRegistry,
    line_highlights: Vec<HighlightedLine>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            tree: None,
            language: Language::Unknown,
            registry: LanguageRegistry::new(),
            line_highlights: Vec::new(),
        }
    }

    /// Switch language; returns false when the grammar is unavailable.
    pub fn set_language(&mut self, lang: Language) -> bool {
        self.tree = None;
        self.line_highlights.clear();
        self.language = lang;

        if lang == Language::Unknown {
            return true;
        }

        match self.registry.load(lang) {
            Some(ts_lang) => self.parser.set_language(ts_lang).is_ok(),
            None => false,
        }
    }

    pub fn set_language_from_path(&mut self, path: &Path) -> bool {
        self.set_language(Language::from_path(path))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Grammars found on disk, for the `:grammars` report.
    pub fn installed_grammars(&self) -> Vec<Language> {
        self.registry.installed()
    }

    pub fn grammars_dir(&self) -> &Path {
        self.registry.grammars_dir()
    }

    /// Parse the source and rebuild the per-line highlight spans.
    pub fn parse(&mut self, source: &str) {
        if self.language == Language::Unknown {
            self.line_highlights.clear();
            return;
        }

        self.tree = self.parser.parse(source, self.tree.as_ref());

        if let Some(tree) = self.tree.clone() {
            self.build_highlights(source, &tree);
        }
    }

    pub fn line_highlights(&self, line: usize) -> Option<&HighlightedLine> {
        self.line_highlights.get(line)
    }

    fn build_highlights(&mut self, source: &str, tree: &Tree) {
        let line_count = source.lines().count().max(1);
        self.line_highlights = vec![HighlightedLine::new(); line_count];

        let mut line_starts: Vec<usize> = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        let mut cursor = tree.walk();
        self.walk_tree(&mut cursor, source, &line_starts);
    }

    fn walk_tree(
        &mut self,
        cursor: &mut tree_sitter::TreeCursor,
        source: &str,
        line_starts: &[usize],
    ) {
        loop {
            let node = cursor.node();
            let kind = HighlightKind::from_node_type(node.kind(), self.language);

            // Leaf nodes, plus a few parents worth painting whole
            if kind != HighlightKind::Default
                && (node.child_count() == 0 || paint_whole(node.kind()))
            {
                let start_byte = node.start_byte();
                let end_byte = node.end_byte();
                let start_line = node.start_position().row;
                let end_line = node.end_position().row;

                for line in start_line..=end_line {
                    if line >= self.line_highlights.len() {
                        break;
                    }

                    let line_start = line_starts.get(line).copied().unwrap_or(0);
                    let line_end =
                        line_starts.get(line + 1).copied().unwrap_or(source.len());

                    let span_start = if line == start_line {
                        start_byte.saturating_sub(line_start)
                    } else {
                        0
                    };
                    let span_end = if line == end_line {
                        end_byte.saturating_sub(line_start)
                    } else {
                        line_end.saturating_sub(line_start)
                    };

                    if span_start < span_end {
                        self.line_highlights[line].highlights.push(Highlight {
                            start: span_start,
                            end: span_end,
                            kind,
                        });
                    }
                }
            }

            if cursor.goto_first_child() {
                self.walk_tree(cursor, source, line_starts);
                cursor.goto_parent();
            }

            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Node types painted as a whole rather than per leaf
fn paint_whole(node_type: &str) -> bool {
    matches!(
        node_type,
        "string" | "string_literal" | "comment" | "line_comment" | "block_comment"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_grammar_highlights_when_installed() {
        let mut highlighter = Highlighter::new();
        // Grammar may not be installed in the test environment
        let loaded = highlighter.set_language(Language::Python);

        highlighter.parse("def main():\n    print('hi')\n");

        if loaded {
            assert!(highlighter.line_highlights(0).is_some());
        } else {
            assert!(highlighter.line_highlights(0).is_none());
        }
    }

    #[test]
    fn unknown_language_produces_no_highlights() {
        let mut highlighter = Highlighter::new();
        highlighter.set_language(Language::Unknown);
        highlighter.parse("some plain text");

        assert!(
            highlighter.line_highlights(0).is_none()
                || highlighter
                    .line_highlights(0)
                    .is_some_and(|l| l.highlights.is_empty())
        );
    }

    #[test]
    fn node_types_map_to_highlight_kinds() {
        assert_eq!(
            HighlightKind::from_node_type("comment", Language::Python),
            HighlightKind::Comment
        );
        assert_eq!(
            HighlightKind::from_node_type("def", Language::Python),
            HighlightKind::Keyword
        );
        assert_eq!(
            HighlightKind::from_node_type("tag_name", Language::Html),
            HighlightKind::Tag
        );
        assert_eq!(
            HighlightKind::from_node_type("echo", Language::Php),
            HighlightKind::Keyword
        );
    }

    #[test]
    fn kind_at_falls_back_to_default_between_spans() {
        let line = HighlightedLine {
            highlights: vec![Highlight {
                start: 0,
                end: 3,
                kind: HighlightKind::Keyword,
            }],
        };
        assert_eq!(line.kind_at(1), HighlightKind::Keyword);
        assert_eq!(line.kind_at(5), HighlightKind::Default);
    }
}
