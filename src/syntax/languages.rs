//! Language registry for Tree-sitter grammars
//!
//! Grammars are compiled dynamic libraries loaded from the user config
//! directory; a missing grammar just means plain-text rendering.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

/// The languages the editor knows how to highlight - the same set it knows
/// how to run or open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Java,
    Cpp,
    Ruby,
    Php,
    JavaScript,
    Html,
    Css,
    Unknown,
}

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "py" => Language::Python,
            "java" => Language::Java,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Language::Cpp,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            _ => Language::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::JavaScript => "JavaScript",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Unknown => "Plain Text",
        }
    }

    /// Grammar library name (`lib<name>.so` exposing `tree_sitter_<name>`).
    pub fn grammar_name(&self) -> Option<&'static str> {
        match self {
            Language::Python => Some("python"),
            Language::Java => Some("java"),
            Language::Cpp => Some("cpp"),
            Language::Ruby => Some("ruby"),
            Language::Php => Some("php"),
            Language::JavaScript => Some("javascript"),
            Language::Html => Some("html"),
            Language::Css => Some("css"),
            Language::Unknown => None,
        }
    }

    pub fn all() -> Vec<Language> {
        vec![
            Language::Python,
            Language::Java,
            Language::Cpp,
            Language::Ruby,
            Language::Php,
            Language::JavaScript,
            Language::Html,
            Language::Css,
        ]
    }
}

/// A loaded grammar library
struct LoadedGrammar {
    #[allow(dead_code)]
    library: Library,
    language: tree_sitter::Language,
}

/// Registry of available Tree-sitter languages
pub struct LanguageRegistry {
    grammars_dir: PathBuf,
    loaded: HashMap<Language, LoadedGrammar>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let grammars_dir = dirs::config_dir()
            .map(|p| p.join("scriptbliss").join("grammars"))
            .unwrap_or_else(|| PathBuf::from("grammars"));

        Self {
            grammars_dir,
            loaded: HashMap::new(),
        }
    }

    pub fn grammars_dir(&self) -> &Path {
        &self.grammars_dir
    }

    pub fn is_installed(&self, lang: Language) -> bool {
        lang.grammar_name()
            .map(|name| self.library_path(name).exists())
            .unwrap_or(false)
    }

    fn library_path(&self, name: &str) -> PathBuf {
        #[cfg(target_os = "macos")]
        let ext = "dylib";
        #[cfg(target_os = "linux")]
        let ext = "so";
        #[cfg(target_os = "windows")]
        let ext = "dll";

        self.grammars_dir.join(format!("lib{}.{}", name, ext))
    }

    /// Load a grammar library if present on disk.
    pub fn load(&mut self, lang: Language) -> Option<&tree_sitter::Language> {
        if self.loaded.contains_key(&lang) {
            return self.loaded.get(&lang).map(|g| &g.language);
        }

        let name = lang.grammar_name()?;
        let lib_path = self.library_path(name);
        if !lib_path.exists() {
            return None;
        }

        let library = unsafe { Library::new(&lib_path).ok()? };
        let func_name = format!("tree_sitter_{}", name);
        let language = unsafe {
            let func: Symbol<unsafe extern "C" fn() -> tree_sitter::Language> =
                library.get(func_name.as_bytes()).ok()?;
            func()
        };

        self.loaded
            .insert(lang, LoadedGrammar { library, language });

        self.loaded.get(&lang).map(|g| &g.language)
    }

    pub fn installed(&self) -> Vec<Language> {
        Language::all()
            .into_iter()
            .filter(|lang| self.is_installed(*lang))
            .collect()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_maps_to_language() {
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("java"), Language::Java);
        assert_eq!(Language::from_extension("cpp"), Language::Cpp);
        assert_eq!(Language::from_extension("rb"), Language::Ruby);
        assert_eq!(Language::from_extension("php"), Language::Php);
        assert_eq!(Language::from_extension("js"), Language::JavaScript);
        assert_eq!(Language::from_extension("html"), Language::Html);
        assert_eq!(Language::from_extension("css"), Language::Css);
        assert_eq!(Language::from_extension("zip"), Language::Unknown);
    }

    #[test]
    fn path_without_extension_is_plain_text() {
        assert_eq!(Language::from_path(Path::new("Makefile")), Language::Unknown);
        assert_eq!(
            Language::from_path(Path::new("src/app.py")),
            Language::Python
        );
    }

    #[test]
    fn every_known_language_has_a_grammar_name() {
        for lang in Language::all() {
            assert!(lang.grammar_name().is_some(), "{:?}", lang);
        }
        assert!(Language::Unknown.grammar_name().is_none());
    }
}
