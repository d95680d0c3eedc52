use serde::{Deserialize, Serialize};
use std::path::Path;

/// One source file as handed to the engine by the file unit provider.
/// Owned by the run for its duration and never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUnit {
    pub path: String,
    pub language: Language,
    pub content: String,
    pub line_count: usize,
}

impl FileUnit {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        let language = Language::from_path(&path);
        let line_count = content.lines().count();
        Self {
            path,
            language,
            content,
            line_count,
        }
    }
}

/// Source language, inferred from the file extension. Drives the comment
/// and string syntax used by the structural index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    C,
    Cpp,
    Go,
    Rust,
    Php,
    Ruby,
    Unknown,
}

impl Language {
    pub fn from_path(path: &str) -> Self {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "py" => Language::Python,
            "js" | "jsx" | "mjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "hpp" | "cxx" => Language::Cpp,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            _ => Language::Unknown,
        }
    }

    /// Extensions the built-in catalog understands. Providers use this to
    /// filter discovery; anything else maps to [`Language::Unknown`].
    pub fn supported_extensions() -> &'static [&'static str] {
        &[
            "py", "js", "jsx", "mjs", "ts", "tsx", "java", "c", "h", "cpp", "cc", "hpp", "cxx",
            "go", "rs", "php", "rb",
        ]
    }

    /// Keywords that introduce a named function in this language.
    pub(crate) fn function_keywords(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["def"],
            Language::Rust => &["fn"],
            Language::Go => &["func"],
            Language::JavaScript | Language::TypeScript | Language::Php => &["function"],
            // Java/C/C++ methods lack a marker keyword; function-level
            // structural rules stay silent for them.
            Language::Java | Language::C | Language::Cpp => &[],
            Language::Ruby => &["def"],
            Language::Unknown => &["def", "fn", "func", "function"],
        }
    }

    pub(crate) fn uses_indent_blocks(&self) -> bool {
        matches!(self, Language::Python | Language::Ruby)
    }

    pub(crate) fn syntax(&self) -> SyntaxProfile {
        match self {
            Language::Python | Language::Ruby => SyntaxProfile {
                line_markers: &["#"],
                block_comment: None,
                quotes: &['"', '\''],
                triple_quotes: matches!(self, Language::Python),
            },
            Language::Rust | Language::Go => SyntaxProfile {
                line_markers: &["//"],
                block_comment: Some(("/*", "*/")),
                quotes: &['"'],
                triple_quotes: false,
            },
            Language::JavaScript | Language::TypeScript => SyntaxProfile {
                line_markers: &["//"],
                block_comment: Some(("/*", "*/")),
                quotes: &['"', '\'', '`'],
                triple_quotes: false,
            },
            Language::Java | Language::C | Language::Cpp => SyntaxProfile {
                line_markers: &["//"],
                block_comment: Some(("/*", "*/")),
                quotes: &['"', '\''],
                triple_quotes: false,
            },
            Language::Php => SyntaxProfile {
                line_markers: &["//", "#"],
                block_comment: Some(("/*", "*/")),
                quotes: &['"', '\''],
                triple_quotes: false,
            },
            Language::Unknown => SyntaxProfile {
                line_markers: &["//", "#"],
                block_comment: Some(("/*", "*/")),
                quotes: &['"'],
                triple_quotes: false,
            },
        }
    }
}

/// Lexical syntax the structural index needs to classify comment and
/// string spans.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SyntaxProfile {
    pub line_markers: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    pub quotes: &'static [char],
    pub triple_quotes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_extension() {
        assert_eq!(Language::from_path("src/app.py"), Language::Python);
        assert_eq!(Language::from_path("web/index.tsx"), Language::TypeScript);
        assert_eq!(Language::from_path("main.rs"), Language::Rust);
        assert_eq!(Language::from_path("README"), Language::Unknown);
        assert_eq!(Language::from_path("archive.tar.gz"), Language::Unknown);
    }

    #[test]
    fn line_count_reflects_content() {
        let unit = FileUnit::new("a.py", "x = 1\ny = 2\n");
        assert_eq!(unit.line_count, 2);
        assert_eq!(unit.language, Language::Python);

        let empty = FileUnit::new("b.py", "");
        assert_eq!(empty.line_count, 0);
    }
}
