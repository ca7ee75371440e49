//! Language identification and detection
//!
//! Maps code fence tags to language IDs, and guesses the language of untagged
//! code blocks from their content.

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    C,
    Cpp,
    Java,
    Bash,
    Json,
    Css,
    Html,
    Php,
}

impl LanguageId {
    /// Every language with a grammar
    pub const HIGHLIGHTED: &'static [LanguageId] = &[
        LanguageId::Rust,
        LanguageId::JavaScript,
        LanguageId::TypeScript,
        LanguageId::Python,
        LanguageId::Go,
        LanguageId::C,
        LanguageId::Cpp,
        LanguageId::Java,
        LanguageId::Bash,
        LanguageId::Json,
        LanguageId::Css,
        LanguageId::Html,
        LanguageId::Php,
    ];

    /// Resolve a code fence annotation (` ```rust `) to a language.
    ///
    /// Returns None for tags we have no grammar for.
    pub fn from_fence_tag(tag: &str) -> Option<Self> {
        let lang = match tag.trim().to_lowercase().as_str() {
            "rust" | "rs" => LanguageId::Rust,
            "javascript" | "js" | "jsx" | "mjs" | "cjs" | "node" => LanguageId::JavaScript,
            "typescript" | "ts" | "tsx" => LanguageId::TypeScript,
            "python" | "py" | "python3" => LanguageId::Python,
            "go" | "golang" => LanguageId::Go,
            "c" | "h" => LanguageId::C,
            "cpp" | "c++" | "cc" | "cxx" | "hpp" => LanguageId::Cpp,
            "java" => LanguageId::Java,
            "bash" | "sh" | "shell" | "zsh" | "console" => LanguageId::Bash,
            "json" | "jsonc" => LanguageId::Json,
            "css" => LanguageId::Css,
            "html" | "htm" | "xhtml" => LanguageId::Html,
            "php" => LanguageId::Php,
            _ => return None,
        };
        Some(lang)
    }

    /// Guess the language of an untagged code block from its content.
    ///
    /// Only strong signals are used; ambiguous snippets return None and stay
    /// unstyled.
    pub fn detect(code: &str) -> Option<Self> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(first_line) = trimmed.lines().next() {
            if first_line.starts_with("#!") {
                return if first_line.contains("python") {
                    Some(LanguageId::Python)
                } else if first_line.contains("node") {
                    Some(LanguageId::JavaScript)
                } else if first_line.contains("sh") {
                    Some(LanguageId::Bash)
                } else {
                    None
                };
            }
        }

        if trimmed.starts_with("<?php") {
            return Some(LanguageId::Php);
        }

        if (trimmed.starts_with('{') || trimmed.starts_with('['))
            && serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
        {
            return Some(LanguageId::Json);
        }

        if trimmed.contains("#include") {
            let cpp = ["std::", "cout", "template<", "template <", "namespace "];
            return if cpp.iter().any(|s| trimmed.contains(s)) {
                Some(LanguageId::Cpp)
            } else {
                Some(LanguageId::C)
            };
        }

        if trimmed.starts_with("package main")
            || (trimmed.contains("func ") && trimmed.contains(":="))
        {
            return Some(LanguageId::Go);
        }

        if trimmed.contains("fn ")
            && ["let ", "->", "println!", "pub ", "impl ", "use "]
                .iter()
                .any(|s| trimmed.contains(s))
        {
            return Some(LanguageId::Rust);
        }

        if ["public class ", "public static void ", "System.out."]
            .iter()
            .any(|s| trimmed.contains(s))
        {
            return Some(LanguageId::Java);
        }

        if trimmed.lines().any(|l| {
            let l = l.trim_start();
            (l.starts_with("def ") || l.starts_with("class ") || l.starts_with("elif "))
                && l.trim_end().ends_with(':')
        }) {
            return Some(LanguageId::Python);
        }

        if ["interface ", ": string", ": number", ": boolean"]
            .iter()
            .filter(|s| trimmed.contains(*s))
            .count()
            >= 2
        {
            return Some(LanguageId::TypeScript);
        }

        if ["function ", "const ", "=>", "console.log", "require(", "document."]
            .iter()
            .any(|s| trimmed.contains(s))
        {
            return Some(LanguageId::JavaScript);
        }

        if trimmed.starts_with('<') && trimmed.contains("</") {
            return Some(LanguageId::Html);
        }

        if looks_like_css(trimmed) {
            return Some(LanguageId::Css);
        }

        if trimmed.lines().any(|l| {
            let l = l.trim_start();
            l.starts_with("$ ") || l.starts_with("sudo ") || l.starts_with("echo ")
        }) {
            return Some(LanguageId::Bash);
        }

        None
    }

    /// Canonical fence tag, used for the `language-*` class
    pub fn fence_tag(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "plaintext",
            LanguageId::Rust => "rust",
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
            LanguageId::Python => "python",
            LanguageId::Go => "go",
            LanguageId::C => "c",
            LanguageId::Cpp => "cpp",
            LanguageId::Java => "java",
            LanguageId::Bash => "bash",
            LanguageId::Json => "json",
            LanguageId::Css => "css",
            LanguageId::Html => "html",
            LanguageId::Php => "php",
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Rust => "Rust",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Python => "Python",
            LanguageId::Go => "Go",
            LanguageId::C => "C",
            LanguageId::Cpp => "C++",
            LanguageId::Java => "Java",
            LanguageId::Bash => "Bash",
            LanguageId::Json => "JSON",
            LanguageId::Css => "CSS",
            LanguageId::Html => "HTML",
            LanguageId::Php => "PHP",
        }
    }
}

/// Selector blocks like `body { color: red; }`
fn looks_like_css(code: &str) -> bool {
    let Some(open) = code.find('{') else {
        return false;
    };
    let selector = code[..open].trim();
    !selector.is_empty()
        && !selector.contains('(')
        && !selector.contains('=')
        && code.contains(':')
        && code.contains(';')
        && code.trim_end().ends_with('}')
}
