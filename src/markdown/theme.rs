//! Preview theme - colors and stylesheet for rendered HTML

use crate::syntax::HIGHLIGHT_NAMES;

/// Theme colors for the preview and exported documents (CSS-formatted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTheme {
    pub id: &'static str,
    pub background: String,
    pub text: String,
    pub heading: String,
    pub link: String,
    pub code_background: String,
    pub border: String,
    pub accent: String,
    pub muted: String,
    pub syntax: SyntaxColors,
}

/// Token colors used by the `hl-*` classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxColors {
    pub keyword: String,
    pub function: String,
    pub string: String,
    pub number: String,
    pub comment: String,
    pub type_name: String,
    pub variable: String,
    pub constant: String,
    pub operator: String,
    pub punctuation: String,
    pub tag: String,
    pub attribute: String,
}

pub const DARK_THEME_ID: &str = "default-dark";
pub const LIGHT_THEME_ID: &str = "default-light";

impl PreviewTheme {
    /// Dark theme (VS Code Dark+ palette)
    pub fn dark() -> Self {
        Self {
            id: DARK_THEME_ID,
            background: "#1e1e1e".to_string(),
            text: "#d4d4d4".to_string(),
            heading: "#569cd6".to_string(),
            link: "#ce9178".to_string(),
            code_background: "#252526".to_string(),
            border: "#3c3c3c".to_string(),
            accent: "#dcdcaa".to_string(),
            muted: "#858585".to_string(),
            syntax: SyntaxColors {
                keyword: "#569cd6".to_string(),
                function: "#dcdcaa".to_string(),
                string: "#ce9178".to_string(),
                number: "#b5cea8".to_string(),
                comment: "#6a9955".to_string(),
                type_name: "#4ec9b0".to_string(),
                variable: "#9cdcfe".to_string(),
                constant: "#4fc1ff".to_string(),
                operator: "#d4d4d4".to_string(),
                punctuation: "#808080".to_string(),
                tag: "#569cd6".to_string(),
                attribute: "#9cdcfe".to_string(),
            },
        }
    }

    /// Light theme (GitHub palette)
    pub fn light() -> Self {
        Self {
            id: LIGHT_THEME_ID,
            background: "#ffffff".to_string(),
            text: "#24292f".to_string(),
            heading: "#0550ae".to_string(),
            link: "#0969da".to_string(),
            code_background: "#f6f8fa".to_string(),
            border: "#d0d7de".to_string(),
            accent: "#8250df".to_string(),
            muted: "#57606a".to_string(),
            syntax: SyntaxColors {
                keyword: "#cf222e".to_string(),
                function: "#8250df".to_string(),
                string: "#0a3069".to_string(),
                number: "#0550ae".to_string(),
                comment: "#6e7781".to_string(),
                type_name: "#953800".to_string(),
                variable: "#24292f".to_string(),
                constant: "#0550ae".to_string(),
                operator: "#cf222e".to_string(),
                punctuation: "#24292f".to_string(),
                tag: "#116329".to_string(),
                attribute: "#0550ae".to_string(),
            },
        }
    }

    /// Look up a built-in theme by id, falling back to the dark theme
    pub fn from_id(id: &str) -> Self {
        match id {
            LIGHT_THEME_ID => Self::light(),
            DARK_THEME_ID => Self::dark(),
            other => {
                tracing::warn!("Unknown preview theme '{}', using {}", other, DARK_THEME_ID);
                Self::dark()
            }
        }
    }

    /// Color for a highlight capture name, or None to inherit the text color
    fn token_color(&self, capture: &str) -> Option<&str> {
        let group = capture.split('.').next().unwrap_or(capture);
        let color = match group {
            "keyword" => &self.syntax.keyword,
            "function" | "constructor" => &self.syntax.function,
            "string" | "escape" => &self.syntax.string,
            "number" | "boolean" => &self.syntax.number,
            "comment" => &self.syntax.comment,
            "type" => &self.syntax.type_name,
            "variable" | "property" | "label" => &self.syntax.variable,
            "constant" => &self.syntax.constant,
            "operator" => &self.syntax.operator,
            "punctuation" => &self.syntax.punctuation,
            "tag" => &self.syntax.tag,
            "attribute" => &self.syntax.attribute,
            _ => return None,
        };
        Some(color)
    }

    /// Stylesheet for rendered markdown, including highlight classes
    pub fn stylesheet(&self) -> String {
        let mut css = generate_css(self);
        for name in HIGHLIGHT_NAMES {
            if let Some(color) = self.token_color(name) {
                css.push_str(&format!(
                    ".hl-{} {{ color: {}; }}\n",
                    name.replace('.', "-"),
                    color
                ));
            }
        }
        css.push_str(".hl-comment { font-style: italic; }\n");
        css
    }
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self::dark()
    }
}

fn generate_css(theme: &PreviewTheme) -> String {
    format!(
        r#"
* {{
    box-sizing: border-box;
}}

body {{
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    font-size: 14px;
    line-height: 1.6;
    color: {text};
    background: {background};
    padding: 20px;
    max-width: 800px;
    margin: 0 auto;
}}

h1, h2, h3, h4, h5, h6 {{
    color: {heading};
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}}

h1, h2 {{
    border-bottom: 1px solid {border};
    padding-bottom: 0.3em;
}}

h1 {{ font-size: 2em; }}
h2 {{ font-size: 1.5em; }}
h3 {{ font-size: 1.25em; }}
h6 {{ color: {muted}; }}

p {{
    margin-top: 0;
    margin-bottom: 16px;
}}

code {{
    background: {code_background};
    padding: 0.2em 0.4em;
    border-radius: 3px;
    font-family: "SF Mono", "Fira Code", Consolas, "Liberation Mono", Menlo, Courier, monospace;
    font-size: 0.9em;
}}

pre {{
    background: {code_background};
    padding: 16px;
    border-radius: 6px;
    overflow-x: auto;
    margin-top: 0;
    margin-bottom: 16px;
}}

pre code {{
    background: none;
    padding: 0;
    font-size: 0.875em;
    line-height: 1.45;
}}

blockquote {{
    border-left: 4px solid {accent};
    margin: 0 0 16px 0;
    padding: 0 16px;
    color: {muted};
}}

a {{
    color: {link};
    text-decoration: none;
}}

a:hover {{
    text-decoration: underline;
}}

ul, ol {{
    padding-left: 2em;
    margin-top: 0;
    margin-bottom: 16px;
}}

hr {{
    height: 0.25em;
    padding: 0;
    margin: 24px 0;
    background-color: {border};
    border: 0;
}}

table {{
    border-collapse: collapse;
    border-spacing: 0;
    margin-bottom: 16px;
    width: 100%;
    overflow: auto;
}}

th, td {{
    padding: 6px 13px;
    border: 1px solid {border};
}}

th {{
    font-weight: 600;
    background: {code_background};
}}

img {{
    max-width: 100%;
}}

input[type="checkbox"] {{
    margin-right: 0.5em;
}}

del {{
    color: {muted};
}}

.conversion-error {{
    color: {accent};
    font-style: italic;
}}

"#,
        text = theme.text,
        background = theme.background,
        heading = theme.heading,
        link = theme.link,
        code_background = theme.code_background,
        border = theme.border,
        accent = theme.accent,
        muted = theme.muted,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_theme_default() {
        let theme = PreviewTheme::default();
        assert_eq!(theme.id, DARK_THEME_ID);
        assert!(theme.background.starts_with('#'));
        assert!(!theme.text.is_empty());
    }

    #[test]
    fn test_from_id() {
        assert_eq!(PreviewTheme::from_id(LIGHT_THEME_ID), PreviewTheme::light());
        assert_eq!(PreviewTheme::from_id(DARK_THEME_ID), PreviewTheme::dark());
        assert_eq!(PreviewTheme::from_id("no-such-theme"), PreviewTheme::dark());
    }

    #[test]
    fn test_stylesheet_has_highlight_classes() {
        let theme = PreviewTheme::dark();
        let css = theme.stylesheet();
        assert!(css.contains(&theme.background));
        assert!(css.contains(".hl-keyword { color: #569cd6; }"));
        assert!(css.contains(".hl-keyword-function {"));
        assert!(css.contains(".hl-comment {"));
        // "text.*" captures inherit the body color
        assert!(!css.contains(".hl-text {"));
    }
}
