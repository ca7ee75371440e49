//! Document shown when the editor starts

/// Welcome text loaded into a fresh model
pub const DEFAULT_MARKDOWN: &str = r#"# Welcome to MarkView!

**MarkView** converts Markdown to HTML as you type.

## Features

- ✨ **Live preview**: the HTML updates with every keystroke
- 🎨 **Syntax highlighting**: code blocks are colored by language
- 📊 **Statistics**: character and word counts in the status bar
- 🚀 **Export**: copy the HTML or save it as a standalone file

## Markdown examples

### Code block

```javascript
function hello() {
  console.log("Hello, MarkView!");
}
```

### Table

| Feature | Supported |
|---------|-----------|
| Headings | ✅ |
| Lists | ✅ |
| Code | ✅ |
| Tables | ✅ |

### Quote

> This is a quote. Markdown makes quotes easy.

### Lists

1. **Numbered list**
   - Nested item
   - Another item
2. Second item

- Plain list
- [ ] Open task
- [x] Finished task

### Links

[MarkView documentation](https://example.com)

---

**Edit the Markdown on the left and watch the preview on the right!**
"#;
