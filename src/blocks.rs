//! Code block extraction from Markdown content.

use crate::language::{class_name_for_info, resolve_language};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// A code block together with the language the highlighter would receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// 1-indexed line of the opening fence (or first indented line).
    pub start_line: usize,
    /// 1-indexed line of the closing fence (or last indented line).
    pub end_line: usize,
    pub fenced: bool,
    /// Full info string of the fence, empty for indented blocks.
    pub info_string: String,
    /// Class name the parser attaches, `None` without an info string.
    pub class_name: Option<String>,
    pub language: String,
    pub content: String,
}

struct CodeBlockBuilder {
    start_line: usize,
    fenced: bool,
    info_string: String,
    content: String,
}

impl CodeBlockBuilder {
    fn finish(self, end_line: usize) -> CodeBlock {
        let class_name = class_name_for_info(&self.info_string);
        let language = resolve_language(class_name.as_deref());
        CodeBlock {
            start_line: self.start_line,
            end_line,
            fenced: self.fenced,
            info_string: self.info_string,
            class_name,
            language,
            content: self.content,
        }
    }
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Extract all code blocks from `content`, in document order.
pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CodeBlockBuilder> = None;

    let parser = Parser::new_ext(content, Options::all()).into_offset_iter();

    for (event, range) in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let (fenced, info_string) = match kind {
                    CodeBlockKind::Fenced(info) => (true, info.trim().to_string()),
                    CodeBlockKind::Indented => (false, String::new()),
                };
                current = Some(CodeBlockBuilder {
                    start_line: line_of(content, range.start),
                    fenced,
                    info_string,
                    content: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(builder) = current.as_mut() {
                    builder.content.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(builder) = current.take() {
                    // The range ends after the closing fence's newline, if any.
                    let end = content[..range.end].trim_end_matches(['\n', '\r']).len();
                    blocks.push(builder.finish(line_of(content, end.max(range.start))));
                }
            }
            _ => {}
        }
    }

    log::debug!("Extracted {} code blocks", blocks.len());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fenced_block_with_language() {
        let content = "# Title\n\n```rust\nfn main() {}\n```\n";
        let blocks = extract_code_blocks(content);

        assert_eq!(
            blocks,
            vec![CodeBlock {
                start_line: 3,
                end_line: 5,
                fenced: true,
                info_string: "rust".to_string(),
                class_name: Some("language-rust".to_string()),
                language: "rust".to_string(),
                content: "fn main() {}\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_fence_without_info_defaults() {
        let blocks = extract_code_blocks("```\nlet a = 1;\n```\n");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].class_name, None);
        assert_eq!(blocks[0].language, "javascript");
    }

    #[test]
    fn test_info_string_attributes_ignored() {
        let blocks = extract_code_blocks("~~~python title=\"a.py\" {1,3}\nprint(1)\n~~~\n");

        assert_eq!(blocks[0].info_string, "python title=\"a.py\" {1,3}");
        assert_eq!(blocks[0].class_name.as_deref(), Some("language-python"));
        assert_eq!(blocks[0].language, "python");
    }

    #[test]
    fn test_indented_block() {
        let content = "Paragraph\n\n    indented code\n    more\n\nAfter\n";
        let blocks = extract_code_blocks(content);

        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].fenced);
        assert_eq!(blocks[0].start_line, 3);
        assert_eq!(blocks[0].end_line, 4);
        assert_eq!(blocks[0].language, "javascript");
        assert_eq!(blocks[0].content, "indented code\nmore\n");
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let content = "```go\npackage main\n```\n\ntext\n\n```c++\nint x;\n```\n\n```sh\nls\n```\n";
        let languages: Vec<_> = extract_code_blocks(content).into_iter().map(|b| b.language).collect();

        assert_eq!(languages, vec!["go", "c", "sh"]);
    }

    #[test]
    fn test_blocks_inside_lists_and_quotes() {
        let content = "- item\n\n  ```toml\n  a = 1\n  ```\n\n> ```yaml\n> b: 2\n> ```\n";
        let languages: Vec<_> = extract_code_blocks(content).into_iter().map(|b| b.language).collect();

        assert_eq!(languages, vec!["toml", "yaml"]);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let blocks = extract_code_blocks("```ruby\nputs 1\n");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "ruby");
        assert_eq!(blocks[0].start_line, 1);
    }

    #[test]
    fn test_no_blocks() {
        assert!(extract_code_blocks("Just `inline` code.\n").is_empty());
        assert!(extract_code_blocks("").is_empty());
    }
}
