//! Alias normalization for resolved language tags.
//!
//! Authors write `py`, `sh` or `rs` in their fences while highlighters and
//! downstream tooling tend to key on a single canonical identifier. The table
//! is a curated subset inspired by GitHub Linguist `languages.yml`.

use phf::phf_map;

/// Alias (or canonical name) -> canonical name.
static LANGUAGE_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "javascript" => "javascript",
    "js" => "javascript",
    "jsx" => "jsx",
    "mjs" => "javascript",
    "cjs" => "javascript",
    "node" => "javascript",
    "typescript" => "typescript",
    "ts" => "typescript",
    "tsx" => "tsx",
    "python" => "python",
    "py" => "python",
    "python3" => "python",
    "py3" => "python",
    "rust" => "rust",
    "rs" => "rust",
    "go" => "go",
    "golang" => "go",
    "ruby" => "ruby",
    "rb" => "ruby",
    "shell" => "bash",
    "bash" => "bash",
    "sh" => "bash",
    "zsh" => "bash",
    "shellscript" => "bash",
    "console" => "bash",
    "c" => "c",
    "h" => "c",
    "cpp" => "cpp",
    "cxx" => "cpp",
    "cc" => "cpp",
    "hpp" => "cpp",
    "csharp" => "csharp",
    "cs" => "csharp",
    "java" => "java",
    "kotlin" => "kotlin",
    "kt" => "kotlin",
    "swift" => "swift",
    "php" => "php",
    "haskell" => "haskell",
    "hs" => "haskell",
    "elixir" => "elixir",
    "ex" => "elixir",
    "exs" => "elixir",
    "html" => "markup",
    "htm" => "markup",
    "xml" => "markup",
    "svg" => "markup",
    "markup" => "markup",
    "css" => "css",
    "scss" => "scss",
    "json" => "json",
    "jsonc" => "json",
    "json5" => "json",
    "yaml" => "yaml",
    "yml" => "yaml",
    "toml" => "toml",
    "markdown" => "markdown",
    "md" => "markdown",
    "mdx" => "mdx",
    "sql" => "sql",
    "graphql" => "graphql",
    "gql" => "graphql",
    "dockerfile" => "docker",
    "docker" => "docker",
    "diff" => "diff",
    "patch" => "diff",
    "text" => "text",
    "txt" => "text",
    "plaintext" => "text",
};

/// Resolver for language aliases to canonical names.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinguistResolver;

impl LinguistResolver {
    pub fn new() -> Self {
        Self
    }

    /// Canonical name for `language`, or the input lowercased when unknown.
    pub fn resolve(&self, language: &str) -> String {
        let lower = language.to_ascii_lowercase();
        match LANGUAGE_ALIASES.get(lower.as_str()) {
            Some(canonical) => (*canonical).to_string(),
            None => lower,
        }
    }

    pub fn is_known(&self, language: &str) -> bool {
        LANGUAGE_ALIASES.contains_key(language.to_ascii_lowercase().as_str())
    }
}
