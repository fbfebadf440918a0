//! Language tag resolution for Markdown and MDX code blocks.
//!
//! The syntax highlighter and the step-through presenter used by the docs
//! pipeline both want a bare language identifier. [`language::resolve_language`]
//! derives it from the class name a Markdown parser attaches to a code block;
//! the remaining modules wire that into document scanning and component
//! configuration.

pub mod blocks;
pub mod components;
pub mod config;
pub mod exit_codes;
pub mod language;
pub mod linguist;
pub mod output;
pub mod scan;

pub use blocks::{CodeBlock, extract_code_blocks};
pub use components::{ComponentMap, ElementProps, HighlightProps, SurferConfig, code, pre, step_through};
pub use language::{DEFAULT_LANGUAGE, class_name_for_info, resolve_language};
pub use linguist::LinguistResolver;
