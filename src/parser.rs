//! Python syntax-tree provider backed by tree-sitter.
//!
//! tree-sitter always produces a tree, so "invalid syntax" is defined here as
//! a tree containing any ERROR or MISSING node; callers get the first
//! offending line instead of a partially-parsed module.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// A successfully parsed Python module, owning its source text.
#[derive(Debug)]
pub struct ParsedModule {
  tree: Tree,
  source: String,
}

impl ParsedModule {
  pub fn root(&self) -> Node<'_> {
    self.tree.root_node()
  }

  pub fn source(&self) -> &str {
    &self.source
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
  #[error("python grammar unavailable")]
  ParserUnavailable,
  #[error("invalid syntax at line {line}")]
  InvalidSyntax { line: usize },
}

/// Parse Python source into a syntax tree.
pub fn parse(source: &str) -> Result<ParsedModule, ParseFailure> {
  let mut parser = Parser::new();
  let language = tree_sitter_python::LANGUAGE;
  parser
    .set_language(&language.into())
    .map_err(|_| ParseFailure::ParserUnavailable)?;

  let tree = parser
    .parse(source, None)
    .ok_or(ParseFailure::ParserUnavailable)?;

  let root = tree.root_node();
  if root.has_error() {
    let line = first_syntax_error_line(root).unwrap_or(1);
    return Err(ParseFailure::InvalidSyntax { line });
  }

  Ok(ParsedModule {
    tree,
    source: source.to_string(),
  })
}

/// First line (1-based) holding an ERROR or MISSING node.
fn first_syntax_error_line(node: Node) -> Option<usize> {
  if node.is_error() || node.is_missing() {
    return Some(node.start_position().row + 1);
  }
  let mut cursor = node.walk();
  for child in node.children(&mut cursor) {
    if let Some(line) = first_syntax_error_line(child) {
      return Some(line);
    }
  }
  None
}
