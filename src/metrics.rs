//! Metric extraction: walk a parsed module and count structural facts.
//!
//! Total for any successfully parsed module: a construct that is absent
//! counts as zero/false, never as an error.

use tree_sitter::Node;

use crate::config::Config;
use crate::parser::ParsedModule;
use crate::types::MetricsRecord;

#[derive(Default)]
struct Counts {
  functions: usize,
  imports: usize,
  long_functions: usize,
  type_hinted: usize,
}

/// Extract a metrics record from one parsed module.
pub fn extract(module: &ParsedModule, config: &Config) -> MetricsRecord {
  let root = module.root();
  let mut counts = Counts::default();
  visit(root, config, &mut counts);

  MetricsRecord {
    function_count: counts.functions,
    import_count: counts.imports,
    has_module_docstring: has_module_docstring(&root),
    uses_type_hints: counts.type_hinted > 0,
    long_function_count: counts.long_functions,
    total_lines: module.source().lines().count(),
  }
}

fn visit(node: Node, config: &Config, counts: &mut Counts) {
  match node.kind() {
    "function_definition" | "async_function_definition" => {
      counts.functions += 1;
      // Span from the `def` line to the last body line; decorators sit in a
      // wrapping decorated_definition node and are excluded.
      let span = node.end_position().row - node.start_position().row;
      if span > config.long_function_lines {
        counts.long_functions += 1;
      }
      if has_type_hints(&node) {
        counts.type_hinted += 1;
      }
    }
    "import_statement" | "import_from_statement" | "future_import_statement" => {
      counts.imports += 1;
    }
    _ => {}
  }

  let mut cursor = node.walk();
  for child in node.children(&mut cursor) {
    visit(child, config, counts);
  }
}

/// True iff the first statement of the module is a single string literal.
/// Leading comments are not statements and are skipped.
fn has_module_docstring(root: &Node) -> bool {
  let mut cursor = root.walk();
  let result = root
    .named_children(&mut cursor)
    .find(|n| n.kind() != "comment")
    .filter(|n| n.kind() == "expression_statement")
    .and_then(|n| n.child(0))
    .map(|n| n.kind() == "string")
    .unwrap_or(false);
  result
}

/// A function carries type hints if its return position or any parameter
/// carries an annotation.
fn has_type_hints(node: &Node) -> bool {
  if node.child_by_field_name("return_type").is_some() {
    return true;
  }
  let Some(params) = node.child_by_field_name("parameters") else {
    return false;
  };
  let mut cursor = params.walk();
  let result = params
    .children(&mut cursor)
    .any(|p| matches!(p.kind(), "typed_parameter" | "typed_default_parameter"));
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser;

  fn metrics_for(source: &str) -> MetricsRecord {
    let module = parser::parse(source).unwrap();
    extract(&module, &Config::default())
  }

  /// A function whose node spans exactly `span` lines beyond the `def` line.
  fn function_spanning(span: usize) -> String {
    let mut src = String::from("def f():\n");
    for i in 0..span {
      src.push_str(&format!("    x{i} = {i}\n"));
    }
    src
  }

  #[test]
  fn counts_top_level_nested_and_method_definitions() {
    let src = "\
def outer():
    def inner():
        pass
    return inner

class C:
    def method(self):
        pass

async def fetch():
    pass
";
    assert_eq!(metrics_for(src).function_count, 4);
  }

  #[test]
  fn counts_all_import_forms() {
    let src = "\
from __future__ import annotations
import os
import os.path as p
from sys import argv
";
    assert_eq!(metrics_for(src).import_count, 4);
  }

  #[test]
  fn absent_constructs_yield_zero_not_error() {
    let m = metrics_for("");
    assert_eq!(m.function_count, 0);
    assert_eq!(m.import_count, 0);
    assert!(!m.has_module_docstring);
    assert!(!m.uses_type_hints);
    assert_eq!(m.long_function_count, 0);
    assert_eq!(m.total_lines, 0);
  }

  #[test]
  fn module_docstring_detected() {
    assert!(metrics_for("\"\"\"Module doc.\"\"\"\nx = 1\n").has_module_docstring);
  }

  #[test]
  fn module_docstring_allows_leading_comments() {
    assert!(metrics_for("# header\n\"\"\"Module doc.\"\"\"\n").has_module_docstring);
  }

  #[test]
  fn non_string_first_statement_is_not_a_docstring() {
    assert!(!metrics_for("x = 1\n\"\"\"late string\"\"\"\n").has_module_docstring);
  }

  #[test]
  fn docstring_inside_a_function_is_not_a_module_docstring() {
    assert!(!metrics_for("def f():\n    \"\"\"doc\"\"\"\n").has_module_docstring);
  }

  #[test]
  fn parameter_annotation_counts_as_type_hint() {
    assert!(metrics_for("def f(x: int):\n    return x\n").uses_type_hints);
  }

  #[test]
  fn defaulted_parameter_annotation_counts_as_type_hint() {
    assert!(metrics_for("def f(x: int = 1):\n    return x\n").uses_type_hints);
  }

  #[test]
  fn return_annotation_counts_as_type_hint() {
    assert!(metrics_for("def f() -> int:\n    return 1\n").uses_type_hints);
  }

  #[test]
  fn unannotated_functions_have_no_type_hints() {
    assert!(!metrics_for("def f(x, y=2):\n    return x\n").uses_type_hints);
  }

  #[test]
  fn function_spanning_exactly_twenty_lines_is_not_long() {
    let m = metrics_for(&function_spanning(20));
    assert_eq!(m.function_count, 1);
    assert_eq!(m.long_function_count, 0);
  }

  #[test]
  fn function_spanning_twenty_one_lines_is_long() {
    let m = metrics_for(&function_spanning(21));
    assert_eq!(m.long_function_count, 1);
  }

  #[test]
  fn trailing_newline_adds_no_line() {
    assert_eq!(metrics_for("a = 1\nb = 2\n").total_lines, 2);
    assert_eq!(metrics_for("a = 1\nb = 2").total_lines, 2);
  }
}
