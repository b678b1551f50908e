//! Debug commands: `lex` and `parse`.

use std::fmt::Write;

use vox_eval::Registry;
use vox_ir::AstNode;

use super::CliError;

/// One line per token: kind, text and span.
pub fn lex_expression(source: &str) -> Result<String, CliError> {
    let tokens = vox_lexer::tokenize(source, &Registry::standard())?;
    let mut out = String::new();
    for token in &tokens {
        let _ = writeln!(
            out,
            "{:<12} {:<10} {}",
            format!("{:?}", token.kind),
            token.text,
            token.span
        );
    }
    Ok(out.trim_end().to_string())
}

/// Indented syntax tree, followed by the expression printed back from it.
pub fn parse_expression(source: &str) -> Result<String, CliError> {
    let Some(tree) = vox_parse::parse_source(source, &Registry::standard())? else {
        return Ok("(empty)".to_string());
    };
    let mut out = String::new();
    write_tree(&mut out, &tree, 0);
    out.push_str(&tree.to_expression_string());
    Ok(out)
}

fn write_tree(out: &mut String, node: &AstNode, depth: usize) {
    let _ = writeln!(out, "{:indent$}{:?} {}", "", node.kind(), node.text(), indent = depth * 2);
    for child in &node.children {
        write_tree(out, child, depth + 1);
    }
}
