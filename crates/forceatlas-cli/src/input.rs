//! Edge-list input.
//!
//! One edge per line as `source target [weight]`, separated by whitespace. A
//! line with a single token declares an isolated node. Everything after `#`
//! is a comment. Node labels are kept as written and ordered by first
//! appearance.

use std::ops::Range;

use forceatlas::graph::LayoutGraph;

use crate::lexer::{Token, tokenize_lines};

/// A problem on one line of an input file.
///
/// Spans are byte offsets into the whole source, so every error can be
/// rendered against the original text.
#[derive(Debug, Clone, PartialEq)]
pub struct InputError {
    message: String,
    span: Range<usize>,
    label: String,
    help: Option<String>,
}

impl InputError {
    pub(crate) fn new(message: impl Into<String>, span: Range<usize>, label: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
            label: label.into(),
            help: None,
        }
    }

    pub(crate) fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// Parses a finite number, reporting the token's span on failure.
pub(crate) fn parse_number(token: &Token<'_>, what: &str) -> Result<f64, InputError> {
    match token.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::new(
            format!("invalid {what} `{}`", token.text),
            token.span(),
            "not a finite number",
        )),
    }
}

/// Parses an edge list into a graph.
///
/// # Errors
///
/// Returns every malformed line, not just the first.
pub fn parse_edge_list(source: &str, directed: bool) -> Result<LayoutGraph<String>, Vec<InputError>> {
    let mut graph = if directed {
        LayoutGraph::new_directed()
    } else {
        LayoutGraph::new()
    };
    let mut errors = Vec::new();

    let lines = tokenize_lines(source).map_err(|err| vec![err])?;

    for line in lines {
        match line.as_slice() {
            [node] => {
                graph.add_node(node.text.to_string());
            }
            [source, target] => {
                graph.add_edge(source.text.to_string(), target.text.to_string());
            }
            [source, target, weight] => match parse_number(weight, "edge weight") {
                Ok(weight) => {
                    graph.add_weighted_edge(source.text.to_string(), target.text.to_string(), weight)
                }
                Err(err) => errors.push(err),
            },
            [_, _, _, extra @ ..] => {
                let span = extra[0].offset..extra[extra.len() - 1].span().end;
                errors.push(
                    InputError::new("too many fields", span, "unexpected")
                        .with_help("edges are written as `source target [weight]`"),
                );
            }
            [] => {}
        }
    }

    if errors.is_empty() {
        Ok(graph)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(graph: &LayoutGraph<String>) -> Vec<&str> {
        graph.nodes().map(String::as_str).collect()
    }

    #[test]
    fn test_edges_and_isolated_nodes() {
        let graph = parse_edge_list("a b\nb c 2.5\n\nd\n", false).unwrap();

        assert_eq!(labels(&graph), ["a", "b", "c", "d"]);
        assert_eq!(graph.edge_count(), 2);
        let weights: Vec<f64> = graph.edges().map(|edge| edge.weight()).collect();
        assert_eq!(weights, [1.0, 2.5]);
        assert!(!graph.is_directed());
    }

    #[test]
    fn test_comments_and_whitespace() {
        let source = "# header comment\n  x\ty   # trailing\n\t\n";

        let graph = parse_edge_list(source, true).unwrap();

        assert_eq!(labels(&graph), ["x", "y"]);
        assert!(graph.is_directed());
    }

    #[test]
    fn test_invalid_weight_span() {
        let source = "a b\nc d heavy\n";

        let errors = parse_edge_list(source, false).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "invalid edge weight `heavy`");
        assert_eq!(&source[errors[0].span()], "heavy");
    }

    #[test]
    fn test_non_finite_weight() {
        let errors = parse_edge_list("a b inf\n", false).unwrap_err();

        assert_eq!(errors[0].label(), "not a finite number");
    }

    #[test]
    fn test_collects_all_errors() {
        let source = "a b c d e\nok fine\nx y nan\n";

        let errors = parse_edge_list(source, false).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(&source[errors[0].span()], "d e");
        assert!(errors[0].help().is_some());
        assert_eq!(&source[errors[1].span()], "nan");
    }

    #[test]
    fn test_empty_source() {
        let graph = parse_edge_list("# nothing here\n", false).unwrap();

        assert!(graph.is_empty());
    }
}
