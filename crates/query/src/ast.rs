//! Defines the Abstract Syntax Tree (AST) for hq queries.
use std::fmt;

/// The top-level representation of a parsed query: one or more comma branches,
/// each evaluated against the same input.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub branches: Vec<Comma>,
}

/// A chain of pipe stages applied left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Comma {
    pub stages: Vec<Pipe>,
}

/// A single pipeline stage: an atomic step followed by an optional suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub atomic: Atomic,
    pub suffix: Option<Suffix>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atomic {
    /// `[ filter ]`, materializes the inner result into an array.
    Array(Box<Filter>),
    /// `find("selector")`
    Find(String),
    /// `attr("name")`
    Attr(String),
    Html,
    Text,
}

/// A postfix modifier on a pipe stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    /// `[]`, switches the pipeline into per-element mode.
    Iterate,
    /// `[i]`, negative values count from the end.
    Index(i64),
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", branch)?;
        }
        Ok(())
    }
}

impl fmt::Display for Comma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", stage)?;
        }
        Ok(())
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.atomic {
            Atomic::Array(inner) => write!(f, "[{}]", inner)?,
            Atomic::Find(selector) => write!(f, "find({})", quote(selector))?,
            Atomic::Attr(name) => write!(f, "attr({})", quote(name))?,
            Atomic::Html => f.write_str("html")?,
            Atomic::Text => f.write_str("text")?,
        }
        match self.suffix {
            Some(Suffix::Iterate) => f.write_str("[]"),
            Some(Suffix::Index(i)) => write!(f, "[{}]", i),
            None => Ok(()),
        }
    }
}

/// Quotes a string literal so that the parser reads it back unchanged.
fn quote(s: &str) -> String {
    // JSON string escaping is a subset of what the query grammar accepts.
    serde_json::Value::String(s.to_string()).to_string()
}
