//! The runtime value model produced and consumed by query evaluation.

use crate::error::QueryError;
use crate::selection::Selection;

/// A value flowing through a query pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<S> {
    /// Absence of a value, e.g. a missing attribute or an out-of-range index.
    Empty,
    /// A concrete, materialized sequence.
    Array(Vec<Item<S>>),
    /// A sequence whose elements are fed one by one to later pipeline stages.
    Iterator(Vec<Item<S>>),
    Selection(S),
    String(String),
}

/// Every kind of value except `Iterator`.
///
/// Sequence payloads are built from items so an iterator can never be nested
/// inside another iterator.
#[derive(Debug, Clone, PartialEq)]
pub enum Item<S> {
    Empty,
    Array(Vec<Item<S>>),
    Selection(S),
    String(String),
}

impl<S> From<Item<S>> for Value<S> {
    fn from(item: Item<S>) -> Self {
        match item {
            Item::Empty => Value::Empty,
            Item::Array(items) => Value::Array(items),
            Item::Selection(s) => Value::Selection(s),
            Item::String(s) => Value::String(s),
        }
    }
}

impl<S> Item<S> {
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Empty => "empty value",
            Item::Array(_) => "array",
            Item::Selection(_) => "selection",
            Item::String(_) => "string",
        }
    }
}

impl<S: Selection> Value<S> {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Empty => "empty value",
            Value::Array(_) => "array",
            Value::Iterator(_) => "iterator",
            Value::Selection(_) => "selection",
            Value::String(_) => "string",
        }
    }

    /// Flattens the value into a list of items: an iterator yields its
    /// elements, anything else yields itself.
    pub fn into_items(self) -> Vec<Item<S>> {
        match self {
            Value::Iterator(items) => items,
            Value::Empty => vec![Item::Empty],
            Value::Array(items) => vec![Item::Array(items)],
            Value::Selection(s) => vec![Item::Selection(s)],
            Value::String(s) => vec![Item::String(s)],
        }
    }

    /// Materializes the value: an iterator becomes an array over the same
    /// elements, anything else becomes a one-element array.
    pub fn into_array(self) -> Value<S> {
        Value::Array(self.into_items())
    }

    fn selection(&self, operation: &'static str) -> Result<&S, QueryError> {
        match self {
            Value::Selection(s) => Ok(s),
            other => Err(QueryError::Type {
                operation,
                kind: other.kind(),
            }),
        }
    }

    pub fn find(&self, selector: &str) -> Result<Value<S>, QueryError> {
        let selection = self.selection("find")?;
        Ok(Value::Selection(selection.find(selector)?))
    }

    /// A missing attribute is not an error; it yields `Empty`.
    pub fn attr(&self, name: &str) -> Result<Value<S>, QueryError> {
        let selection = self.selection("attr")?;
        Ok(selection.attr(name).map_or(Value::Empty, Value::String))
    }

    pub fn html(&self) -> Result<Value<S>, QueryError> {
        let selection = self.selection("html")?;
        Ok(Value::String(selection.inner_html()?))
    }

    pub fn text(&self) -> Result<Value<S>, QueryError> {
        let selection = self.selection("text")?;
        Ok(Value::String(selection.text()))
    }

    /// Enters iterator mode. Applied to an iterator, each element is replaced
    /// by its children, descending one level further.
    pub fn iterate(self) -> Result<Value<S>, QueryError> {
        match self {
            Value::Iterator(items) => {
                let mut next = Vec::new();
                for item in items {
                    next.extend(children(Value::from(item))?);
                }
                Ok(Value::Iterator(next))
            }
            other => Ok(Value::Iterator(children(other)?)),
        }
    }

    /// Indexes into an array or selection. Negative indices count from the
    /// end; anything still out of range yields `Empty`.
    pub fn index(self, index: i64) -> Result<Value<S>, QueryError> {
        let count = match &self {
            Value::Array(items) => items.len(),
            Value::Selection(s) => s.count(),
            Value::String(_) => return Err(QueryError::Index("string")),
            other => {
                return Err(QueryError::Type {
                    operation: "index",
                    kind: other.kind(),
                });
            }
        };

        let resolved = if index < 0 {
            index + count as i64
        } else {
            index
        };
        if resolved < 0 || resolved >= count as i64 {
            return Ok(Value::Empty);
        }
        let resolved = resolved as usize;

        Ok(match self {
            Value::Array(mut items) => Value::from(items.swap_remove(resolved)),
            Value::Selection(s) => Value::Selection(s.at(resolved)),
            _ => Value::Empty,
        })
    }
}

fn children<S: Selection>(value: Value<S>) -> Result<Vec<Item<S>>, QueryError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Selection(s) => Ok(s.each().into_iter().map(Item::Selection).collect()),
        Value::String(_) => Err(QueryError::Iteration("string")),
        Value::Empty => Err(QueryError::Iteration("empty value")),
        Value::Iterator(_) => Err(QueryError::Iteration("nested iterator")),
    }
}
