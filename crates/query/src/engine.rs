//! The evaluation engine for executing a parsed query against a `Selection`.

use super::ast::{Atomic, Comma, Filter, Pipe, Suffix};
use crate::error::QueryError;
use crate::selection::Selection;
use crate::value::Value;

/// Evaluates a compiled query against `input` and returns the result value.
pub fn evaluate<S: Selection>(filter: &Filter, input: &Value<S>) -> Result<Value<S>, QueryError> {
    exec_filter(filter, input)
}

/// Runs every comma branch against the same input. A single branch passes its
/// result through; several are gathered into an iterator.
fn exec_filter<S: Selection>(filter: &Filter, input: &Value<S>) -> Result<Value<S>, QueryError> {
    let mut results = Vec::with_capacity(filter.branches.len());
    for branch in &filter.branches {
        results.push(exec_comma(branch, input)?);
    }

    if results.len() > 1 {
        let items = results.into_iter().flat_map(Value::into_items).collect();
        return Ok(Value::Iterator(items));
    }
    Ok(results.pop().unwrap_or(Value::Empty))
}

/// Chains pipe stages. Once the current value is an iterator, each later
/// stage is applied per element.
fn exec_comma<S: Selection>(comma: &Comma, input: &Value<S>) -> Result<Value<S>, QueryError> {
    let mut current = input.clone();

    for stage in &comma.stages {
        log::trace!("Applying '{}' to {}", stage, current.kind());
        current = match current {
            Value::Iterator(items) => {
                let mut next = Vec::with_capacity(items.len());
                for item in items {
                    // Per-element iterators are spliced in rather than nested.
                    next.extend(exec_pipe(stage, Value::from(item))?.into_items());
                }
                Value::Iterator(next)
            }
            other => exec_pipe(stage, other)?,
        };
    }

    Ok(current)
}

fn exec_pipe<S: Selection>(pipe: &Pipe, input: Value<S>) -> Result<Value<S>, QueryError> {
    let value = match &pipe.atomic {
        Atomic::Array(inner) => exec_filter(inner, &input)?.into_array(),
        Atomic::Find(selector) => input.find(selector)?,
        Atomic::Attr(name) => input.attr(name)?,
        Atomic::Html => input.html()?,
        Atomic::Text => input.text()?,
    };

    match pipe.suffix {
        None => Ok(value),
        Some(Suffix::Iterate) => value.iterate(),
        Some(Suffix::Index(i)) => value.index(i),
    }
}
