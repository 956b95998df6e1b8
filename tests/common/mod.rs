#![allow(dead_code)]

pub mod fixtures;

use hq::{HqError, exec_str};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Runs `query` against `html`, panicking with the query on failure.
pub fn query(html: &str, query: &str) -> String {
    match exec_str(query, html) {
        Ok(output) => output,
        Err(e) => panic!("query {:?} failed: {}", query, e),
    }
}

/// Runs `query` against `html`, expecting an error.
pub fn query_err(html: &str, query: &str) -> HqError {
    match exec_str(query, html) {
        Ok(output) => panic!("query {:?} unexpectedly produced {:?}", query, output),
        Err(e) => e,
    }
}
