//! Transpiler tests for filters, CASE rules and query composition.

mod case_when;
mod compose;
