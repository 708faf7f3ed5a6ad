//! JSONL governance trail.
//!
//! Per-project JSONL files in `.strata/trail/` carry one line per committed
//! recording. Downstream ledgers anchor the trace stubs they contain.

pub mod writer;
