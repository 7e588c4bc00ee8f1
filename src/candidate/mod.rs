//! Candidate ranking for per-template scores.
//!
//! Ranking is a total order (score descending, then template index
//! ascending), so sequential and parallel evaluation select the same winner.

pub(crate) mod topk;
