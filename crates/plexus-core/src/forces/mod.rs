//! Per-particle force terms applied by `Field::advance`.
//!
//! Each term is a pure function of one particle and the frame inputs, so the
//! particles can be stepped independently (and in parallel).

pub mod drift;
pub mod pointer;
pub mod tether;
