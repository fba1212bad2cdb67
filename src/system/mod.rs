//! System utilities
//!
//! Best-effort inspection of the machine a run would execute on.

pub mod gpu;
