//! Trace sink tests.


/// VCD writer output.
pub mod vcd;
