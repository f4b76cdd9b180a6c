//! FNET Application Layer
//!
//! Protocol state machines driven by a cooperative poll scheduler, and the
//! ports they need from the surrounding stack.
pub mod ports;
pub mod use_cases;
