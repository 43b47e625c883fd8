//! Runtime module — driver lifecycle: boot and run.

pub mod boot;
pub mod run;
