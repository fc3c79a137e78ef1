//! Small helpers without I/O

pub mod urn;
