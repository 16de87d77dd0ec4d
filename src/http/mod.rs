//! HTTP vocabulary shared by the parser and the importers

pub mod method;
