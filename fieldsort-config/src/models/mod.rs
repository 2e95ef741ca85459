//! Configuration models

pub mod sort;
