// src/printer/mod.rs

//! The `printer` module is for printing user-facing search results
//! with various text effects (color, bold) and highlighted keyword terms.

pub mod printers;
