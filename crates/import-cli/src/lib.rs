//! Library side of the `sheet-import` binary: logging, argument forms of
//! wizard actions and terminal rendering.

#![deny(unsafe_code)]

pub mod edits;
pub mod logging;
pub mod render;
