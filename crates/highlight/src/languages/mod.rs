//! One hand-written lexer per supported language.

pub mod javascript;
pub mod plain;
pub mod python;
pub mod rust;
pub mod typescript;
