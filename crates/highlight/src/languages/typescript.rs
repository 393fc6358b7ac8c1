use linepad_theme::TokenColors;

use super::javascript::{tokenize_dialect, Dialect};
use crate::token::Token;

const TYPESCRIPT: Dialect = Dialect {
    extra_keywords: &[
        "interface",
        "type",
        "enum",
        "implements",
        "private",
        "protected",
        "public",
        "readonly",
        "declare",
        "namespace",
        "abstract",
        "as",
        "keyof",
        "is",
        "satisfies",
    ],
    type_names: &[
        "string", "number", "boolean", "any", "void", "never", "unknown", "object", "bigint",
        "symbol",
    ],
};

pub fn tokenize(line: &str, colors: &TokenColors) -> Vec<Token> {
    tokenize_dialect(line, colors, &TYPESCRIPT)
}
