//! Utility functions and helpers

/// Turn a dotted module name into a linkable library name.
///
/// Every character that is not ASCII alphanumeric or `_` becomes `_`.
pub fn library_name(module: &str) -> String {
    module
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Check that a name can be used as a C preprocessor macro
pub fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render a `-D<NAME>=1` define flag
pub fn define_flag(name: &str) -> String {
    format!("-D{}=1", name)
}
