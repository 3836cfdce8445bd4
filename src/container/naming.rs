//! Bean naming rules.

/// Lower-cases the first character of a type name when it is an ASCII capital.
///
/// `HelloController` becomes `helloController`; names that already start
/// with a lowercase letter, a digit or a non-ASCII character are returned as-is.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut out = String::with_capacity(name.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        _ => name.to_string(),
    }
}

/// Returns the last segment of a dotted type path.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
