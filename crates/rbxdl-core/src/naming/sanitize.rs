//! Filename stem sanitization.

/// Longest stem kept, leaving room for a suffix and a ` (n)` collision marker
/// under Linux NAME_MAX (255 bytes).
const STEM_MAX: usize = 200;

/// Reduces a display name to a portable filename stem.
///
/// - Replaces every character that is not an ASCII letter or digit with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing underscores
/// - Limits length to [`STEM_MAX`] bytes
pub fn sanitize_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches('_');
    // ASCII only at this point, so any byte index is a char boundary.
    trimmed[..trimmed.len().min(STEM_MAX)]
        .trim_end_matches('_')
        .to_string()
}
