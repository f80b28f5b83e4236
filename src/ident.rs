//! Identifier sanitizers shared by both target backends.
//!
//! All functions are pure, total, and deterministic. Both sanitizers return
//! an empty string when nothing usable remains; callers must treat empty as
//! an error, never as a usable fallback.

/// Builds an exported PascalCase identifier: split on every
/// non-alphanumeric boundary, upper-case the first character of each
/// segment, concatenate. Returns "" for empty/whitespace-only input or when
/// the result would start with a digit.
pub fn public_ident(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for segment in s.trim().split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        return String::new();
    }
    out
}

/// Builds a generic identifier safe for TypeScript: every disallowed
/// character becomes a single underscore, runs of replacements collapse,
/// and a leading digit gets an underscore prefix.
pub fn safe_ident(s: &str) -> String {
    let s = s.trim();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Whether `s` already is a legal identifier in both targets:
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_legal_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_ident_joins_segments() {
        assert_eq!(public_ident("user_profile"), "UserProfile");
        assert_eq!(public_ident("get user"), "GetUser");
        assert_eq!(public_ident("pet-store.v2"), "PetStoreV2");
        assert_eq!(public_ident("alreadyPascal"), "AlreadyPascal");
    }

    #[test]
    fn public_ident_rejects_unusable_input() {
        assert_eq!(public_ident(""), "");
        assert_eq!(public_ident("   "), "");
        assert_eq!(public_ident("123abc"), "");
        assert_eq!(public_ident("---"), "");
    }

    #[test]
    fn safe_ident_replaces_and_collapses() {
        assert_eq!(safe_ident("user-profile"), "user_profile");
        assert_eq!(safe_ident("a--b"), "a_b");
        assert_eq!(safe_ident("a.b c"), "a_b_c");
        assert_eq!(safe_ident("snake_case"), "snake_case");
    }

    #[test]
    fn safe_ident_prefixes_leading_digit() {
        assert_eq!(safe_ident("2fast"), "_2fast");
        assert_eq!(safe_ident(""), "");
        assert_eq!(safe_ident("  "), "");
    }

    #[test]
    fn legal_ident_pattern() {
        assert!(is_legal_ident("getUser"));
        assert!(is_legal_ident("_private"));
        assert!(is_legal_ident("v2_list"));
        assert!(!is_legal_ident(""));
        assert!(!is_legal_ident("2fast"));
        assert!(!is_legal_ident("get-user"));
        assert!(!is_legal_ident("get user"));
    }
}
