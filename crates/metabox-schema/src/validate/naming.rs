//! Identifier naming rules shared by boxes and fields.
//!
//! Identifiers become storage keys and DOM ids, so the charset is kept to
//! lowercase ASCII alphanumerics plus `_` and `-`, starting with a letter.

use crate::error::ErrorTree;

/// Check one identifier, appending every violation found.
pub fn check_ident(ident: &str, max_len: usize, errs: &mut ErrorTree) {
    if ident.is_empty() {
        errs.add("identifier must not be empty");
        return;
    }

    if ident.len() > max_len {
        errs.add(format!(
            "identifier '{ident}' exceeds {max_len} characters"
        ));
    }

    if !ident.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        errs.add(format!(
            "identifier '{ident}' must start with a lowercase letter"
        ));
    }

    if !ident
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        errs.add(format!(
            "identifier '{ident}' may only contain lowercase letters, digits, '_' and '-'"
        ));
    }
}

///
/// TESTS
///
