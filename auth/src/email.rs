//! Syntactic email check.
//!
//! Accepts exactly `local@domain.tld` where the local part is one or more of
//! `[a-z0-9._%+-]`, the domain is one or more of `[a-z0-9.-]` and the TLD is
//! two or more of `[a-z]`. Uppercase is rejected. No DNS or mailbox checks.

fn is_local_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || "._%+-".contains(c)
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ".-".contains(c)
}

/// Return whether `email` is a syntactically valid address.
pub fn validate_email(email: &str) -> bool {
    let Some((local, host)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }

    // The TLD is whatever follows the last dot; dots before it belong to the domain.
    let Some((domain, tld)) = host.rsplit_once('.') else {
        return false;
    };

    !domain.is_empty()
        && domain.chars().all(is_domain_char)
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_lowercase())
}
