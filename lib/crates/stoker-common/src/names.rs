//! Pure name helpers shared between the CLI and services.

use thiserror::Error;

/// Maximum length of a worker (application) name accepted by the platform.
pub const MAX_WORKER_NAME_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error(
        "invalid worker name '{0}': must start with a lowercase letter and \
         contain only lowercase letters, digits, and '-' (max {MAX_WORKER_NAME_LEN} chars)"
    )]
    InvalidWorkerName(String),
}

/// Collapse a framework identifier into the short form used in worker names.
///
/// Drops every `.` and `-`, matching the platform's convention for naming
/// builders after their runtime (`"jbossas-7"` becomes `"jbossas7"`,
/// `"php-5.3"` becomes `"php53"`).
#[must_use]
pub fn sanitize_framework(framework: &str) -> String {
    framework
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .collect()
}

/// Validate a worker name for use as a remote application name.
///
/// The name doubles as a DNS label in the application URL, so the charset
/// is restricted accordingly.
///
/// # Errors
///
/// Returns an error if the name is empty, too long, does not start with a
/// lowercase letter, or contains characters outside `[a-z0-9-]`.
pub fn validate_worker_name(name: &str) -> Result<(), NameError> {
    let invalid = || NameError::InvalidWorkerName(name.to_string());

    if name.is_empty() || name.len() > MAX_WORKER_NAME_LEN {
        return Err(invalid());
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return Err(invalid()),
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(invalid());
    }
    Ok(())
}
