//! Object identifier rules.
//!
//! Identifiers name slides and page elements inside one presentation. Ids
//! already present in a document (template placeholders such as `p7`, the
//! default slide `p`) only need to be non-empty. Ids a request asks the
//! service to assign must be 5 to 50 characters, start with a word
//! character and continue with word characters, `-` or `:`.

use crate::common::{Error, Result};

/// Object id of the slide every freshly created presentation starts with.
pub const DEFAULT_SLIDE_ID: &str = "p";

const MIN_NEW_ID_LEN: usize = 5;
const MAX_NEW_ID_LEN: usize = 50;

/// Check that an id referencing an existing object is usable.
pub fn check_reference(id: &str, what: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidRequest(format!("{} has an empty object id", what)));
    }
    Ok(())
}

/// Whether `id` may be assigned to a new object.
pub fn is_valid_new_object_id(id: &str) -> bool {
    let len = id.chars().count();
    if !(MIN_NEW_ID_LEN..=MAX_NEW_ID_LEN).contains(&len) {
        return false;
    }
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':'))
}

/// Check that an id is acceptable for a newly created object.
pub fn check_new_object_id(id: &str, what: &str) -> Result<()> {
    check_reference(id, what)?;
    if !is_valid_new_object_id(id) {
        return Err(Error::InvalidRequest(format!(
            "{} id '{}' must be {}-{} characters of [A-Za-z0-9_-:] starting with a word character",
            what, id, MIN_NEW_ID_LEN, MAX_NEW_ID_LEN
        )));
    }
    Ok(())
}
