//! The identity invariant for recipe ids.
//!
//! A recipe imported from the web carries its source link, and its id is
//! the link with the scheme prefix stripped. A recipe created by hand has
//! no such link and its id is a canonical UUID string. Readers tolerate
//! ids that break this rule; the native-format writer does not.

use url::Url;
use uuid::Uuid;

/// Error returned when a recipe id fails the identity invariant.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdFormatError {
    /// The recipe has no usable link, so the id must be a canonical
    /// 8-4-4-4-12 UUID string, and is not.
    #[error("id {id:?} is not a canonical UUID string")]
    NotUuid {
        /// The offending id.
        id: String,
    },

    /// The recipe links to an absolute URL, so the id must be that URL
    /// with the scheme prefix stripped, and is not.
    #[error("id {id:?} does not match the recipe link (expected {expected:?})")]
    LinkMismatch {
        /// The offending id.
        id: String,
        /// The id the link dictates.
        expected: String,
    },
}

/// Check a recipe id against the identity invariant.
///
/// When `link` parses as an absolute URL the id must equal the link minus
/// its scheme prefix. Otherwise (no link, or a link that is not a
/// well-formed URL) the id must be a canonical UUID string,
/// case-insensitive.
///
/// # Errors
///
/// Returns the matching [`IdFormatError`] variant when the id breaks the
/// rule that applies to it.
pub fn validate(id: &str, link: Option<&str>) -> Result<(), IdFormatError> {
    if let Some((link, url)) = link.and_then(|link| Url::parse(link).ok().map(|url| (link, url))) {
        let expected = strip_scheme(link, url.scheme());
        if id == expected {
            Ok(())
        } else {
            Err(IdFormatError::LinkMismatch {
                id: id.to_string(),
                expected: expected.to_string(),
            })
        }
    } else if is_canonical_uuid(id) {
        Ok(())
    } else {
        Err(IdFormatError::NotUuid { id: id.to_string() })
    }
}

/// Whether a string is a hyphenated 8-4-4-4-12 UUID, in either case.
///
/// The uuid crate also accepts braced, simple and URN forms; the length
/// check pins this down to the hyphenated form only.
#[must_use]
pub fn is_canonical_uuid(id: &str) -> bool {
    id.len() == 36 && Uuid::try_parse(id).is_ok()
}

/// Strip the scheme prefix from a link known to parse as an absolute URL.
///
/// The slice offset comes from the parsed scheme so the original casing of
/// the remainder is preserved. `scheme://` is removed when the separator
/// is present, `scheme:` otherwise.
fn strip_scheme<'a>(link: &'a str, scheme: &str) -> &'a str {
    let rest = &link[scheme.len()..];
    rest.strip_prefix("://")
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(link)
}
