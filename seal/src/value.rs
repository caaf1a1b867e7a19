//! Value types a classified field may hold, and their plaintext forms.
//!
//! The cipher and the digest only see strings. Timestamps pass through their canonical text
//! form around the cipher call. For every supported type one value stands for "absent" and
//! maps to the empty string, which both primitives pass through untouched.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{FieldError, FieldKind};

/// Canonical text of a timestamp: RFC 3339, nanosecond fraction, `Z` suffix.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse canonical timestamp text. Any RFC 3339 offset is accepted and converted to UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|timestamp| timestamp.with_timezone(&Utc))
}

/// A type which may be classified `confidential`.
///
/// ```rust,compile_fail
/// #[derive(pii_seal::Sealable)]
/// struct Patient {
///     #[seal(confidential)]
///     age: u32,
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot hold a confidential field",
    note = "confidential fields must be `String`, `Option<String>`, `DateTime<Utc>` or `Option<DateTime<Utc>>`"
)]
pub trait ConfidentialValue: Sized {
    const KIND: FieldKind;

    /// The text handed to the cipher. Empty when the value is absent.
    fn to_plaintext(&self) -> Cow<'_, str>;

    /// Rebuild the value from opened text.
    fn from_plaintext(plaintext: String) -> Result<Self, FieldError>;
}

impl ConfidentialValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_plaintext(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn from_plaintext(plaintext: String) -> Result<Self, FieldError> {
        Ok(plaintext)
    }
}

/// `None` and `Some("")` both seal to the empty string and open as `None`.
impl ConfidentialValue for Option<String> {
    const KIND: FieldKind = FieldKind::OptionalText;

    fn to_plaintext(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_deref().unwrap_or_default())
    }

    fn from_plaintext(plaintext: String) -> Result<Self, FieldError> {
        Ok((!plaintext.is_empty()).then_some(plaintext))
    }
}

/// The Unix epoch is the zero timestamp and seals to the empty string.
impl ConfidentialValue for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::Timestamp;

    fn to_plaintext(&self) -> Cow<'_, str> {
        if *self == DateTime::<Utc>::default() {
            return Cow::Borrowed("");
        }
        Cow::Owned(format_timestamp(self))
    }

    fn from_plaintext(plaintext: String) -> Result<Self, FieldError> {
        if plaintext.is_empty() {
            return Ok(DateTime::<Utc>::default());
        }
        Ok(parse_timestamp(&plaintext)?)
    }
}

impl ConfidentialValue for Option<DateTime<Utc>> {
    const KIND: FieldKind = FieldKind::OptionalTimestamp;

    fn to_plaintext(&self) -> Cow<'_, str> {
        match self {
            Some(timestamp) => Cow::Owned(format_timestamp(timestamp)),
            None => Cow::Borrowed(""),
        }
    }

    fn from_plaintext(plaintext: String) -> Result<Self, FieldError> {
        if plaintext.is_empty() {
            return Ok(None);
        }
        Ok(Some(parse_timestamp(&plaintext)?))
    }
}

/// A type which may be classified `searchable`, or carry a lookup column.
///
/// Timestamps cannot be searched:
///
/// ```rust,compile_fail
/// use chrono::{DateTime, Utc};
///
/// #[derive(pii_seal::Sealable)]
/// struct Event {
///     #[seal(searchable)]
///     at: DateTime<Utc>,
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot hold a searchable field",
    note = "only `String` and `Option<String>` fields can produce lookup tokens"
)]
pub trait SearchableValue: Sized {
    const KIND: FieldKind;

    /// The text handed to the digest, before normalization.
    fn lookup_input(&self) -> &str;

    /// Carry a stored token back into the opened record. Tokens are never reversed.
    fn from_token(token: String) -> Self;
}

impl SearchableValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn lookup_input(&self) -> &str {
        self
    }

    fn from_token(token: String) -> Self {
        token
    }
}

impl SearchableValue for Option<String> {
    const KIND: FieldKind = FieldKind::OptionalText;

    fn lookup_input(&self) -> &str {
        self.as_deref().unwrap_or_default()
    }

    fn from_token(token: String) -> Self {
        (!token.is_empty()).then_some(token)
    }
}
