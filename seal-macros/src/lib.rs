mod debug;
mod sealable;

use proc_macro::TokenStream;

/// Derive the field table and the sealed companion struct of a record.
///
/// ## Struct attributes
///
/// - `#[seal(sealed = "SealedName")]`: name of the sealed struct; `Sealed{Name}` by default
/// - `#[seal(derive(Clone, Debug))]`: derives applied to the sealed struct
/// - `#[seal(record = "name")]`: record name used in errors and logs; the snake-cased struct name by default
///
/// ## Field attributes
///
/// - `#[seal(confidential)]`: sealed with the cipher
/// - `#[seal(searchable)]`: replaced with its lookup token
/// - `#[seal(confidential, lookup = "column")]`: sealed, plus a sealed-only lookup token column
/// - `#[seal(nested)]`: holds records (possibly boxed, optional or in a `Vec`) which are sealed in turn
/// - `#[seal(skip)]`: absent from the sealed struct; `Default` on open
/// - `#[seal(rename = "column")]`: field name in the sealed struct
///
/// Unmarked fields are plain and must be `Clone`.
#[proc_macro_derive(Sealable, attributes(seal))]
pub fn derive_sealable(input: TokenStream) -> TokenStream {
    sealable::derive_sealable(input)
}

/// Implement Debug for a record, obfuscating fields which hold personal data.
///
/// Fields marked `#[sensitive]`, `#[seal(confidential)]` or `#[seal(searchable)]` are rendered as a
/// salted hash prefix. `#[sensitive]` on the struct applies to every field.
#[proc_macro_derive(Debug, attributes(seal, sensitive))]
pub fn derive_debug(input: TokenStream) -> TokenStream {
    debug::derive_debug(input)
}
