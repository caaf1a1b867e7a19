#![allow(dead_code, unused_imports)]

use chrono::{DateTime, TimeZone as _, Utc};
pub(crate) use pii_seal::{FieldEngine, Key, Sealable};
pub(crate) use rstest::*;

/// The 32 ASCII bytes used as key material throughout the examples.
pub(crate) const EXAMPLE_KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

#[derive(Sealable, pii_seal::Debug, Clone, PartialEq)]
#[seal(
    sealed = "SealedPerson",
    derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)
)]
pub struct Person {
    #[seal(confidential)]
    pub name: String,
    #[seal(searchable, rename = "username_token")]
    pub username: String,
    pub role: String,
    #[seal(confidential, lookup = "email_token")]
    pub email: Option<String>,
    #[seal(confidential)]
    pub birthday: Option<DateTime<Utc>>,
    #[seal(confidential)]
    pub joined: DateTime<Utc>,
    #[seal(nested)]
    pub notes: Vec<Note>,
    #[seal(nested)]
    pub address: Option<Box<Address>>,
    #[seal(skip)]
    #[sensitive]
    pub session_hint: Option<String>,
    pub age: u32,
}

#[derive(Sealable, pii_seal::Debug, Clone, PartialEq)]
#[seal(derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize))]
pub struct Note {
    #[seal(confidential)]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Sealable, Debug, Clone, PartialEq)]
#[seal(
    sealed = "StoredAddress",
    record = "postal_address",
    derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)
)]
pub struct Address {
    #[seal(confidential)]
    pub street: String,
    #[seal(searchable)]
    pub postcode: Option<String>,
    pub country: String,
}

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[fixture]
pub(crate) fn key() -> Key {
    init_logger();
    Key::try_from(EXAMPLE_KEY.as_slice()).unwrap()
}

#[fixture]
pub(crate) fn engine(key: Key) -> FieldEngine {
    FieldEngine::new(&key)
}

#[fixture]
pub(crate) fn maria() -> Person {
    Person {
        name: "Maria Schmidt".into(),
        username: "maria.schmidt".into(),
        role: "teacher".into(),
        email: Some("maria.schmidt@example.org".into()),
        birthday: Some(Utc.with_ymd_and_hms(1984, 5, 17, 0, 0, 0).unwrap()),
        joined: Utc.timestamp_opt(1_709_281_800, 123_456_789).unwrap(),
        notes: vec![
            Note {
                body: "Prefers morning classes".into(),
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
            },
            Note {
                body: "Allergic to peanuts".into(),
                created_at: Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap(),
            },
        ],
        address: Some(Box::new(Address {
            street: "Karl-Liebknecht-Straße 12".into(),
            postcode: Some("04107".into()),
            country: "DE".into(),
        })),
        session_hint: Some("fresh login".into()),
        age: 40,
    }
}

/// Alter the last hex digit of a sealed value, which lands in the authentication tag.
pub(crate) fn tamper(value: &mut String) {
    let last = value.pop().expect("sealed values are never empty");
    value.push(if last == '0' { '1' } else { '0' });
}
