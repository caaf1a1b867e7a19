#![allow(dead_code)]

#[derive(pii_seal::Sealable)]
struct Patient {
    #[seal(confidential, lookup = "email_token")]
    email: String,
    #[seal(searchable, rename = "email_token")]
    backup_email: String,
}

fn main() {}
