#![allow(dead_code)]

#[derive(pii_seal::Sealable)]
struct Patient {
    #[seal(lookup = "email_token")]
    email: String,
}

fn main() {}
