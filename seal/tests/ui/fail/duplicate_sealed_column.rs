#![allow(dead_code)]

#[derive(pii_seal::Sealable)]
struct Patient {
    name: String,
    #[seal(confidential, rename = "name")]
    full_name: String,
}

fn main() {}
