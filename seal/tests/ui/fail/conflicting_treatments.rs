#![allow(dead_code)]

#[derive(pii_seal::Sealable)]
struct Patient {
    #[seal(confidential, searchable)]
    name: String,
}

fn main() {}
