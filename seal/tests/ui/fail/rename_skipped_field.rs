#![allow(dead_code)]

#[derive(pii_seal::Sealable)]
struct Patient {
    #[seal(skip, rename = "hint_column")]
    session_hint: Option<String>,
}

fn main() {}
