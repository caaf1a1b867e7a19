#![allow(dead_code)]

#[derive(pii_seal::Sealable)]
struct Wrapper<T> {
    #[seal(confidential)]
    name: String,
    extra: T,
}

fn main() {}
