use std::fmt::Formatter;

use crate::{Obfuscate, fingerprint};

impl Obfuscate for [u8] {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(hex::encode(fingerprint(self)).as_str())
    }
}

impl Obfuscate for Vec<u8> {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.as_slice().obfuscate(f)
    }
}

impl Obfuscate for str {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.as_bytes().obfuscate(f)
    }
}

impl Obfuscate for String {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.as_str().obfuscate(f)
    }
}

impl<T: Obfuscate + ?Sized> Obfuscate for &T {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        (**self).obfuscate(f)
    }
}

impl<T: Obfuscate> Obfuscate for Vec<T> {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (idx, item) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            item.obfuscate(f)?;
        }
        f.write_str("]")
    }
}

impl<T: Obfuscate> Obfuscate for Option<T> {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Some(item) => {
                f.write_str("Some(")?;
                item.obfuscate(f)?;
                f.write_str(")")
            }
            None => f.write_str("None"),
        }
    }
}
