use std::fmt::Formatter;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::Obfuscate;

impl Obfuscate for DateTime<Utc> {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.to_rfc3339_opts(SecondsFormat::Nanos, true).obfuscate(f)
    }
}
