use pii_seal::{FieldEngine, Key, Sealable};

#[derive(Sealable, Clone, PartialEq, Debug)]
#[seal(derive(Debug))]
struct Visit {
    #[seal(confidential)]
    reason: String,
    room: String,
}

#[derive(Sealable, pii_seal::Debug, Clone, PartialEq)]
#[seal(sealed = "StoredPatient", record = "patient")]
struct Patient {
    #[seal(confidential, lookup = "name_token")]
    name: String,
    #[seal(searchable, rename = "insurance_token")]
    insurance_number: Option<String>,
    #[seal(nested)]
    visits: Vec<Visit>,
    #[seal(skip)]
    cache: Option<String>,
    age: u8,
}

fn main() {
    let engine = FieldEngine::new(&Key::generate());
    let patient = Patient {
        name: "Lena Vogel".into(),
        insurance_number: Some("A123456789".into()),
        visits: vec![Visit {
            reason: "check-up".into(),
            room: "2.14".into(),
        }],
        cache: None,
        age: 31,
    };

    let stored: StoredPatient = engine.seal(&patient).unwrap();
    assert_eq!(stored.name_token, engine.lookup_token("lena vogel").unwrap());
    assert_eq!(stored.visits[0].room, "2.14");

    let opened = engine.open::<Patient>(&stored).unwrap();
    assert_eq!(opened.name, patient.name);
    assert_eq!(opened.age, 31);
    assert_eq!(opened.visits, patient.visits);
    assert_eq!(Patient::RECORD, "patient");
}
