mod common;

#[cfg(test)]
mod sealing {
    use chrono::{DateTime, Utc};
    use pii_seal::{CipherError, FieldError, TransformError, lookup, lookup_column, open_records, seal_records};

    use super::common::*;

    #[rstest]
    fn example_scenario(key: Key, engine: FieldEngine, maria: Person) {
        let sealed = engine.seal(&maria).unwrap();

        assert_ne!(sealed.name, "Maria Schmidt");
        assert_eq!(sealed.role, "teacher");
        assert_eq!(sealed.username_token, lookup::digest("maria.schmidt", &key).unwrap());

        let opened = engine.open::<Person>(&sealed).unwrap();
        assert_eq!(opened.name, "Maria Schmidt");
        assert_eq!(opened.role, "teacher");
        // tokens are never reversed
        assert_eq!(opened.username, sealed.username_token);

        let query = engine.lookup_token("Maria.Schmidt ").unwrap();
        assert_eq!(query, sealed.username_token);
    }

    #[rstest]
    fn plain_fields_are_copied_and_confidential_fields_restored(engine: FieldEngine, maria: Person) {
        let sealed = engine.seal(&maria).unwrap();
        assert_eq!(sealed.age, maria.age);

        let mut expected = Person {
            username: sealed.username_token.clone(),
            session_hint: None,
            ..maria
        };
        if let (Some(address), Some(stored)) = (expected.address.as_mut(), sealed.address.as_ref()) {
            address.postcode = Some(stored.postcode.clone());
        }
        assert_eq!(engine.open::<Person>(&sealed).unwrap(), expected);
    }

    #[rstest]
    fn lookup_column_sits_beside_the_ciphertext(key: Key, engine: FieldEngine, maria: Person) {
        let sealed = engine.seal(&maria).unwrap();

        let email = maria.email.as_deref().unwrap();
        assert_ne!(sealed.email, email);
        assert_eq!(sealed.email_token, lookup::digest(email, &key).unwrap());
        assert_eq!(engine.open::<Person>(&sealed).unwrap().email, maria.email);
    }

    #[rstest]
    fn timestamps_keep_nanoseconds(engine: FieldEngine, maria: Person) {
        let sealed = engine.seal(&maria).unwrap();
        assert!(!sealed.joined.is_empty());
        assert!(!sealed.birthday.is_empty());

        let opened = engine.open::<Person>(&sealed).unwrap();
        assert_eq!(opened.joined, maria.joined);
        assert_eq!(opened.birthday, maria.birthday);
    }

    #[rstest]
    fn absent_values_produce_no_ciphertext(engine: FieldEngine, maria: Person) {
        let person = Person {
            email: None,
            birthday: None,
            joined: DateTime::<Utc>::default(),
            address: None,
            notes: Vec::new(),
            ..maria
        };
        let sealed = engine.seal(&person).unwrap();
        assert_eq!(sealed.email, "");
        assert_eq!(sealed.email_token, "");
        assert_eq!(sealed.birthday, "");
        assert_eq!(sealed.joined, "");
        assert!(sealed.address.is_none());

        let opened = engine.open::<Person>(&sealed).unwrap();
        assert_eq!(opened.email, None);
        assert_eq!(opened.birthday, None);
        assert_eq!(opened.joined, DateTime::<Utc>::default());
        assert!(opened.notes.is_empty());
    }

    #[rstest]
    fn nested_records_are_sealed_in_turn(key: Key, engine: FieldEngine, maria: Person) {
        let sealed = engine.seal(&maria).unwrap();

        assert_eq!(sealed.notes.len(), 2);
        for (sealed_note, note) in sealed.notes.iter().zip(&maria.notes) {
            assert_ne!(sealed_note.body, note.body);
            assert_eq!(sealed_note.created_at, note.created_at);
        }
        let address = sealed.address.as_deref().unwrap();
        assert_ne!(address.street, "Karl-Liebknecht-Straße 12");
        assert_eq!(address.postcode, lookup::digest("04107", &key).unwrap());
        assert_eq!(address.country, "DE");

        let opened = engine.open::<Person>(&sealed).unwrap();
        assert_eq!(opened.notes, maria.notes);
        assert_eq!(opened.address.unwrap().street, "Karl-Liebknecht-Straße 12");
    }

    #[rstest]
    fn skipped_fields_are_defaulted(engine: FieldEngine, maria: Person) {
        assert!(maria.session_hint.is_some());
        let opened = engine.open::<Person>(&engine.seal(&maria).unwrap()).unwrap();
        assert_eq!(opened.session_hint, None);
    }

    #[rstest]
    fn sequences_preserve_order_and_length(key: Key, maria: Person) {
        let people = ["Anna", "Bernd", "Chiara", "Dmitri"]
            .into_iter()
            .map(|name| Person {
                name: name.into(),
                username: name.to_lowercase(),
                ..maria.clone()
            })
            .collect::<Vec<_>>();

        let sealed = seal_records(&people, &key).unwrap();
        assert_eq!(sealed.len(), 4);
        assert_eq!(sealed[2].username_token, lookup::digest("chiara", &key).unwrap());

        let opened = open_records::<Person>(&sealed, &key).unwrap();
        let names = opened.iter().map(|person| person.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Anna", "Bernd", "Chiara", "Dmitri"]);
    }

    #[rstest]
    fn tampered_field_fails_the_whole_record(engine: FieldEngine, maria: Person) {
        let mut sealed = engine.seal(&maria).unwrap();
        tamper(&mut sealed.name);

        let err = engine.open::<Person>(&sealed).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Field {
                record: "person",
                field: "name",
                source: FieldError::Cipher(CipherError::Authentication),
            }
        ));
        assert!(!err.to_string().contains("Maria"));
    }

    #[rstest]
    fn tampered_nested_field_names_the_nested_record(engine: FieldEngine, maria: Person) {
        let mut sealed = engine.seal(&maria).unwrap();
        tamper(&mut sealed.notes[1].body);

        let err = engine.open::<Person>(&sealed).unwrap_err();
        assert_eq!(err.record(), "note");
        assert_eq!(err.field(), Some("body"));

        let mut sealed = engine.seal(&maria).unwrap();
        if let Some(address) = sealed.address.as_mut() {
            tamper(&mut address.street);
        }
        let err = engine.open::<Person>(&sealed).unwrap_err();
        assert_eq!(err.record(), "postal_address");
    }

    #[rstest]
    fn wrong_key_is_rejected(engine: FieldEngine, maria: Person) {
        let sealed = engine.seal(&maria).unwrap();
        let other = FieldEngine::new(&Key::generate());
        assert!(matches!(
            other.open::<Person>(&sealed),
            Err(TransformError::Field { field: "name", .. })
        ));
    }

    #[rstest]
    fn stored_rows_are_found_by_token(engine: FieldEngine, maria: Person) {
        // rows as the persistence layer would write them: opaque text columns
        let people = [
            maria.clone(),
            Person {
                name: "Jonas Weber".into(),
                username: "jonas.weber".into(),
                role: "student".into(),
                ..maria
            },
        ];
        let rows = engine
            .seal_all(&people)
            .unwrap()
            .into_iter()
            .map(|sealed| serde_json::to_value(sealed).unwrap())
            .collect::<Vec<_>>();

        let column = lookup_column::<Person>("username").unwrap();
        assert_eq!(column, "username_token");
        let token = engine.lookup_token(" JONAS.weber").unwrap();

        let found = rows
            .iter()
            .filter(|row| row[column] == token.as_str())
            .map(|row| serde_json::from_value::<SealedPerson>(row.clone()).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(found.len(), 1);
        assert_eq!(engine.open::<Person>(&found[0]).unwrap().name, "Jonas Weber");
    }

    #[rstest]
    fn plain_timestamps_persist_beside_sealed_columns(engine: FieldEngine, maria: Person) {
        let note = &maria.notes[0];
        let row = serde_json::to_value(engine.seal(note).unwrap()).unwrap();
        assert_eq!(row["created_at"], "2024-03-01T08:30:00Z");
        assert_ne!(row["body"], note.body.as_str());

        let stored = serde_json::from_value::<SealedNote>(row).unwrap();
        assert_eq!(&engine.open::<Note>(&stored).unwrap(), note);
    }
}

#[cfg(test)]
mod table {
    use pii_seal::{Classification, FieldDescriptor, FieldKind, lookup_column, validate_table};

    use super::common::*;

    #[test]
    fn derived_table() {
        assert_eq!(Person::RECORD, "person");
        assert_eq!(
            Person::FIELDS,
            &[
                FieldDescriptor::new("name", "name", Classification::Confidential, FieldKind::Text),
                FieldDescriptor::new("username", "username_token", Classification::Searchable, FieldKind::Text),
                FieldDescriptor::new("role", "role", Classification::Plain, FieldKind::Text),
                FieldDescriptor::new("email", "email", Classification::Confidential, FieldKind::OptionalText)
                    .with_lookup_column("email_token"),
                FieldDescriptor::new(
                    "birthday",
                    "birthday",
                    Classification::Confidential,
                    FieldKind::OptionalTimestamp
                ),
                FieldDescriptor::new("joined", "joined", Classification::Confidential, FieldKind::Timestamp),
                FieldDescriptor::new("notes", "notes", Classification::Plain, FieldKind::Nested),
                FieldDescriptor::new("address", "address", Classification::Plain, FieldKind::Nested),
                FieldDescriptor::new("age", "age", Classification::Plain, FieldKind::Other),
            ]
        );
        validate_table::<Person>().unwrap();
    }

    #[test]
    fn record_names() {
        assert_eq!(Note::RECORD, "note");
        assert_eq!(Address::RECORD, "postal_address");
        assert_eq!(
            Note::FIELDS[1],
            FieldDescriptor::new("created_at", "created_at", Classification::Plain, FieldKind::Timestamp)
        );
    }

    #[rstest]
    #[case::searchable("username", Some("username_token"))]
    #[case::confidential_with_lookup("email", Some("email_token"))]
    #[case::confidential("name", None)]
    #[case::plain("role", None)]
    #[case::skipped("session_hint", None)]
    #[case::unknown("nickname", None)]
    fn lookup_columns(#[case] field: &str, #[case] column: Option<&str>) {
        assert_eq!(lookup_column::<Person>(field), column);
    }
}

#[cfg(test)]
mod logging {
    use super::common::*;

    #[rstest]
    fn debug_output_hides_personal_data(maria: Person) {
        let rendered = format!("{maria:?}");
        for secret in ["Maria Schmidt", "maria.schmidt", "example.org", "1984-05-17", "fresh login"] {
            assert!(!rendered.contains(secret), "{secret} leaked into {rendered}");
        }
        assert!(rendered.starts_with("Person {"));
        assert!(rendered.contains("teacher"));
        assert!(rendered.contains("age: 40"));
        // notes are rendered through their own log-safe Debug
        assert!(!rendered.contains("peanuts"));
    }

    #[rstest]
    fn debug_aliases_are_stable_within_a_process(maria: Person) {
        let first = format!("{:?}", maria.notes[0]);
        let second = format!("{:?}", maria.notes[0].clone());
        assert_eq!(first, second);
    }

    #[rstest]
    fn errors_never_carry_values(engine: FieldEngine, maria: Person) {
        let mut sealed = engine.seal(&maria).unwrap();
        sealed.birthday = engine.cipher().seal("not a date: Maria Schmidt").unwrap();
        let err = engine.open::<Person>(&sealed).unwrap_err();
        let rendered = format!("{err} {err:?}");
        assert!(rendered.contains("person.birthday"));
        assert!(!rendered.contains("Maria"));
    }
}
