use chrono::NaiveDate;
use roster_core::{parse_birth_date, Gender, NewPerson, Person, PersonValidationError};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn valid_person_passes_validation() {
    let person = NewPerson::new("Ivanov Ivan Ivanovich", Gender::Male, date(1990, 1, 1));
    person.validate().unwrap();
}

#[test]
fn validate_rejects_blank_full_name() {
    let empty = NewPerson::new("", Gender::Female, date(1985, 5, 5));
    assert_eq!(
        empty.validate().unwrap_err(),
        PersonValidationError::EmptyFullName
    );

    let whitespace = NewPerson::new("   ", Gender::Female, date(1985, 5, 5));
    assert_eq!(
        whitespace.validate().unwrap_err(),
        PersonValidationError::EmptyFullName
    );
}

#[test]
fn validate_enforces_full_name_length_limit() {
    let at_limit = NewPerson::new("x".repeat(900), Gender::Male, date(1990, 1, 1));
    at_limit.validate().unwrap();

    let over_limit = NewPerson::new("x".repeat(901), Gender::Male, date(1990, 1, 1));
    assert_eq!(
        over_limit.validate().unwrap_err(),
        PersonValidationError::FullNameTooLong { length: 901 }
    );
}

#[test]
fn parse_birth_date_accepts_both_input_formats() {
    assert_eq!(parse_birth_date("1990-01-01").unwrap(), date(1990, 1, 1));
    assert_eq!(parse_birth_date("01.01.1990").unwrap(), date(1990, 1, 1));
}

#[test]
fn parse_birth_date_rejects_malformed_and_impossible_dates() {
    let err = parse_birth_date("yesterday").unwrap_err();
    assert_eq!(
        err,
        PersonValidationError::InvalidBirthDate {
            value: "yesterday".to_string()
        }
    );

    assert!(parse_birth_date("2001-02-30").is_err());
    assert!(parse_birth_date("31.11.1990").is_err());
}

#[test]
fn gender_parse_is_case_sensitive_and_canonical() {
    assert_eq!(Gender::parse("Male").unwrap(), Gender::Male);
    assert_eq!(Gender::parse("Female").unwrap(), Gender::Female);

    let err = Gender::parse("male").unwrap_err();
    assert_eq!(
        err,
        PersonValidationError::InvalidGender {
            value: "male".to_string()
        }
    );
}

#[test]
fn new_person_parse_composes_field_validation() {
    let person = NewPerson::parse("Ivanov Ivan Ivanovich", "01.01.1990", "Male").unwrap();
    assert_eq!(person.full_name, "Ivanov Ivan Ivanovich");
    assert_eq!(person.gender, Gender::Male);
    assert_eq!(person.birth_date, date(1990, 1, 1));

    assert!(matches!(
        NewPerson::parse("Ivanov Ivan", "1990-01-01", "other").unwrap_err(),
        PersonValidationError::InvalidGender { .. }
    ));
    assert!(matches!(
        NewPerson::parse("Ivanov Ivan", "soon", "Male").unwrap_err(),
        PersonValidationError::InvalidBirthDate { .. }
    ));
    assert!(matches!(
        NewPerson::parse("", "1990-01-01", "Male").unwrap_err(),
        PersonValidationError::EmptyFullName
    ));
}

#[test]
fn person_serialization_uses_expected_wire_fields() {
    let person = Person {
        id: 7,
        full_name: "Ivanov Ivan Ivanovich".to_string(),
        gender: Gender::Male,
        birth_date: date(1990, 1, 1),
    };

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["full_name"], "Ivanov Ivan Ivanovich");
    assert_eq!(json["gender"], "Male");
    assert_eq!(json["birth_date"], "1990-01-01");

    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, person);
}

#[test]
fn identity_key_orders_by_full_name_first() {
    let anna = Person {
        id: 1,
        full_name: "Anna".to_string(),
        gender: Gender::Female,
        birth_date: date(1999, 9, 9),
    };
    let boris = Person {
        id: 2,
        full_name: "Boris".to_string(),
        gender: Gender::Male,
        birth_date: date(1950, 1, 1),
    };

    assert!(anna.identity_key() < boris.identity_key());
}
