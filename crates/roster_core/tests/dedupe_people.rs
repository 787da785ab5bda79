use chrono::NaiveDate;
use roster_core::db::open_db_in_memory;
use roster_core::{
    dedupe_people, Gender, NewPerson, Person, PersonRepository, PersonService,
    SqlitePersonRepository,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn person(id: i64, full_name: &str, gender: Gender, birth_date: NaiveDate) -> Person {
    Person {
        id,
        full_name: full_name.to_string(),
        gender,
        birth_date,
    }
}

#[test]
fn identical_records_collapse_to_one_representative() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    let record = NewPerson::new("Ivanov Ivan Ivanovich", Gender::Male, date(1990, 1, 1));
    repo.insert(&record).unwrap();
    repo.insert(&record).unwrap();

    let unique = dedupe_people(repo.scan_all().unwrap());
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].full_name, "Ivanov Ivan Ivanovich");
    assert_eq!(unique[0].gender, Gender::Male);
    assert_eq!(unique[0].birth_date, date(1990, 1, 1));
}

#[test]
fn output_is_sorted_by_full_name_ascending() {
    let input = vec![
        person(1, "Borisov Boris", Gender::Male, date(1992, 2, 2)),
        person(2, "Antonova Anna", Gender::Female, date(1985, 5, 5)),
        person(3, "Antonov Artem", Gender::Male, date(1978, 3, 3)),
    ];

    let unique = dedupe_people(input);
    let names: Vec<&str> = unique.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["Antonov Artem", "Antonova Anna", "Borisov Boris"]);
}

#[test]
fn ordering_is_byte_wise_not_locale_aware() {
    // 'Z' (0x5A) sorts before 'a' (0x61) under byte comparison.
    let input = vec![
        person(1, "abel", Gender::Male, date(1990, 1, 1)),
        person(2, "Zed", Gender::Male, date(1990, 1, 1)),
    ];

    let unique = dedupe_people(input);
    let names: Vec<&str> = unique.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "abel"]);
}

#[test]
fn pairwise_distinct_input_is_preserved_entirely() {
    let input = vec![
        person(1, "Ivanov Ivan", Gender::Male, date(1990, 1, 1)),
        // Same name, different date.
        person(2, "Ivanov Ivan", Gender::Male, date(1991, 1, 1)),
        // Same name and date, different gender.
        person(3, "Ivanov Ivan", Gender::Female, date(1990, 1, 1)),
        // Same date and gender, case-differing name.
        person(4, "IVANOV IVAN", Gender::Male, date(1990, 1, 1)),
    ];

    let unique = dedupe_people(input.clone());
    assert_eq!(unique.len(), input.len());
}

#[test]
fn cardinality_never_exceeds_input() {
    let duplicated = vec![
        person(1, "Ivanov Ivan", Gender::Male, date(1990, 1, 1)),
        person(2, "Ivanov Ivan", Gender::Male, date(1990, 1, 1)),
        person(3, "Petrova Olga", Gender::Female, date(1980, 4, 4)),
    ];

    let unique = dedupe_people(duplicated);
    assert_eq!(unique.len(), 2);
}

#[test]
fn empty_store_dedupes_to_empty_sequence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    let unique = dedupe_people(repo.scan_all().unwrap());
    assert!(unique.is_empty());
}

#[test]
fn service_unique_people_dedupes_and_sorts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();
    let service = PersonService::new(repo);

    let boris = NewPerson::new("Borisov Boris", Gender::Male, date(1992, 2, 2));
    let anna = NewPerson::new("Antonova Anna", Gender::Female, date(1985, 5, 5));
    service.insert(&boris).unwrap();
    service.insert(&boris).unwrap();
    service.insert(&anna).unwrap();

    let unique = service.unique_people().unwrap();
    let names: Vec<&str> = unique.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["Antonova Anna", "Borisov Boris"]);
}
