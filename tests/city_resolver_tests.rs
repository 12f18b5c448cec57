use std::collections::HashMap;
use std::io::Write;

use chrono_tz::Tz;
use vaffel_afterhours_bot::services::cities::{CityTimezones, FALLBACK_TZ};

fn sample_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Москва", "Europe/Moscow"),
        ("Новосибирск", "Asia/Novosibirsk"),
        ("Санкт-Петербург", "Europe/Moscow"),
        ("Екатеринбург", "Asia/Yekaterinburg"),
        ("Орёл", "Europe/Moscow"),
        ("Владивосток", "Asia/Vladivostok"),
    ]
}

fn sample_table() -> CityTimezones {
    let table: HashMap<String, String> = sample_entries()
        .into_iter()
        .map(|(name, tz)| (name.to_string(), tz.to_string()))
        .collect();
    CityTimezones::from_table(table)
}

#[test]
fn test_every_canonical_name_resolves_to_its_own_timezone() {
    let cities = sample_table();

    for (name, tz) in sample_entries() {
        let expected: Tz = tz.parse().unwrap();
        assert_eq!(cities.resolve(name), expected, "city {name}");
    }
}

#[test]
fn test_resolution_ignores_case_punctuation_and_hyphens() {
    let cities = sample_table();

    assert_eq!(cities.resolve("НОВОСИБИРСК"), chrono_tz::Asia::Novosibirsk);
    assert_eq!(cities.resolve("санкт петербург"), chrono_tz::Europe::Moscow);
    assert_eq!(cities.resolve("  Екатеринбург!  "), chrono_tz::Asia::Yekaterinburg);
    // ё and е are interchangeable
    assert_eq!(cities.resolve("Орел"), chrono_tz::Europe::Moscow);
}

#[test]
fn test_empty_and_wordless_input_falls_back() {
    let cities = sample_table();

    assert_eq!(cities.resolve(""), FALLBACK_TZ);
    assert_eq!(cities.resolve("   "), FALLBACK_TZ);
    assert_eq!(cities.resolve("?!%"), FALLBACK_TZ);
}

#[test]
fn test_near_miss_spelling_matches_fuzzily() {
    let cities = sample_table();

    // One dropped character out of eleven keeps the score well above 75.
    assert_eq!(cities.resolve("Новосибирс"), chrono_tz::Asia::Novosibirsk);
    // One substituted character.
    assert_eq!(cities.resolve("Новосабирск"), chrono_tz::Asia::Novosibirsk);
    assert_eq!(cities.resolve("Владивасток"), chrono_tz::Asia::Vladivostok);
}

#[test]
fn test_dissimilar_input_falls_back() {
    let cities = sample_table();

    assert_eq!(cities.resolve("нск"), FALLBACK_TZ);
    assert_eq!(cities.resolve("xyz"), FALLBACK_TZ);
    assert_eq!(cities.resolve("London"), FALLBACK_TZ);
}

#[test]
fn test_row_with_empty_timezone_behaves_as_absent() {
    let mut table = HashMap::new();
    table.insert("Новосибирск".to_string(), "Asia/Novosibirsk".to_string());
    table.insert("Безвременск".to_string(), String::new());
    let cities = CityTimezones::from_table(table);

    // Exact hit on a row without a value falls through and ends on fallback:
    // the fuzzy pass re-finds the same row, whose value is still missing.
    assert_eq!(cities.resolve("Безвременск"), FALLBACK_TZ);
    assert_eq!(cities.len(), 2);
}

#[test]
fn test_row_with_unknown_timezone_is_dropped() {
    let mut table = HashMap::new();
    table.insert("Глюков".to_string(), "Mars/Olympus".to_string());
    let cities = CityTimezones::from_table(table);

    assert_eq!(cities.resolve("Глюков"), FALLBACK_TZ);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"Москва": "Europe/Moscow", "Новосибирск": "Asia/Novosibirsk"}}"#
    )
    .unwrap();

    let cities = CityTimezones::load(file.path()).unwrap();
    assert_eq!(cities.len(), 2);
    assert!(!cities.is_empty());
    assert_eq!(cities.resolve("Москва"), chrono_tz::Europe::Moscow);
}

#[test]
fn test_load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(CityTimezones::load(&missing).is_err());
}

#[test]
fn test_load_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json at all").unwrap();
    assert!(CityTimezones::load(file.path()).is_err());
}

#[test]
fn test_chat_title_resolution() {
    let cities = sample_table();

    assert_eq!(
        cities.for_chat_title("Team Vaffel: Новосибирск"),
        chrono_tz::Asia::Novosibirsk
    );
    // Without the marker the title is never treated as a city name,
    // even when it matches one exactly.
    assert_eq!(cities.for_chat_title("Новосибирск"), FALLBACK_TZ);
    assert_eq!(cities.for_chat_title(""), FALLBACK_TZ);
    // Empty city after the marker also lands on the fallback.
    assert_eq!(cities.for_chat_title("Team Vaffel:"), FALLBACK_TZ);
}
