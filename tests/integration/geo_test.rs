use chrono::NaiveDate;
use cf_loader::GeoLookupBuilder;
use cf_loader::geo::normalize_city;

use crate::utils::DataDir;

#[test]
fn lookup_file_from_gazetteer() {
    let data = DataDir::new();
    data.write_csv(
        "uscities.csv",
        &["city", "state_id", "county_name", "county_fips"],
        &[
            &["Houston", "TX", "Harris", "48201"],
            &["Ft. Worth", "TX", "Tarrant", "48439"],
            &["Fort Worth", "TX", "Parker", "48367"],
            &["Lubbock", "TX", "Lubbock", "48303"],
            &["Portland", "OR", "Multnomah", "41051"],
        ],
    );

    let mut builder = GeoLookupBuilder::new("TX");
    let rows = builder.read_csv(&data.path().join("uscities.csv")).unwrap();
    assert_eq!(rows, 5);

    let output = data.path().join("public").join("texas_geo.json");
    builder
        .build(NaiveDate::from_ymd_opt(2026, 1, 26).unwrap())
        .write_json(&output)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

    let cities = value["cities"].as_object().unwrap();
    assert_eq!(cities.len(), 3);
    assert_eq!(cities["FORT WORTH"]["county"], "Tarrant");
    assert_eq!(cities["HOUSTON"]["region"], "Houston");
    assert!(cities["LUBBOCK"]["region"].is_null());
    assert_eq!(
        value["counties"],
        serde_json::json!(["Harris", "Lubbock", "Parker", "Tarrant"])
    );
    assert_eq!(value["regions"].as_object().unwrap().len(), 6);
    assert_eq!(value["lastUpdated"], "2026-01-26");
}

#[test]
fn consumers_match_lookup_keys() {
    for (free_text, key) in [
        ("ft worth, tx", "FORT WORTH"),
        ("St. Hedwig Texas", "SAINT HEDWIG"),
        ("  corpus   christi ", "CORPUS CHRISTI"),
        ("El Paso TX USA", "EL PASO"),
    ] {
        assert_eq!(normalize_city(free_text), key);
    }
}
