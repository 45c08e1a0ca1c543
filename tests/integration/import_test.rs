use std::fs;

use cf_loader::{EntityKind, LoaderConfig, MemoryStore, run_all, run_import};

use crate::utils::DataDir;

fn write_filers(data: &DataDir) {
    data.write_csv(
        "cand.csv",
        &["filerIdent", "filerTypeCd", "filerName", "filerNameLast", "filerNameFirst", "filerStreetCity"],
        &[
            &["00010001", "COH", "", "Smith", "Jane", "AUSTIN"],
            &["00010002", "GPAC", "Texans for Roads", "", "", "HOUSTON"],
            &["00010001", "COH", "", "Smith", "Janet", "DALLAS"],
            &["", "COH", "", "Nobody", "", ""],
            &["00010003", "COH", "", "", "", ""],
        ],
    );
}

#[test]
fn filers_end_to_end() {
    let data = DataDir::new();
    write_filers(&data);

    let mut store = MemoryStore::new();
    let summary = run_import(EntityKind::Filer, &data.config(), &mut store).unwrap();

    assert_eq!(summary.rows_read, 5);
    assert_eq!(summary.persisted, 2);
    assert_eq!(summary.duplicate, 1);
    assert_eq!(summary.missing_identity, 1);
    assert_eq!(summary.missing_field, 1);

    let smith = store.get(EntityKind::Filer, "00010001").unwrap();
    assert_eq!(smith["name"], "Smith, Jane");
    assert_eq!(smith["city"], "AUSTIN");
    assert!(smith["party"].is_null());
    assert_eq!(store.get(EntityKind::Filer, "00010002").unwrap()["type"], "GPAC");
}

#[test]
fn contributions_span_shards_in_name_order() {
    let data = DataDir::new();
    let header = [
        "contributionInfoId",
        "filerIdent",
        "contributorNameLast",
        "contributorNameFirst",
        "contributionAmount",
        "receivedDt",
    ];
    data.write_csv(
        "contribs_02.csv",
        &header,
        &[&["C3", "F1", "Doe", "John", "75.00", "20210301"]],
    );
    data.write_csv(
        "contribs_01.csv",
        &header,
        &[
            &["C1", "F1", "Doe", "Jane", "100.00", "20200315"],
            &["C2", "F1", "Old", "Gift", "5.00", "20190101"],
        ],
    );
    data.write_csv("contribs_notes.txt", &["ignored"], &[&["x"]]);

    let mut store = MemoryStore::new();
    let summary = run_import(EntityKind::Contribution, &data.config(), &mut store).unwrap();

    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.before_cutoff, 1);
    assert_eq!(summary.persisted, 2);
    // One flush per file, first file first
    let sizes: Vec<usize> = store.calls().iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![1, 1]);

    let c1 = store.get(EntityKind::Contribution, "C1").unwrap();
    assert_eq!(c1["contributor_name"], "Doe, Jane");
    assert_eq!(c1["amount"], 100.0);
    assert_eq!(c1["received_date"], "2020-03-15");
}

#[test]
fn cutoff_override_is_honoured() {
    let data = DataDir::new();
    data.write_csv(
        "expend_2024.csv",
        &["expendInfoId", "filerIdent", "expendAmount", "receivedDt"],
        &[
            &["E1", "F1", "$1,000", "20221231"],
            &["E2", "F1", "$2,000", "20230102"],
        ],
    );
    let config = LoaderConfig {
        min_received_date: 20230101,
        ..data.config()
    };

    let mut store = MemoryStore::new();
    let summary = run_import(EntityKind::Expenditure, &config, &mut store).unwrap();

    assert_eq!(summary.before_cutoff, 1);
    assert!(store.get(EntityKind::Expenditure, "E1").is_none());
    assert_eq!(store.get(EntityKind::Expenditure, "E2").unwrap()["amount"], 2000.0);
}

#[test]
fn reports_aggregate_types_from_file() {
    let data = DataDir::new();
    data.write_csv(
        "cover.csv",
        &["reportInfoIdent", "filerIdent", "reportTypeCd1", "reportTypeCd2", "totalContribAmount", "receivedDt"],
        &[&["R1", "F1", "JAN", "FINAL", "", "20240115"]],
    );

    let mut store = MemoryStore::new();
    run_import(EntityKind::Report, &data.config(), &mut store).unwrap();

    let report = store.get(EntityKind::Report, "R1").unwrap();
    assert_eq!(report["report_type"], "JAN, FINAL");
    assert!(report["total_contributions"].is_null());
}

#[test]
fn invalid_utf8_does_not_fail_the_file() {
    let data = DataDir::new();
    let mut bytes = b"filerIdent,filerName\n".to_vec();
    bytes.extend_from_slice(b"00020001,Caf\xE9 PAC\n");
    fs::write(data.path().join("cand.csv"), bytes).unwrap();

    let mut store = MemoryStore::new();
    let summary = run_import(EntityKind::Filer, &data.config(), &mut store).unwrap();

    assert_eq!(summary.persisted, 1);
    assert_eq!(
        store.get(EntityKind::Filer, "00020001").unwrap()["name"],
        "Caf\u{FFFD} PAC"
    );
}

#[test]
fn run_all_imports_every_kind() {
    let data = DataDir::new();
    write_filers(&data);
    data.write_csv("cover.csv", &["reportInfoIdent", "filerIdent"], &[&["R1", "00010001"]]);

    let mut store = MemoryStore::new();
    let results = run_all(&data.config(), &mut store).unwrap();

    let kinds: Vec<EntityKind> = results.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(kinds, EntityKind::ALL.to_vec());
    assert_eq!(store.len(EntityKind::Filer), 2);
    assert_eq!(store.len(EntityKind::Report), 1);
    assert_eq!(store.len(EntityKind::Contribution), 0);
}
