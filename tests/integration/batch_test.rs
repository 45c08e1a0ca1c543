use cf_loader::entity::{contribution, expenditure, filer, report};
use cf_loader::{BatchLoader, EntityKind, MemoryStore, Pipeline, ReceivedDateFilter};

use crate::utils::rows;

#[test]
fn five_records_degrade_into_three_chunks() {
    let mut pipeline = Pipeline::new(expenditure::spec(), ReceivedDateFilter::default());
    let store = MemoryStore::new().refusing_batches_over(2);
    let mut loader = BatchLoader::new(store, 5, 2);

    let input = rows(&[
        &[("expendInfoId", "1"), ("filerIdent", "F")],
        &[("expendInfoId", "2"), ("filerIdent", "F")],
        &[("expendInfoId", "3"), ("filerIdent", "F")],
        &[("expendInfoId", "4"), ("filerIdent", "F")],
        &[("expendInfoId", "5"), ("filerIdent", "F")],
    ]);
    let summary = loader.load(&mut pipeline, input).unwrap();

    let calls: Vec<(usize, bool)> = loader
        .store()
        .calls()
        .iter()
        .map(|c| (c.size, c.accepted))
        .collect();
    assert_eq!(calls, vec![(5, false), (2, true), (2, true), (1, true)]);
    assert_eq!(summary.persisted, 5);
    assert_eq!(summary.failed_batches, 0);
    assert_eq!(loader.store().len(EntityKind::Expenditure), 5);
}

#[test]
fn fallback_of_one_isolates_a_bad_record() {
    let mut pipeline = Pipeline::new(report::spec(), ReceivedDateFilter::default());
    let store = MemoryStore::new().refusing_ids(["R2"]);
    let mut loader = BatchLoader::new(store, 500, 1);

    let input = rows(&[
        &[("reportInfoIdent", "R1"), ("filerIdent", "F")],
        &[("reportInfoIdent", "R2"), ("filerIdent", "F")],
        &[("reportInfoIdent", "R3"), ("filerIdent", "F")],
    ]);
    let summary = loader.load(&mut pipeline, input).unwrap();

    assert_eq!(summary.upsert_calls, 4);
    assert_eq!(summary.persisted, 2);
    assert_eq!(summary.dropped, 1);
    assert_eq!(summary.failed_batches, 1);
    let store = loader.into_store();
    assert!(store.get(EntityKind::Report, "R1").is_some());
    assert!(store.get(EntityKind::Report, "R2").is_none());
    assert!(store.get(EntityKind::Report, "R3").is_some());
}

#[test]
fn filter_rejections_never_reach_the_store() {
    let mut pipeline = Pipeline::new(contribution::spec(), ReceivedDateFilter::default());
    let mut loader = BatchLoader::new(MemoryStore::new(), 1000, 100);

    let input = rows(&[
        &[("contributionInfoId", ""), ("filerIdent", "F")],
        &[("contributionInfoId", "C1"), ("filerIdent", "F"), ("receivedDt", "20191231")],
        &[("contributionInfoId", "C2"), ("filerIdent", "F"), ("receivedDt", "20200101")],
        &[("contributionInfoId", "C3"), ("filerIdent", ""), ("receivedDt", "")],
        &[("contributionInfoId", "C4"), ("filerIdent", "F"), ("receivedDt", "")],
    ]);
    let summary = loader.load(&mut pipeline, input).unwrap();

    assert_eq!(summary.rows_read, 5);
    assert_eq!(summary.missing_identity, 1);
    assert_eq!(summary.before_cutoff, 1);
    assert_eq!(summary.missing_field, 1);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.persisted, 2);
    assert_eq!(summary.upsert_calls, 1);
    assert!(loader.store().get(EntityKind::Contribution, "C1").is_none());
}

#[test]
fn empty_input_makes_no_calls() {
    let mut pipeline = Pipeline::new(filer::spec(), ReceivedDateFilter::default());
    let mut loader = BatchLoader::new(MemoryStore::new(), 500, 1);

    let summary = loader.load(&mut pipeline, Vec::new()).unwrap();

    assert_eq!(summary.upsert_calls, 0);
    assert!(loader.store().calls().is_empty());
}

#[test]
fn dedup_index_spans_loads_sharing_a_pipeline() {
    let mut pipeline = Pipeline::new(filer::spec(), ReceivedDateFilter::default());
    let mut loader = BatchLoader::new(MemoryStore::new(), 500, 1);

    let first = loader
        .load(&mut pipeline, rows(&[&[("filerIdent", "1"), ("filerName", "A")]]))
        .unwrap();
    let second = loader
        .load(&mut pipeline, rows(&[&[("filerIdent", "1"), ("filerName", "B")]]))
        .unwrap();

    assert_eq!(first.persisted, 1);
    assert_eq!(second.duplicate, 1);
    assert_eq!(pipeline.index().map(|index| index.len()), Some(1));
    assert_eq!(loader.store().get(EntityKind::Filer, "1").unwrap()["name"], "A");
}
