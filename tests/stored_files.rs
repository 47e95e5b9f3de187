mod common;

use common::FakeApi;
use storx::stored_files::resolve_stored_files;
use storx::summary::fetch_summary;

fn api_with_files(names: &[&str]) -> FakeApi {
    FakeApi {
        stored_files: names.iter().map(|n| n.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn storers_are_resolved_per_file_in_listing_order() {
    let mut api = api_with_files(&[
        "20240301120000c.html",
        "20230615142233reportA.html",
        "plain-name",
    ]);
    api.storers
        .insert("20230615142233reportA.html".into(), vec!["s1".into(), "s2".into()]);
    api.storers
        .insert("20240301120000c.html".into(), vec!["s3".into()]);

    let files = resolve_stored_files(&api).await.unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.original_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["20240301120000c.html", "20230615142233reportA.html", "plain-name"]
    );
    assert_eq!(files[0].storers, vec!["s3".to_string()]);
    assert_eq!(files[1].title(), "reportA");
    assert_eq!(files[1].date_time, "15/06/2023 14:22:33");
    assert_eq!(files[1].storer_count(), 2);
    // Undated keys keep their whole name
    assert_eq!(files[2].title(), "plain-name");
    assert!(!files[2].key.stamped);
}

#[tokio::test]
async fn failing_storer_lookup_only_empties_that_file() {
    let mut api = api_with_files(&["20230615142233a.html", "20230615142234b.html"]);
    api.storers
        .insert("20230615142234b.html".into(), vec!["s1".into()]);
    api.failing_storers.push("20230615142233a.html".into());

    let files = resolve_stored_files(&api).await.unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].storers.is_empty());
    assert_eq!(files[1].storers, vec!["s1".to_string()]);
}

#[tokio::test]
async fn empty_listing_makes_no_storer_calls() {
    let api = FakeApi::default();
    let files = resolve_stored_files(&api).await.unwrap();
    assert!(files.is_empty());
    assert_eq!(api.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn summary_figures_fall_back_to_zero() {
    let api = FakeApi {
        fail_summary: true,
        ..Default::default()
    };
    let s = fetch_summary(&api).await;
    assert_eq!(s.archived_storage, "0");
    assert_eq!(s.total_contracts, "0");
    assert_eq!(s.total_coins, "5000");
}
