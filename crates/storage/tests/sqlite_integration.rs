use chrono::Duration;
use quiz_core::model::{Category, CategoryFilter, HistoryEntry};
use quiz_core::time::fixed_now;
use storage::history::HISTORY_SLOT_KEY;
use storage::question_bank::read_question_bank;
use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

fn entry(minutes: i64, correct: u32, total: u32) -> HistoryEntry {
    HistoryEntry::new(
        fixed_now() + Duration::minutes(minutes),
        CategoryFilter::Only(Category::Calculation),
        correct,
        total,
    )
    .unwrap()
}

#[tokio::test]
async fn sqlite_slots_round_trip_and_overwrite() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_slots?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Running migrations twice is a no-op.
    repo.migrate().await.expect("migrate again");

    assert_eq!(repo.get_slot("k").await.unwrap(), None);
    repo.put_slot("k", "[]").await.unwrap();
    repo.put_slot("k", "[1]").await.unwrap();
    assert_eq!(repo.get_slot("k").await.unwrap().as_deref(), Some("[1]"));
}

#[tokio::test]
async fn sqlite_history_keeps_newest_entries() {
    let storage = Storage::sqlite("sqlite:file:memdb_history?mode=memory&cache=shared", 20)
        .await
        .expect("storage");

    for i in 0..21 {
        storage.history.append(&entry(i, 1, 2)).await.unwrap();
    }

    let loaded = storage.history.load().await.unwrap();
    assert_eq!(loaded.len(), 20);
    assert_eq!(loaded[0], entry(20, 1, 2));
    assert_eq!(loaded[19], entry(1, 1, 2));

    let raw = storage
        .slots
        .get_slot(HISTORY_SLOT_KEY)
        .await
        .unwrap()
        .expect("history slot written");
    assert!(raw.starts_with('['));

    let agg = storage.history.aggregate().await.unwrap();
    assert_eq!(agg.total_questions, 40);
    assert_eq!(agg.correct_answers, 20);
    assert_eq!(agg.accuracy, 50);
}

#[test]
fn fixture_bank_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bank.json");
    let bank = read_question_bank(path).expect("bank");
    assert_eq!(bank.len(), 6);
    let journal = bank
        .iter()
        .filter(|q| q.category() == Category::Journal)
        .count();
    assert_eq!(journal, 3);
}
