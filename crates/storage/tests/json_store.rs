use exam_core::model::{QuestionId, QuizHistory, QuizResult, ResultId, TRIMMED_MAX_RESULTS};
use exam_core::time::fixed_now;
use storage::json::JsonHistoryStore;
use storage::repository::{HistoryRepository, SaveOutcome};

fn build_result(tag: i64) -> QuizResult {
    QuizResult {
        id: ResultId::new_random(),
        date: fixed_now() + chrono::Duration::minutes(tag),
        score: 34,
        total_questions: 40,
        percentage: 85,
        passed: true,
        time_taken_secs: 1600,
        topic_performance: Vec::new(),
        questions: None,
        answers: None,
    }
}

fn store_in(dir: &tempfile::TempDir) -> JsonHistoryStore {
    JsonHistoryStore::open(dir.path().join("history.json")).expect("open store")
}

#[tokio::test]
async fn missing_file_loads_as_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let history = store.load().await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn save_and_load_round_trip_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let mut history = QuizHistory::default();
    history.push_result(build_result(1));
    history.push_used_set(vec![QuestionId::new("reg-001"), QuestionId::new("ergo-004")]);

    let outcome = store.save(&history).await.unwrap();
    assert_eq!(outcome, SaveOutcome::written());
    assert!(store.path().exists());

    // a fresh store over the same file sees the same document
    let reopened = JsonHistoryStore::open(store.path()).unwrap();
    let loaded = reopened.load().await.unwrap();
    assert_eq!(loaded, history);
}

#[tokio::test]
async fn appends_accumulate_across_reopens() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = store_in(&dir);
        store.append_result(&build_result(1)).await.unwrap();
        store
            .append_used_set(&[QuestionId::new("risk-010")])
            .await
            .unwrap();
    }

    let store = store_in(&dir);
    store.append_result(&build_result(2)).await.unwrap();

    let history = store.load().await.unwrap();
    assert_eq!(history.results.len(), 2);
    assert_eq!(history.used_question_sets.len(), 1);
}

#[tokio::test]
async fn quota_pressure_persists_a_trimmed_document() {
    let dir = tempfile::tempdir().unwrap();

    let mut history = QuizHistory::default();
    for tag in 0..30 {
        history.push_result(build_result(tag));
    }
    let full_len = serde_json::to_string(&history).unwrap().len();
    let trimmed_len = serde_json::to_string(&history.trimmed()).unwrap().len();

    let store = store_in(&dir).with_quota((full_len + trimmed_len) / 2);
    let outcome = store.save(&history).await.unwrap();
    assert!(outcome.success);
    assert!(outcome.trimmed);

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.results.len(), TRIMMED_MAX_RESULTS);
}

#[tokio::test]
async fn rejected_write_leaves_the_previous_file_intact() {
    let dir = tempfile::tempdir().unwrap();

    let mut oversized = QuizHistory::default();
    for tag in 0..50 {
        oversized.push_result(build_result(tag));
    }
    let trimmed_len = serde_json::to_string(&oversized.trimmed()).unwrap().len();

    let store = store_in(&dir).with_quota(trimmed_len / 2);
    store.append_result(&build_result(0)).await.unwrap();
    let before = store.load().await.unwrap();

    let outcome = store.save(&oversized).await.unwrap();
    assert_eq!(outcome, SaveOutcome::rejected());
    assert_eq!(store.load().await.unwrap(), before);
}

#[tokio::test]
async fn clear_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.append_result(&build_result(1)).await.unwrap();
    assert!(store.path().exists());

    store.clear().await.unwrap();
    assert!(!store.path().exists());
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_file_surfaces_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{definitely not a history document").unwrap();

    let store = JsonHistoryStore::open(&path).unwrap();
    let err = store.load().await.unwrap_err();
    assert!(matches!(
        err,
        storage::repository::StorageError::Serialization(_)
    ));
}
