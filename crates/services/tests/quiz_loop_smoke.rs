use std::sync::Arc;

use exam_core::model::{
    Choice, Difficulty, Question, QuestionId, QuestionType, Topic,
};
use exam_core::time::{fixed_clock, fixed_now};
use services::{HistoryService, QuizLoopService};
use storage::json::JsonHistoryStore;
use storage::repository::{HistoryRepository, InMemoryHistoryStore};

fn build_question(id: &str, topic: Topic, question_type: QuestionType) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Question {id}"),
        question_type,
        topic,
        vec![
            Choice::new("Correct answer", true),
            Choice::new("Wrong answer", false),
            Choice::new("Other wrong answer", false),
        ],
        "Because of the safety code.",
        Difficulty::Medium,
    )
    .unwrap()
}

fn build_bank() -> Vec<Question> {
    let mut bank = Vec::new();
    for topic in Topic::ALL {
        let quota = topic.quota();
        let situational = topic.situational_quota().unwrap_or(0);
        for i in 0..situational {
            bank.push(build_question(
                &format!("{topic:?}-sit-{i}"),
                topic,
                QuestionType::Situational,
            ));
        }
        for i in 0..(quota - situational) {
            bank.push(build_question(
                &format!("{topic:?}-kno-{i}"),
                topic,
                QuestionType::Knowledge,
            ));
        }
    }
    bank
}

fn correct_choice(session: &services::QuizSession, index: usize) -> usize {
    session.questions()[index]
        .shuffled_choices()
        .iter()
        .position(Choice::is_correct)
        .unwrap()
}

#[tokio::test]
async fn full_quiz_loop_scores_and_persists() {
    let store = InMemoryHistoryStore::new();
    let loop_svc = QuizLoopService::new(fixed_clock(), Arc::new(store.clone()));
    let history_svc = HistoryService::new(Arc::new(store.clone()));

    let bank = build_bank();
    let mut session = loop_svc.start_quiz(&bank).await.unwrap();
    assert_eq!(session.total_questions(), 40);

    // simulate roughly a minute of exam time, then answer everything correctly
    for _ in 0..60 {
        session.tick();
    }
    for index in 0..session.total_questions() {
        let choice = correct_choice(&session, index);
        session.answer(index, choice);
        session.next();
    }
    assert_eq!(session.answered_count(), 40);

    let outcome = loop_svc.finish_quiz(&mut session).await.unwrap();
    assert!(outcome.saved.success);
    assert_eq!(outcome.result.score, 40);
    assert_eq!(outcome.result.percentage, 100);
    assert!(outcome.result.passed);
    assert_eq!(outcome.result.time_taken_secs, 60);
    assert_eq!(outcome.result.topic_performance.len(), 5);

    let history = store.load().await.unwrap();
    assert_eq!(history.results.len(), 1);
    assert_eq!(history.used_question_sets.len(), 1);
    assert_eq!(history.last_quiz_date, Some(fixed_now()));

    let stats = history_svc.statistics().await.unwrap();
    assert_eq!(stats.total_quizzes, 1);
    assert_eq!(stats.best_percentage, 100);
    assert_eq!(stats.pass_rate_percent, 100.0);
    assert_eq!(stats.recent_trend, vec![100]);
}

#[tokio::test]
async fn partially_answered_quiz_fails_below_threshold() {
    let loop_svc = QuizLoopService::new(fixed_clock(), Arc::new(InMemoryHistoryStore::new()));

    let bank = build_bank();
    let mut session = loop_svc.start_quiz(&bank).await.unwrap();

    // 31 correct answers is 77.5 %, rounded to 78, still a fail
    for index in 0..31 {
        let choice = correct_choice(&session, index);
        session.answer(index, choice);
    }

    let outcome = loop_svc.finish_quiz(&mut session).await.unwrap();
    assert_eq!(outcome.result.score, 31);
    assert_eq!(outcome.result.percentage, 78);
    assert!(!outcome.result.passed);
}

#[tokio::test]
async fn quiz_loop_round_trips_through_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    {
        let store = JsonHistoryStore::open(&path).unwrap();
        let loop_svc = QuizLoopService::new(fixed_clock(), Arc::new(store));

        let bank = build_bank();
        let mut session = loop_svc.start_quiz(&bank).await.unwrap();
        session.answer(0, correct_choice(&session, 0));
        loop_svc.finish_quiz(&mut session).await.unwrap();
    }

    // everything survives a process restart
    let store = JsonHistoryStore::open(&path).unwrap();
    let history_svc = HistoryService::new(Arc::new(store));
    let results = history_svc.results_newest_first().await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 1);
    assert!(results[0].supports_review());

    let exported = history_svc.export_json().await.unwrap();
    let reimported = history_svc.import_json(&exported).await.unwrap();
    assert!(reimported.success);
}
