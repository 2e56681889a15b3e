use std::sync::Arc;

use chrono::Duration;
use lesson_core::model::{
    AssessmentView, ChecklistView, ModuleConfig, PageView, ProgressView, QuizView, RatingItem,
    ReflectionView, TaskItem,
};
use lesson_core::namespace::{Namespace, Week};
use lesson_core::time::{fixed_clock, fixed_now};
use services::{ModuleServices, ResetConfirmation, ResetOutcome};
use storage::repository::{InMemoryStore, Storage};

fn build_page() -> PageView {
    PageView {
        progress: Some(ProgressView::new()),
        quizzes: vec![
            QuizView::new("b", ["a", "b", "c"])
                .unwrap()
                .with_id("quiz-ethics"),
        ],
        reflections: vec![ReflectionView::new()],
        checklists: vec![ChecklistView::new(2).with_id("readings")],
        tasks: vec![TaskItem::default(), TaskItem::default()],
        assessments: vec![AssessmentView::new(vec![
            RatingItem::new(["1", "2", "3", "4", "5"]).unwrap(),
            RatingItem::new(["1", "2", "3", "4", "5"]).unwrap(),
        ])],
        ..PageView::new()
    }
}

fn build_services(storage: &Storage) -> ModuleServices {
    ModuleServices::with_namespace(
        storage.clone(),
        &ModuleConfig::default(),
        Namespace::new("module", Week::new(1)),
        fixed_clock(),
    )
}

async fn run_session(services: &ModuleServices, page: &mut PageView) {
    let now = fixed_now();

    services.tasks().set_checked(page, 0, true).await;
    services.checklists().set_checked(page, 0, 0, true).await;

    services.quizzes().select_option(page, 0, 1);
    services.quizzes().submit(page, 0).await;

    services
        .reflections()
        .handle_input(page, 0, "r".repeat(60), now)
        .await;
    services
        .reflections()
        .tick(page, now + Duration::seconds(1))
        .await;

    services.assessments().select_rating(page, 0, 0, 3).await;
}

#[tokio::test]
async fn full_session_persists_and_aggregates() {
    let storage = Storage::in_memory();
    let services = build_services(&storage);
    let mut page = build_page();

    run_session(&services, &mut page).await;

    // 4 checkboxes + 1 quiz + 1 reflection countable; 4 of 6 complete
    assert_eq!(page.progress.as_ref().unwrap().label, "67%");

    let keys = storage.kv.keys_with_prefix("module_week1").await.unwrap();
    assert_eq!(
        keys,
        vec![
            "module_week1_assessment",
            "module_week1_progress",
            "module_week1_quiz-ethics",
            "module_week1_readings",
            "module_week1_reflection-0",
            "module_week1_tasks",
        ]
    );
}

#[tokio::test]
async fn restore_rebuilds_the_page_and_is_idempotent() {
    let storage = Storage::in_memory();
    let services = build_services(&storage);
    let mut lived = build_page();
    run_session(&services, &mut lived).await;

    // a fresh page, as a reloaded host would build it
    let mut restored = build_page();
    services.loader().restore(&mut restored).await.unwrap();

    assert_eq!(restored.quizzes, lived.quizzes);
    assert_eq!(restored.checklists, lived.checklists);
    assert_eq!(restored.tasks, lived.tasks);
    assert_eq!(restored.assessments, lived.assessments);
    assert_eq!(restored.reflections[0].text, lived.reflections[0].text);
    assert_eq!(
        restored.reflections[0].char_label,
        lived.reflections[0].char_label
    );
    assert_eq!(restored.progress, lived.progress);

    // restoring again over identical stored data changes nothing
    let once = restored.clone();
    services.loader().restore(&mut restored).await.unwrap();
    assert_eq!(restored, once);
}

#[tokio::test]
async fn restored_quiz_stays_locked() {
    let storage = Storage::in_memory();
    let services = build_services(&storage);
    let mut lived = build_page();
    run_session(&services, &mut lived).await;

    let mut restored = build_page();
    services.loader().restore(&mut restored).await.unwrap();

    let before = restored.quizzes[0].clone();
    services.quizzes().select_option(&mut restored, 0, 0);
    services.quizzes().submit(&mut restored, 0).await;
    assert_eq!(restored.quizzes[0], before);
}

#[tokio::test]
async fn export_then_reset_round_trip() {
    let storage = Storage::in_memory();
    let services = build_services(&storage);
    let mut page = build_page();
    run_session(&services, &mut page).await;

    let bundle = services.export().export().await.unwrap();
    assert_eq!(bundle.file_name, "module_week1_progress.json");

    let doc: serde_json::Value = serde_json::from_str(&bundle.json).unwrap();
    let exported: Vec<&String> = doc.as_object().unwrap().keys().collect();
    let stored = storage.kv.keys_with_prefix("module_week1").await.unwrap();
    assert_eq!(
        exported,
        stored.iter().collect::<Vec<_>>(),
        "export must cover exactly the namespaced keys"
    );

    let outcome = services
        .export()
        .reset(ResetConfirmation::Confirmed)
        .await
        .unwrap();
    assert_eq!(outcome, ResetOutcome::ReloadRequested);
    assert!(
        storage
            .kv
            .keys_with_prefix("module_week1")
            .await
            .unwrap()
            .is_empty()
    );

    // after the reload, a fresh page restores to its pristine state
    let mut after_reset = build_page();
    services.loader().restore(&mut after_reset).await.unwrap();
    assert_eq!(after_reset, build_page());
}

#[tokio::test]
async fn full_store_degrades_to_view_only_session() {
    let storage = Storage::new(Arc::new(InMemoryStore::with_capacity(0)));
    let services = build_services(&storage);
    let mut page = build_page();

    run_session(&services, &mut page).await;

    // nothing persisted, but every widget still reflects the interaction
    assert!(storage.kv.keys_with_prefix("module").await.unwrap().is_empty());
    assert!(page.tasks[0].checked);
    assert!(page.quizzes[0].completed);
    assert_eq!(page.progress.as_ref().unwrap().label, "67%");
}
