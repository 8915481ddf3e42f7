use rusqlite::Connection;
use transitions_core::db::open_db_in_memory;
use transitions_core::{
    SqliteTemplateRepository, SqliteTransitionRepository, Template, TemplateService, Transition,
    TransitionRepository, TransitionService,
};

fn service(conn: &mut Connection) -> TransitionService<SqliteTransitionRepository<'_>> {
    let repo = SqliteTransitionRepository::try_new(conn).unwrap();
    TransitionService::initialize(repo).unwrap()
}

fn load_active(conn: &mut Connection) -> Transition {
    let repo = SqliteTransitionRepository::try_new(conn).unwrap();
    repo.get_active().unwrap().expect("active transition exists")
}

fn capture_current(conn: &mut Connection) -> Template {
    let snapshot = load_active(conn);
    let repo = SqliteTemplateRepository::try_new(conn).unwrap();
    TemplateService::new(repo).capture(&snapshot).unwrap()
}

#[test]
fn capture_snapshots_title_tasks_and_completion_state() {
    let mut conn = open_db_in_memory().unwrap();

    {
        let mut service = service(&mut conn);
        service.rename_transition("Morning routine").unwrap();
        service.add_task("Email", false).unwrap();
        service.add_task("Scroll feed", true).unwrap();
        let email_id = service.current().tasks[0].id;
        service.toggle_completed(email_id).unwrap();
    }

    let template = capture_current(&mut conn);
    assert_eq!(template.title, "Morning routine");
    assert_eq!(template.tasks.len(), 2);
    // Capture is a raw snapshot: completion state is kept, not reset.
    assert!(template.tasks[0].completed);
    assert!(template.tasks[1].is_trap);
}

#[test]
fn replay_into_a_fresh_transition_matches_the_template() {
    let mut conn = open_db_in_memory().unwrap();

    {
        let mut service = service(&mut conn);
        service.rename_transition("Morning routine").unwrap();
        service.add_task("Email", false).unwrap();
        service.add_task("Scroll feed", true).unwrap();
        service.add_task("Write report", false).unwrap();
        let email_id = service.current().tasks[0].id;
        service.toggle_completed(email_id).unwrap();
    }

    let template = capture_current(&mut conn);
    let template_ids: Vec<_> = template.tasks.iter().map(|task| task.id).collect();

    let mut service = service(&mut conn);
    service.archive(60).unwrap();
    service.replay_template(&template).unwrap();

    let current = service.current();
    assert_eq!(current.display_title(), "Morning routine");
    assert_eq!(
        current
            .tasks
            .iter()
            .map(|task| (task.title.as_str(), task.is_trap))
            .collect::<Vec<_>>(),
        vec![
            ("Email", false),
            ("Write report", false),
            ("Scroll feed", true)
        ]
    );
    // Replay always starts tasks uncompleted and never reuses stored ids.
    assert!(current.tasks.iter().all(|task| !task.completed));
    assert!(current
        .tasks
        .iter()
        .all(|task| !template_ids.contains(&task.id)));
}

#[test]
fn replay_overwrites_a_manually_edited_title() {
    let mut conn = open_db_in_memory().unwrap();

    {
        let mut service = service(&mut conn);
        service.rename_transition("Template name").unwrap();
    }
    let template = capture_current(&mut conn);

    let mut service = service(&mut conn);
    service.rename_transition("Hand-edited title").unwrap();
    service.replay_template(&template).unwrap();

    assert_eq!(service.current().display_title(), "Template name");
}

#[test]
fn replay_appends_behind_existing_tasks_and_keeps_the_partition() {
    let mut conn = open_db_in_memory().unwrap();

    {
        let mut service = service(&mut conn);
        service.add_task("Tpl goal", false).unwrap();
        service.add_task("Tpl trap", true).unwrap();
    }
    let template = capture_current(&mut conn);

    let mut service = service(&mut conn);
    service.archive(30).unwrap();
    service.add_task("Existing goal", false).unwrap();
    service.add_task("Existing trap", true).unwrap();
    service.replay_template(&template).unwrap();

    assert_eq!(
        service
            .current()
            .tasks
            .iter()
            .map(|task| task.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Existing goal", "Tpl goal", "Existing trap", "Tpl trap"]
    );
}

#[test]
fn capture_appends_a_new_record_every_time() {
    let mut conn = open_db_in_memory().unwrap();

    {
        let mut service = service(&mut conn);
        service.add_task("Email", false).unwrap();
    }

    let first = capture_current(&mut conn);
    let second = capture_current(&mut conn);
    assert_ne!(first.id, second.id);

    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
    let templates = TemplateService::new(repo).list().unwrap();
    assert_eq!(templates.len(), 2);
}

#[test]
fn get_returns_stored_template_or_none() {
    let mut conn = open_db_in_memory().unwrap();

    {
        let mut service = service(&mut conn);
        service.add_task("Email", false).unwrap();
    }
    let captured = capture_current(&mut conn);

    let repo = SqliteTemplateRepository::try_new(&conn).unwrap();
    let templates = TemplateService::new(repo);

    let loaded = templates.get(captured.id).unwrap().unwrap();
    assert_eq!(loaded, captured);
    assert!(templates.get(uuid::Uuid::new_v4()).unwrap().is_none());
}
