use rusqlite::Connection;
use transitions_core::db::open_db_in_memory;
use transitions_core::{SqliteTransitionRepository, TaskId, TransitionService};
use uuid::Uuid;

fn service(conn: &mut Connection) -> TransitionService<SqliteTransitionRepository<'_>> {
    let repo = SqliteTransitionRepository::try_new(conn).unwrap();
    TransitionService::initialize(repo).unwrap()
}

fn titles(service: &TransitionService<SqliteTransitionRepository<'_>>) -> Vec<String> {
    service
        .current()
        .tasks
        .iter()
        .map(|task| task.title.clone())
        .collect()
}

#[test]
fn initialize_seeds_the_first_transition() {
    let mut conn = open_db_in_memory().unwrap();
    let service = service(&mut conn);

    let current = service.current();
    assert_eq!(current.number, 1);
    assert_eq!(current.display_title(), "Transition 1");
    assert!(current.tasks.is_empty());
    assert!(current.start_time > 0);
}

#[test]
fn initialize_is_idempotent_across_restarts() {
    let mut conn = open_db_in_memory().unwrap();

    let first_id = {
        let service = service(&mut conn);
        service.current().id
    };

    // A second initialize against the same store must return the same
    // transition, not create a duplicate or reset it.
    let service = service(&mut conn);
    assert_eq!(service.current().id, first_id);
    assert_eq!(service.current().number, 1);
}

#[test]
fn added_tasks_keep_non_traps_before_traps() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.add_task("Email", false).unwrap();
    service.add_task("Scroll feed", true).unwrap();
    service.add_task("Write report", false).unwrap();

    assert_eq!(titles(&service), vec!["Email", "Write report", "Scroll feed"]);
    assert_eq!(
        service
            .current()
            .tasks
            .iter()
            .map(|task| task.is_trap)
            .collect::<Vec<_>>(),
        vec![false, false, true]
    );
}

#[test]
fn blank_title_add_is_a_silent_noop() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.add_task("Email", false).unwrap();
    let before = service.current().clone();

    service.add_task("   ", false).unwrap();
    service.add_task("", true).unwrap();

    assert_eq!(service.current(), &before);
}

#[test]
fn toggle_completed_flips_without_reordering() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.add_task("Email", false).unwrap();
    service.add_task("Scroll feed", true).unwrap();
    let email_id = service.current().tasks[0].id;

    service.toggle_completed(email_id).unwrap();
    assert!(service.current().tasks[0].completed);
    assert_eq!(titles(&service), vec!["Email", "Scroll feed"]);

    service.toggle_completed(email_id).unwrap();
    assert!(!service.current().tasks[0].completed);
}

#[test]
fn toggle_trap_reapplies_the_stable_partition() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.add_task("a", false).unwrap();
    service.add_task("b", false).unwrap();
    service.add_task("c", false).unwrap();
    let b_id = service.current().tasks[1].id;

    service.toggle_trap(b_id).unwrap();
    assert_eq!(titles(&service), vec!["a", "c", "b"]);
    assert!(service.current().tasks[2].is_trap);

    // Untrapping appends back behind the other non-traps; insertion
    // order is not restored once a toggle has happened.
    service.toggle_trap(b_id).unwrap();
    assert_eq!(titles(&service), vec!["a", "c", "b"]);
    assert!(!service.current().tasks[2].is_trap);
}

#[test]
fn unknown_task_ids_are_silent_noops() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.add_task("Email", false).unwrap();
    let before = service.current().clone();
    let ghost: TaskId = Uuid::new_v4();

    service.toggle_completed(ghost).unwrap();
    service.toggle_trap(ghost).unwrap();
    service.rename_task(ghost, "renamed").unwrap();
    service.delete_task(ghost).unwrap();

    assert_eq!(service.current(), &before);
}

#[test]
fn rename_task_accepts_any_string_including_blank() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.add_task("Email", false).unwrap();
    let task_id = service.current().tasks[0].id;

    // Only creation validates titles; rename keeps the raw input.
    service.rename_task(task_id, "   ").unwrap();
    assert_eq!(service.current().tasks[0].title, "   ");

    service.rename_task(task_id, "Inbox zero").unwrap();
    assert_eq!(service.current().tasks[0].title, "Inbox zero");
}

#[test]
fn delete_task_removes_the_matching_entry() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.add_task("Email", false).unwrap();
    service.add_task("Write report", false).unwrap();
    let email_id = service.current().tasks[0].id;

    service.delete_task(email_id).unwrap();
    assert_eq!(titles(&service), vec!["Write report"]);
}

#[test]
fn rename_transition_stores_titles_and_falls_back_on_blank() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = service(&mut conn);

    service.rename_transition("Morning focus").unwrap();
    assert_eq!(service.current().title.as_deref(), Some("Morning focus"));

    service.rename_transition("   ").unwrap();
    assert_eq!(service.current().title.as_deref(), Some("Transition 1"));
}

#[test]
fn mutations_survive_a_reload_from_the_store() {
    let mut conn = open_db_in_memory().unwrap();

    let expected = {
        let mut service = service(&mut conn);
        service.add_task("Email", false).unwrap();
        service.add_task("Scroll feed", true).unwrap();
        let email_id = service.current().tasks[0].id;
        service.toggle_completed(email_id).unwrap();
        service.rename_transition("Morning focus").unwrap();
        service.current().clone()
    };

    let reloaded = service(&mut conn);
    assert_eq!(reloaded.current(), &expected);
}
