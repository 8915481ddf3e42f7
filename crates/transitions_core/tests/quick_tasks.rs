use rusqlite::Connection;
use transitions_core::db::open_db_in_memory;
use transitions_core::{QuickTaskService, SqliteQuickTaskRepository};
use uuid::Uuid;

fn quick_service(conn: &Connection) -> QuickTaskService<SqliteQuickTaskRepository<'_>> {
    let repo = SqliteQuickTaskRepository::try_new(conn).unwrap();
    QuickTaskService::new(repo)
}

fn set_created_at(conn: &Connection, id: Uuid, created_at: i64) {
    conn.execute(
        "UPDATE quick_tasks SET created_at = ?2 WHERE uuid = ?1;",
        rusqlite::params![id.to_string(), created_at],
    )
    .unwrap();
}

#[test]
fn add_trims_titles_and_rejects_blank_input() {
    let conn = open_db_in_memory().unwrap();
    let service = quick_service(&conn);

    let added = service.add("  check inbox  ").unwrap().unwrap();
    assert_eq!(added.title, "check inbox");
    assert!(!added.is_trap);

    assert!(service.add("   ").unwrap().is_none());
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn list_puts_non_traps_first_newest_first_within_groups() {
    let conn = open_db_in_memory().unwrap();
    let service = quick_service(&conn);

    let older_goal = service.add("older goal").unwrap().unwrap();
    let newer_goal = service.add("newer goal").unwrap().unwrap();
    let trap = service.add("phone").unwrap().unwrap();
    service.toggle_trap(trap.id).unwrap();

    set_created_at(&conn, older_goal.id, 1_000);
    set_created_at(&conn, newer_goal.id, 2_000);
    set_created_at(&conn, trap.id, 3_000);

    let listed = service.list().unwrap();
    assert_eq!(
        listed
            .iter()
            .map(|quick| quick.title.as_str())
            .collect::<Vec<_>>(),
        vec!["newer goal", "older goal", "phone"]
    );
}

#[test]
fn toggle_trap_flips_and_returns_the_updated_record() {
    let conn = open_db_in_memory().unwrap();
    let service = quick_service(&conn);

    let quick = service.add("phone").unwrap().unwrap();

    let flipped = service.toggle_trap(quick.id).unwrap().unwrap();
    assert!(flipped.is_trap);

    let back = service.toggle_trap(quick.id).unwrap().unwrap();
    assert!(!back.is_trap);

    assert!(service.toggle_trap(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn rename_keeps_raw_input_and_ignores_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = quick_service(&conn);

    let quick = service.add("check inbox").unwrap().unwrap();

    // Rename is not validated, matching transition task renames.
    service.rename(quick.id, "  ").unwrap();
    let listed = service.list().unwrap();
    assert_eq!(listed[0].title, "  ");

    service.rename(Uuid::new_v4(), "ghost").unwrap();
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn delete_removes_the_record_and_ignores_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = quick_service(&conn);

    let quick = service.add("check inbox").unwrap().unwrap();
    service.delete(quick.id).unwrap();
    assert!(service.list().unwrap().is_empty());

    // Absent ids are absorbed, not surfaced.
    service.delete(quick.id).unwrap();
}
