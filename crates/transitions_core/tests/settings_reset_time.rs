use transitions_core::db::open_db_in_memory;
use transitions_core::{SettingsService, SettingsServiceError, SqliteSettingsRepository};

#[test]
fn reset_time_defaults_to_midnight() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::try_new(&conn).unwrap();
    let service = SettingsService::new(repo);

    assert_eq!(service.reset_time().unwrap(), "00:00");
}

#[test]
fn update_persists_a_trimmed_valid_value() {
    let conn = open_db_in_memory().unwrap();

    {
        let repo = SqliteSettingsRepository::try_new(&conn).unwrap();
        let service = SettingsService::new(repo);
        let stored = service.update_reset_time(" 09:30 ").unwrap();
        assert_eq!(stored, "09:30");
    }

    // A fresh service over the same store sees the persisted value.
    let repo = SqliteSettingsRepository::try_new(&conn).unwrap();
    let service = SettingsService::new(repo);
    assert_eq!(service.reset_time().unwrap(), "09:30");
}

#[test]
fn update_rejects_malformed_values_and_keeps_the_old_one() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::try_new(&conn).unwrap();
    let service = SettingsService::new(repo);

    service.update_reset_time("07:15").unwrap();

    for bad in ["9:30", "24:00", "12:60", "aa:bb", ""] {
        let err = service.update_reset_time(bad).unwrap_err();
        assert!(
            matches!(err, SettingsServiceError::InvalidResetTime(_)),
            "`{bad}` should be rejected"
        );
    }

    assert_eq!(service.reset_time().unwrap(), "07:15");
}
