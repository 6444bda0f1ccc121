use frecent_core::db::migrations::latest_version;
use frecent_core::{
    open_store_in_memory, IdentityValidationError, RepoIdentity, RepositoryResolver, SqliteStore,
    StoreError,
};
use rusqlite::Connection;

fn identity() -> RepoIdentity {
    RepoIdentity::new("O_1", "octo", "R_1", "widgets")
}

#[test]
fn resolving_twice_creates_one_owner_and_one_repository() {
    let mut conn = open_store_in_memory().unwrap();
    {
        let mut store = SqliteStore::try_new(&mut conn).unwrap();
        store.resolve_repository(&identity()).unwrap();
        store.resolve_repository(&identity()).unwrap();
    }

    assert_eq!(count(&conn, "owners"), 1);
    assert_eq!(count(&conn, "repositories"), 1);
}

#[test]
fn resolver_returns_handle_with_validated_identifiers() {
    let mut conn = open_store_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&mut conn).unwrap();

    let handle = store.resolve_repository(&identity()).unwrap();
    assert_eq!(handle.repository_id(), "R_1");
    assert_eq!(handle.owner_id(), "O_1");
}

#[test]
fn two_repositories_share_one_owner_row() {
    let mut conn = open_store_in_memory().unwrap();
    {
        let mut store = SqliteStore::try_new(&mut conn).unwrap();
        store.resolve_repository(&identity()).unwrap();
        store
            .resolve_repository(&RepoIdentity::new("O_1", "octo", "R_2", "gadgets"))
            .unwrap();
    }

    assert_eq!(count(&conn, "owners"), 1);
    assert_eq!(count(&conn, "repositories"), 2);
}

#[test]
fn blank_identifiers_are_rejected_before_any_io() {
    let mut conn = open_store_in_memory().unwrap();
    {
        let mut store = SqliteStore::try_new(&mut conn).unwrap();

        let mut blank_owner = identity();
        blank_owner.owner_id = "  ".to_string();
        let err = store.resolve_repository(&blank_owner).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(IdentityValidationError::BlankOwnerId)
        ));

        let mut blank_repo = identity();
        blank_repo.repo_id = String::new();
        let err = store.resolve_repository(&blank_repo).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(IdentityValidationError::BlankRepositoryId)
        ));
    }

    assert_eq!(count(&conn, "owners"), 0);
    assert_eq!(count(&conn, "repositories"), 0);
}

#[test]
fn conflicting_owner_name_surfaces_constraint_violation() {
    let mut conn = open_store_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&mut conn).unwrap();

    store.resolve_repository(&identity()).unwrap();
    // Same display name under a different stable id is not a lost race;
    // it violates owner-name uniqueness and must propagate.
    let err = store
        .resolve_repository(&RepoIdentity::new("O_2", "octo", "R_9", "forks"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
}

#[test]
fn mark_queried_timestamps_roundtrip() {
    let mut conn = open_store_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&mut conn).unwrap();

    let handle = store.resolve_repository(&identity()).unwrap();

    let fresh = store.repository(handle.repository_id()).unwrap().unwrap();
    assert_eq!(fresh.last_queried_issues, None);
    assert_eq!(fresh.last_queried_prs, None);

    store
        .mark_issues_queried(handle.repository_id(), 1_111)
        .unwrap();
    store
        .mark_pull_requests_queried(handle.repository_id(), 2_222)
        .unwrap();

    let record = store.repository(handle.repository_id()).unwrap().unwrap();
    assert_eq!(record.id, "R_1");
    assert_eq!(record.name, "widgets");
    assert_eq!(record.owner_id, "O_1");
    assert_eq!(record.last_queried_issues, Some(1_111));
    assert_eq!(record.last_queried_prs, Some(2_222));
}

#[test]
fn mark_queried_on_unknown_repository_returns_not_found() {
    let mut conn = open_store_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&mut conn).unwrap();

    let err = store.mark_issues_queried("R_missing", 1).unwrap_err();
    assert!(matches!(err, StoreError::RepositoryNotFound(id) if id == "R_missing"));
}

#[test]
fn unknown_repository_reads_back_as_none() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();

    assert!(store.repository("R_missing").unwrap().is_none());
}

#[test]
fn store_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    match SqliteStore::try_new(&mut conn) {
        Err(StoreError::UninitializedStore {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized store error"),
    }
}

#[test]
fn store_rejects_connection_missing_required_table() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStore::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("owners"))
    ));
}

fn count(conn: &Connection, table: &str) -> i64 {
    // Test-local helper; table names here are fixed literals.
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
