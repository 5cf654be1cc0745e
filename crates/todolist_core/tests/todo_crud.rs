use chrono::{Duration, Utc};
use std::cell::Cell;
use todolist_core::{
    KvStore, ManualClock, MemoryStore, StoreResult, TodoContainer, TodoError, TodoPatch, User,
};
use uuid::Uuid;

fn session_user() -> User {
    User::synthesize("ada@example.com", None)
}

fn fixture() -> (MemoryStore, ManualClock, User) {
    (MemoryStore::new(), ManualClock::new(Utc::now()), session_user())
}

#[test]
fn create_then_fetch_yields_the_record() {
    let (store, clock, user) = fixture();
    let mut todos = TodoContainer::new(&store, clock.clone());

    let created = todos
        .create_todo(Some(&user), "Buy milk", Some("2% if possible"))
        .unwrap();
    todos.fetch_todos(Some(&user)).unwrap();

    assert_eq!(todos.todos().len(), 1);
    let fetched = &todos.todos()[0];
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.user_id, user.id);
    assert_eq!(fetched.title, "Buy milk");
    assert_eq!(fetched.description.as_deref(), Some("2% if possible"));
    assert!(!fetched.completed);
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[test]
fn toggle_twice_restores_completed_and_never_rewinds_updated_at() {
    let (store, clock, user) = fixture();
    let mut todos = TodoContainer::new(&store, clock.clone());
    let created = todos.create_todo(Some(&user), "Buy milk", None).unwrap();

    clock.advance(Duration::seconds(1));
    todos.toggle_todo(Some(&user), created.id).unwrap();
    let after_first = todos.todos()[0].updated_at;
    assert!(todos.todos()[0].completed);
    assert!(after_first >= created.updated_at);

    clock.advance(Duration::seconds(1));
    todos.toggle_todo(Some(&user), created.id).unwrap();
    assert!(!todos.todos()[0].completed);
    assert!(todos.todos()[0].updated_at >= after_first);
}

#[test]
fn delete_removes_exactly_one_record() {
    let (store, clock, user) = fixture();
    let mut todos = TodoContainer::new(&store, clock);
    let keep = todos.create_todo(Some(&user), "keep", None).unwrap();
    let doomed = todos.create_todo(Some(&user), "drop", None).unwrap();

    todos.delete_todo(Some(&user), doomed.id).unwrap();

    assert_eq!(todos.todos().len(), 1);
    assert_eq!(todos.todos()[0].id, keep.id);

    todos.fetch_todos(Some(&user)).unwrap();
    assert_eq!(todos.todos().len(), 1);
    assert_eq!(todos.todos()[0].id, keep.id);
}

#[test]
fn buy_milk_scenario_runs_end_to_end() {
    let (store, clock, user) = fixture();
    let mut todos = TodoContainer::new(&store, clock.clone());

    let created = todos.create_todo(Some(&user), "Buy milk", None).unwrap();
    assert_eq!(todos.todos().len(), 1);
    assert_eq!(todos.todos()[0].title, "Buy milk");
    assert!(!todos.todos()[0].completed);

    clock.advance(Duration::seconds(1));
    todos.toggle_todo(Some(&user), created.id).unwrap();
    assert!(todos.todos()[0].completed);

    clock.advance(Duration::seconds(1));
    todos
        .update_todo(
            Some(&user),
            created.id,
            &TodoPatch {
                title: Some("Buy oat milk".to_string()),
                ..TodoPatch::default()
            },
        )
        .unwrap();
    assert_eq!(todos.todos()[0].title, "Buy oat milk");
    assert!(todos.todos()[0].completed);

    todos.delete_todo(Some(&user), created.id).unwrap();
    assert!(todos.todos().is_empty());
    todos.fetch_todos(Some(&user)).unwrap();
    assert!(todos.todos().is_empty());
}

#[test]
fn empty_title_fails_validation_and_leaves_list_unchanged() {
    let (store, clock, user) = fixture();
    let mut todos = TodoContainer::new(&store, clock);
    todos.create_todo(Some(&user), "existing", None).unwrap();

    let err = todos.create_todo(Some(&user), "", None).unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)));
    assert_eq!(todos.todos().len(), 1);
    assert!(todos.error().is_some());

    todos.fetch_todos(Some(&user)).unwrap();
    assert_eq!(todos.todos().len(), 1);
}

#[test]
fn mutations_without_session_fail_immediately() {
    let (store, clock, _user) = fixture();
    let mut todos = TodoContainer::new(&store, clock);
    let id = Uuid::new_v4();

    assert!(matches!(
        todos.create_todo(None, "Buy milk", None).unwrap_err(),
        TodoError::NotAuthenticated
    ));
    assert!(matches!(
        todos.update_todo(None, id, &TodoPatch::default()).unwrap_err(),
        TodoError::NotAuthenticated
    ));
    assert!(matches!(
        todos.toggle_todo(None, id).unwrap_err(),
        TodoError::NotAuthenticated
    ));
    assert!(matches!(
        todos.delete_todo(None, id).unwrap_err(),
        TodoError::NotAuthenticated
    ));
}

#[test]
fn fetch_without_session_clears_the_list() {
    let (store, clock, user) = fixture();
    let mut todos = TodoContainer::new(&store, clock);
    todos.create_todo(Some(&user), "Buy milk", None).unwrap();

    todos.fetch_todos(None).unwrap();

    assert!(todos.todos().is_empty());
}

#[test]
fn unknown_id_reports_not_found() {
    let (store, clock, user) = fixture();
    let mut todos = TodoContainer::new(&store, clock);
    todos.create_todo(Some(&user), "Buy milk", None).unwrap();
    let missing = Uuid::new_v4();

    let err = todos.toggle_todo(Some(&user), missing).unwrap_err();
    assert!(matches!(err, TodoError::NotFound(id) if id == missing));
    assert_eq!(todos.todos().len(), 1);
}

#[test]
fn writes_are_visible_to_a_fresh_container() {
    let (store, clock, user) = fixture();
    {
        let mut todos = TodoContainer::new(&store, clock.clone());
        todos.create_todo(Some(&user), "Buy milk", None).unwrap();
    }

    let mut reopened = TodoContainer::new(&store, clock);
    reopened.fetch_todos(Some(&user)).unwrap();
    assert_eq!(reopened.todos().len(), 1);
    assert_eq!(reopened.todos()[0].title, "Buy milk");
}

/// Wrapper store whose writes can be switched off, to exercise the
/// no-partial-write-recovery contract.
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Cell<bool>,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_writes: Cell::new(false),
        }
    }
}

impl KvStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(rusqlite::Error::InvalidQuery.into());
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

#[test]
fn failed_write_diverges_until_next_fetch() {
    let store = FlakyStore::new();
    let clock = ManualClock::new(Utc::now());
    let user = session_user();
    let mut todos = TodoContainer::new(&store, clock);
    todos.create_todo(Some(&user), "persisted", None).unwrap();

    store.fail_writes.set(true);
    let err = todos.create_todo(Some(&user), "lost", None).unwrap_err();
    assert!(matches!(err, TodoError::Store(_)));
    // Memory was updated before the failed write.
    assert_eq!(todos.todos().len(), 2);

    store.fail_writes.set(false);
    todos.fetch_todos(Some(&user)).unwrap();
    assert_eq!(todos.todos().len(), 1);
    assert_eq!(todos.todos()[0].title, "persisted");
}
