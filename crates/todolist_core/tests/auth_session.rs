use todolist_core::{
    AuthContainer, KvStore, ManualClock, MemoryStore, SqliteStore, TodoContainer, UiContainer,
    View, USER_KEY,
};

use chrono::Utc;

#[test]
fn login_always_succeeds_and_persists_a_session() {
    let store = MemoryStore::new();
    let mut auth = AuthContainer::new(&store);
    let mut ui = UiContainer::new(ManualClock::new(Utc::now()));
    ui.set_current_view(View::Login);

    auth.login(&mut ui, "ada@example.com", "any-password").unwrap();

    assert!(auth.is_logged_in());
    assert_eq!(auth.current_user().unwrap().email, "ada@example.com");
    assert_eq!(ui.current_view(), View::Dashboard);
    assert!(store.get(USER_KEY).unwrap().is_some());
}

#[test]
fn logout_then_login_starts_a_fresh_session() {
    let store = MemoryStore::new();
    let mut auth = AuthContainer::new(&store);
    let mut ui = UiContainer::new(ManualClock::new(Utc::now()));

    auth.login(&mut ui, "ada@example.com", "pw").unwrap();
    let first_id = auth.current_user().unwrap().id;

    auth.logout(&mut ui).unwrap();
    assert!(!auth.is_logged_in());
    assert_eq!(ui.current_view(), View::Login);
    assert_eq!(store.get(USER_KEY).unwrap(), None);

    auth.login(&mut ui, "ada@example.com", "different-pw").unwrap();
    assert!(auth.is_logged_in());
    assert_ne!(auth.current_user().unwrap().id, first_id);
}

#[test]
fn session_survives_container_rebuild_over_the_same_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut ui = UiContainer::new(ManualClock::new(Utc::now()));
    let original_id = {
        let mut auth = AuthContainer::new(&store);
        auth.signup(&mut ui, "ada@example.com", "pw", Some("Ada")).unwrap();
        auth.current_user().unwrap().id
    };

    let mut auth = AuthContainer::new(&store);
    assert!(auth.is_loading());
    auth.check_status().unwrap();

    assert!(!auth.is_loading());
    let restored = auth.current_user().unwrap();
    assert_eq!(restored.id, original_id);
    assert_eq!(restored.name.as_deref(), Some("Ada"));
}

#[test]
fn corrupt_session_record_surfaces_an_error_and_no_session() {
    let store = MemoryStore::new();
    store.set(USER_KEY, "not-a-user-record").unwrap();

    let mut auth = AuthContainer::new(&store);
    auth.check_status().unwrap_err();

    assert!(!auth.is_loading());
    assert!(!auth.is_logged_in());
    assert_eq!(auth.error(), Some("Failed to check authentication status"));
}

#[test]
fn each_session_sees_its_own_todo_list() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(Utc::now());
    let mut auth = AuthContainer::new(&store);
    let mut ui = UiContainer::new(clock.clone());
    let mut todos = TodoContainer::new(&store, clock);

    auth.login(&mut ui, "ada@example.com", "pw").unwrap();
    let ada = auth.current_user().unwrap().clone();
    todos.create_todo(Some(&ada), "Ada's task", None).unwrap();

    // A new login mints a new user id, so the per-user key differs.
    auth.logout(&mut ui).unwrap();
    auth.login(&mut ui, "grace@example.com", "pw").unwrap();
    let grace = auth.current_user().unwrap().clone();

    todos.fetch_todos(Some(&grace)).unwrap();
    assert!(todos.todos().is_empty());

    todos.fetch_todos(Some(&ada)).unwrap();
    assert_eq!(todos.todos().len(), 1);
    assert_eq!(todos.todos()[0].title, "Ada's task");
}
