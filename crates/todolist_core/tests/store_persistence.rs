use chrono::Utc;
use todolist_core::{
    AuthContainer, KvStore, ManualClock, SqliteStore, TodoContainer, UiContainer, USER_KEY,
};

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolist.db");

    let user = {
        let store = SqliteStore::open(&path).unwrap();
        let clock = ManualClock::new(Utc::now());
        let mut auth = AuthContainer::new(&store);
        let mut ui = UiContainer::new(clock.clone());
        auth.login(&mut ui, "ada@example.com", "pw").unwrap();
        let user = auth.current_user().unwrap().clone();

        let mut todos = TodoContainer::new(&store, clock);
        todos.create_todo(Some(&user), "survives reopen", None).unwrap();
        user
    };

    let store = SqliteStore::open(&path).unwrap();
    let mut auth = AuthContainer::new(&store);
    auth.check_status().unwrap();
    assert_eq!(auth.current_user().unwrap().id, user.id);

    let mut todos = TodoContainer::new(&store, ManualClock::new(Utc::now()));
    todos.fetch_todos(Some(&user)).unwrap();
    assert_eq!(todos.todos().len(), 1);
    assert_eq!(todos.todos()[0].title, "survives reopen");
}

#[test]
fn removing_the_session_key_does_not_touch_todo_keys() {
    let store = SqliteStore::open_in_memory().unwrap();
    let clock = ManualClock::new(Utc::now());
    let mut auth = AuthContainer::new(&store);
    let mut ui = UiContainer::new(clock.clone());
    auth.login(&mut ui, "ada@example.com", "pw").unwrap();
    let user = auth.current_user().unwrap().clone();

    let mut todos = TodoContainer::new(&store, clock);
    todos.create_todo(Some(&user), "kept", None).unwrap();

    auth.logout(&mut ui).unwrap();

    assert_eq!(store.get(USER_KEY).unwrap(), None);
    todos.fetch_todos(Some(&user)).unwrap();
    assert_eq!(todos.todos().len(), 1);
}

#[test]
fn stored_todo_list_is_a_json_array_of_camel_case_records() {
    let store = SqliteStore::open_in_memory().unwrap();
    let clock = ManualClock::new(Utc::now());
    let user = todolist_core::User::synthesize("ada@example.com", None);
    let mut todos = TodoContainer::new(&store, clock);
    todos.create_todo(Some(&user), "Buy milk", Some("2%")).unwrap();

    let raw = store.get(&todolist_core::todos_key(user.id)).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("title").unwrap(), "Buy milk");
    assert_eq!(records[0].get("userId").unwrap(), &serde_json::json!(user.id));
    assert!(records[0].get("createdAt").unwrap().as_str().is_some());
}
