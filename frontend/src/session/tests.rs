use super::*;
use fixmycity_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

struct TestContext {
    /// Operation log to verify calling order
    log: RefCell<Vec<String>>,
    /// In-memory key-value entries
    entries: RefCell<HashMap<String, String>>,
    /// Keys that simulate a write failure
    fail_set_keys: RefCell<HashSet<String>>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            log: RefCell::new(Vec::new()),
            entries: RefCell::new(HashMap::new()),
            fail_set_keys: RefCell::new(HashSet::new()),
        }
    }

    fn seed(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

struct TestBackend {
    ctx: Rc<TestContext>,
}

impl SessionBackend for TestBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.ctx.log.borrow_mut().push(format!("get:{}", key));
        self.ctx.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.ctx.log.borrow_mut().push(format!("set:{}", key));
        if self.ctx.fail_set_keys.borrow().contains(key) {
            return false;
        }
        self.ctx
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.ctx.log.borrow_mut().push(format!("remove:{}", key));
        self.ctx.entries.borrow_mut().remove(key).is_some()
    }
}

fn setup() -> (Rc<TestContext>, SessionStore<TestBackend>) {
    let ctx = Rc::new(TestContext::new());
    let store = SessionStore::new(TestBackend { ctx: ctx.clone() });
    (ctx, store)
}

fn make_session() -> Session {
    Session {
        token: "abc".to_string(),
        user: User {
            id_user: 1,
            user_name: "Ann".to_string(),
            user_email: "ann@example.com".to_string(),
            user_photo: None,
            role: None,
        },
    }
}

// =========================================================
// Tests
// =========================================================

#[test]
fn save_writes_exactly_token_and_serialized_user() {
    let (ctx, store) = setup();
    let session = make_session();

    assert!(store.save(&session));

    let entries = ctx.entries.borrow();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries.get(STORAGE_TOKEN_KEY).unwrap(), "abc");
    let raw_user = entries.get(STORAGE_USER_KEY).unwrap();
    let parsed: User = serde_json_wasm::from_str(raw_user).unwrap();
    assert_eq!(parsed, session.user);
}

#[test]
fn save_then_load_roundtrips() {
    let (_, store) = setup();
    let session = make_session();
    assert!(store.save(&session));
    assert_eq!(store.load(), Some(session));
}

#[test]
fn load_from_empty_store_is_unauthenticated() {
    let (ctx, store) = setup();
    assert_eq!(store.load(), None);
    // Nothing was cleared or written
    assert!(ctx.entries.borrow().is_empty());
    assert!(!ctx.log.borrow().iter().any(|op| op.starts_with("remove")));
}

#[test]
fn corrupt_user_record_clears_both_keys() {
    let (ctx, store) = setup();
    ctx.seed(STORAGE_TOKEN_KEY, "abc");
    ctx.seed(STORAGE_USER_KEY, "{not json");

    assert_eq!(store.load(), None);
    assert!(ctx.entries.borrow().is_empty());

    // Idempotent: a second load yields the same result
    assert_eq!(store.load(), None);
}

#[test]
fn token_without_user_is_treated_as_corrupt() {
    let (ctx, store) = setup();
    ctx.seed(STORAGE_TOKEN_KEY, "orphan");

    assert_eq!(store.load(), None);
    assert!(ctx.entries.borrow().is_empty());
}

#[test]
fn user_without_token_is_treated_as_corrupt() {
    let (ctx, store) = setup();
    ctx.seed(STORAGE_USER_KEY, r#"{"id_user":1,"user_name":"Ann","user_email":"a@b.c"}"#);

    assert_eq!(store.load(), None);
    assert!(ctx.entries.borrow().is_empty());
}

#[test]
fn load_restores_the_seeded_user() {
    let (ctx, store) = setup();
    ctx.seed(STORAGE_TOKEN_KEY, "abc");
    ctx.seed(
        STORAGE_USER_KEY,
        r#"{"id_user":1,"user_name":"Ann","user_email":"ann@example.com"}"#,
    );

    let session = store.load().expect("valid pair should restore");
    assert_eq!(session.token, "abc");
    assert_eq!(session.user.user_name, "Ann");
}

#[test]
fn failed_user_write_rolls_back_the_token() {
    let (ctx, store) = setup();
    ctx.fail_set_keys
        .borrow_mut()
        .insert(STORAGE_USER_KEY.to_string());

    assert!(!store.save(&make_session()));
    // Never a token without a user record
    assert!(ctx.entries.borrow().is_empty());
}

#[test]
fn failed_token_write_leaves_the_store_empty() {
    let (ctx, store) = setup();
    ctx.fail_set_keys
        .borrow_mut()
        .insert(STORAGE_TOKEN_KEY.to_string());

    assert!(!store.save(&make_session()));
    assert!(ctx.entries.borrow().is_empty());
}

#[test]
fn clear_removes_both_keys_and_is_idempotent() {
    let (ctx, store) = setup();
    let session = make_session();
    assert!(store.save(&session));

    store.clear();
    assert!(ctx.entries.borrow().is_empty());

    store.clear();
    assert!(ctx.entries.borrow().is_empty());
}
