use glim_core::api::AuthResponse;
use glim_core::session::{bearer_header, KeyValueStore, MemoryStore, Session, TOKEN_KEY, USER_KEY};
use glim_core::user::User;

fn auth() -> AuthResponse {
    AuthResponse {
        token: "tok123".into(),
        user: User {
            id: "u1".into(),
            email: "ana@glim.app".into(),
            display_name: "Ana".into(),
            photo_url: None,
        },
    }
}

#[test]
fn persist_writes_both_keys() {
    let mut kv = MemoryStore::new();
    let mut session = Session::default();
    session.persist(&mut kv, auth());
    assert_eq!(kv.get(TOKEN_KEY).as_deref(), Some("tok123"));
    assert!(kv.get(USER_KEY).unwrap().contains("\"displayName\":\"Ana\""));
    assert!(session.is_authenticated());
    assert_eq!(session.user_id(), Some("u1"));
}

#[test]
fn restore_reads_what_persist_wrote() {
    let mut kv = MemoryStore::new();
    Session::default().persist(&mut kv, auth());
    let restored = Session::restore(&mut kv);
    assert_eq!(restored.token.as_deref(), Some("tok123"));
    assert_eq!(restored.user.unwrap().email, "ana@glim.app");
}

#[test]
fn sign_out_removes_both_keys() {
    let mut kv = MemoryStore::new();
    let mut session = Session::default();
    session.persist(&mut kv, auth());
    session.sign_out(&mut kv);
    assert!(kv.is_empty());
    assert!(!session.is_authenticated());
}

#[test]
fn corrupt_user_is_discarded() {
    let mut kv = MemoryStore::new();
    kv.set(TOKEN_KEY, "t");
    kv.set(USER_KEY, "{not json");
    let s = Session::restore(&mut kv);
    assert!(s.user.is_none());
    assert!(kv.get(USER_KEY).is_none());
}

#[test]
fn bearer_header_only_with_token() {
    let mut kv = MemoryStore::new();
    assert_eq!(bearer_header(&kv), None);
    kv.set(TOKEN_KEY, "abc");
    assert_eq!(bearer_header(&kv).as_deref(), Some("Bearer abc"));
}
