use super::*;
use resources::{Session, SessionContext, SessionUser};

fn session() -> Session {
    Session {
        token: "tok".into(),
        user: SessionUser {
            id: 3,
            name: "Dewi".into(),
            email: "dewi@example.com".into(),
            role: Some("admin".into()),
        },
    }
}

#[test]
fn save_creates_parent_dirs_and_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path().join("nested/session.json"));
    store.save("{\"a\":1}").expect("save");
    assert_eq!(store.load().as_deref(), Some("{\"a\":1}"));
}

#[test]
fn clear_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path().join("session.json"));
    store.clear();
    store.save("x").expect("save");
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn session_survives_between_contexts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    let mut first = SessionContext::restore(FileStore::new(path.clone()));
    first.login(session()).expect("login");

    let second = SessionContext::restore(FileStore::new(path.clone()));
    assert_eq!(second.token(), Some("tok"));
    assert!(second.is_admin());
}

#[test]
fn corrupt_file_is_discarded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").expect("write");

    let ctx = SessionContext::restore(FileStore::new(path.clone()));
    assert!(!ctx.is_authenticated());
    assert!(!path.exists());
}
