use super::*;
use serde_json::json;

fn session(role: Option<&str>) -> Session {
    Session {
        token: "tok-123".into(),
        user: SessionUser {
            id: 1,
            name: "Admin".into(),
            email: "admin@example.com".into(),
            role: role.map(ToOwned::to_owned),
        },
    }
}

// =============================================================
// Session
// =============================================================

#[test]
fn login_response_accepts_wrapped_and_access_token() {
    let plain = json!({ "token": "abc", "user": { "id": 1, "email": "a@b.c" } });
    assert_eq!(Session::from_login_response(&plain).map(|s| s.token), Ok("abc".to_owned()));

    let wrapped = json!({ "data": { "access_token": "xyz", "user": { "id": "2", "email": "d@e.f", "role": "admin" } } });
    let session = Session::from_login_response(&wrapped).expect("wrapped");
    assert_eq!(session.token, "xyz");
    assert_eq!(session.user.id, 2);
    assert!(session.is_admin());
}

#[test]
fn login_response_without_token_or_email_is_rejected() {
    let no_token = json!({ "user": { "id": 1, "email": "a@b.c" } });
    assert_eq!(Session::from_login_response(&no_token), Err(SessionError::MissingToken));

    let no_email = json!({ "token": "abc", "user": { "id": 1, "name": "x" } });
    assert_eq!(Session::from_login_response(&no_email), Err(SessionError::MissingEmail));
}

#[test]
fn json_round_trip_validates() {
    let raw = session(None).to_json().expect("json");
    assert_eq!(Session::from_json(&raw), Ok(session(None)));
    assert!(matches!(Session::from_json("{not json"), Err(SessionError::Malformed(_))));
    let blank = json!({ "token": " ", "user": { "id": 1, "email": "a@b.c" } }).to_string();
    assert_eq!(Session::from_json(&blank), Err(SessionError::MissingToken));
}

// =============================================================
// SessionContext
// =============================================================

#[test]
fn restore_discards_invalid_stored_session() {
    let ctx = SessionContext::restore(MemoryStore::with_raw("{\"token\":\"\"}"));
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.store().load(), None);
}

#[test]
fn login_persists_and_logout_clears() {
    let mut ctx = SessionContext::restore(MemoryStore::new());
    ctx.login(session(Some("Admin"))).expect("login");
    assert_eq!(ctx.token(), Some("tok-123"));
    assert!(ctx.is_admin());

    let restored = SessionContext::restore(MemoryStore::with_raw(&ctx.store().load().expect("saved")));
    assert_eq!(restored.user().map(|u| u.email.as_str()), Some("admin@example.com"));

    ctx.logout();
    assert_eq!(ctx.token(), None);
    assert_eq!(ctx.store().load(), None);
}

#[test]
fn unauthorized_error_forces_logout_and_redirects() {
    let mut ctx = SessionContext::restore(MemoryStore::new());
    ctx.login(session(None)).expect("login");

    let forbidden = ApiError::Status { status: 403, body: Value::Null };
    assert_eq!(ctx.handle_error(&forbidden), None);
    assert!(ctx.is_authenticated());

    let unauthorized = ApiError::Status { status: 401, body: Value::Null };
    assert_eq!(ctx.handle_error(&unauthorized), Some("/auth/login"));
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.store().load(), None);
}
