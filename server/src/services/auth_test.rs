use super::*;

#[test]
fn error_message_prefers_description() {
    let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
    assert_eq!(parse_error_message(body, 400), "Invalid login credentials");
}

#[test]
fn error_message_reads_msg_field() {
    let body = r#"{"code":422,"msg":"User already registered"}"#;
    assert_eq!(parse_error_message(body, 422), "User already registered");
}

#[test]
fn error_message_falls_back_to_status() {
    assert_eq!(parse_error_message("<html>bad gateway</html>", 502), "auth provider returned 502");
    assert_eq!(parse_error_message(r#"{"msg":"  "}"#, 400), "auth provider returned 400");
}

#[test]
fn session_is_parsed_from_token_response() {
    let body = r#"{
        "access_token": "tok",
        "token_type": "bearer",
        "expires_in": 900,
        "refresh_token": "r",
        "user": { "id": "u-1", "email": "a@b.com", "aud": "authenticated" }
    }"#;
    let session = parse_session(body).unwrap();
    assert_eq!(session.access_token, "tok");
    assert_eq!(session.expires_in, 900);
    assert_eq!(session.user, ProviderUser { id: "u-1".into(), email: Some("a@b.com".into()) });
}

#[test]
fn session_without_expiry_defaults_to_an_hour() {
    let session = parse_session(r#"{"access_token":"tok","user":{"id":"u"}}"#).unwrap();
    assert_eq!(session.expires_in, 3600);
    assert_eq!(session.user.email, None);
}

#[test]
fn malformed_session_is_a_decode_error() {
    assert!(matches!(parse_session(r#"{"user":{}}"#), Err(AuthError::Decode(_))));
}

#[test]
fn sign_up_without_session_means_confirmation_sent() {
    let body = r#"{"id":"u-1","email":"a@b.com","confirmation_sent_at":"2026-01-01T00:00:00Z"}"#;
    assert!(parse_sign_up(body).unwrap().confirmation_sent);
}

#[test]
fn sign_up_with_session_is_auto_confirmed() {
    let body = r#"{"access_token":"tok","user":{"id":"u-1"}}"#;
    assert!(!parse_sign_up(body).unwrap().confirmation_sent);
}

#[test]
fn rejected_error_displays_provider_message() {
    let err = AuthError::Rejected { status: 429, message: "Email rate limit exceeded".into() };
    assert_eq!(err.to_string(), "Email rate limit exceeded");
}
