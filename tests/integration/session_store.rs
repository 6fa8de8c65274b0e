//! Token-store behavior exercised through the public library surface, with no
//! network involved.

use chrono::Utc;
use garmin_mcp::{
    garmin::{GarminConnect, OAuth2Token, SessionToken, OAUTH2_TOKEN_FILE},
    lib::errors::RestoreError,
    server::bootstrap::SessionProvider,
};
use tempfile::tempdir;

fn stored_session(expires_at: i64) -> SessionToken {
    SessionToken {
        oauth2: OAuth2Token {
            scope: "CONNECT_READ".into(),
            token_type: "Bearer".into(),
            access_token: "stored-access".into(),
            refresh_token: "stored-refresh".into(),
            expires_in: 3600,
            expires_at,
        },
        domain: "garmin.com".into(),
    }
}

#[test]
fn dumped_store_restores_the_same_session() {
    let temp = tempdir().expect("tempdir");
    let store = temp.path().join("garmin-tokens");
    let session = stored_session(Utc::now().timestamp() + 3600);
    session.dump(&store).expect("dump should succeed");

    let restored = SessionToken::load(&store).expect("load should succeed");
    assert_eq!(restored.oauth2.access_token, "stored-access");
    assert_eq!(restored.oauth2.bearer(), "Bearer stored-access");
}

#[test]
fn portable_blob_survives_surrounding_whitespace() {
    let session = stored_session(Utc::now().timestamp() + 3600);
    let blob = session.encode_portable().expect("encode should succeed");
    let padded = format!("  {blob}\n");
    let decoded = SessionToken::decode_portable(&padded).expect("decode should succeed");
    assert_eq!(decoded.domain, "garmin.com");
}

#[tokio::test]
async fn restore_of_expired_store_fails_without_network() {
    let temp = tempdir().expect("tempdir");
    let store = temp.path().join("garmin-tokens");
    stored_session(Utc::now().timestamp() - 120)
        .dump(&store)
        .expect("dump should succeed");

    let provider = GarminConnect::new().expect("provider should build");
    match provider.restore(&store).await {
        Err(RestoreError::Expired(_)) => {}
        Err(other) => panic!("expected Expired, got {other:?}"),
        Ok(_) => panic!("expected Expired, got a live client"),
    }
}

#[tokio::test]
async fn restore_of_garbage_store_is_corrupt_not_missing() {
    let temp = tempdir().expect("tempdir");
    std::fs::write(temp.path().join(OAUTH2_TOKEN_FILE), "{ truncated")
        .expect("can write garbage token file");

    let provider = GarminConnect::new().expect("provider should build");
    match provider.restore(temp.path()).await {
        Err(RestoreError::Corrupt { path, .. }) => {
            assert!(path.ends_with(OAUTH2_TOKEN_FILE));
        }
        Err(other) => panic!("expected Corrupt, got {other:?}"),
        Ok(_) => panic!("expected Corrupt, got a live client"),
    }
}
