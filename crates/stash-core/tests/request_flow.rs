//! End-to-end request flows against the in-memory host

use stash_core::{Config, MemoryStore, RequestContext, SessionHost, TranslatorKind, Value};
use url::Url;

fn config() -> Config {
    Config::from_json_str(r#"{"session": {"name": "sid", "use_only_cookies": false}}"#).unwrap()
}

#[test]
fn session_data_follows_the_cookie_across_requests() {
    let config = config();
    let store = MemoryStore::new();

    // First request: no cookie, a new session is issued
    let first = config
        .open_session(config.memory_host(store.clone()), &RequestContext::new())
        .unwrap();
    first.set("user.id", 42);
    first.add("recent", "/home");
    let id = first.session_id().unwrap();

    // Second request carries the id back in its cookie header
    let header = format!("theme=dark; sid={}", id);
    let second = config
        .open_session(
            config.memory_host(store.clone()),
            &RequestContext::from_cookie_header(&header),
        )
        .unwrap();

    assert_eq!(second.session_id().unwrap(), id);
    assert_eq!(second.get("user.id", Value::Null), Value::from(42));
    second.add("recent", "/cart");
    assert_eq!(
        second.get("recent", Value::Null),
        Value::from(vec!["/home", "/cart"])
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn query_parameter_is_used_when_cookies_are_missing() {
    let config = config();
    let store = MemoryStore::new();

    let first = config
        .open_session(config.memory_host(store.clone()), &RequestContext::new())
        .unwrap();
    first.set("flash", "Welcome back");
    let id = first.session_id().unwrap();

    let url = Url::parse(&format!("https://shop.example/?sid={}", id)).unwrap();
    let second = config
        .open_session(config.memory_host(store), &RequestContext::from_url(&url))
        .unwrap();

    assert_eq!(second.pull("flash", Value::Null), Value::from("Welcome back"));
    assert!(!second.has("flash"));
}

#[test]
fn forged_ids_never_reach_the_store() {
    let config = config();
    let store = MemoryStore::new();

    let request = RequestContext::from_cookie_header("sid=../../etc/passwd");
    let session = config
        .open_session(config.memory_host(store.clone()), &request)
        .unwrap();

    let id = session.session_id().unwrap();
    assert_ne!(id.as_str(), "../../etc/passwd");
    assert!(store.contains(&id));
    assert_eq!(store.len(), 1);
}

#[test]
fn regenerated_id_carries_the_data_and_retires_the_old_one() {
    let config = config();
    let store = MemoryStore::new();

    let session = config
        .open_session(config.memory_host(store.clone()), &RequestContext::new())
        .unwrap();
    session.set("auth.user", "ada");
    let old_id = session.session_id().unwrap();

    let new_id = session.regenerate().unwrap();
    assert_ne!(new_id, old_id);
    assert!(!store.contains(&old_id));

    let stale = config
        .open_session(
            config.memory_host(store.clone()),
            &RequestContext::new().with_cookie("sid", old_id.as_str()),
        )
        .unwrap();
    assert!(!stale.has("auth.user"));

    let current = config
        .open_session(
            config.memory_host(store),
            &RequestContext::new().with_cookie("sid", new_id.as_str()),
        )
        .unwrap();
    assert_eq!(current.get("auth.user", Value::Null), Value::from("ada"));
}

#[test]
fn flush_and_translator_swap_share_one_bag() {
    let config = config();
    let mut session = config
        .open_session(config.memory_host(MemoryStore::new()), &RequestContext::new())
        .unwrap();

    session.set("a.b", 1);
    session.set_translator(TranslatorKind::Pointer);
    assert_eq!(session.get("/a/b", Value::Null), Value::from(1));

    session.flush();
    assert!(session.all().is_empty());
    assert!(session.host().bag().unwrap().is_empty());
}

#[test]
fn save_path_is_applied_process_wide() {
    let dir = tempfile::tempdir().unwrap();
    let config = config();
    let store = MemoryStore::new();

    let session = config
        .open_session(config.memory_host(store.clone()), &RequestContext::new())
        .unwrap();
    session.set_session_save_path(dir.path()).unwrap();

    assert_eq!(store.save_path(), Some(dir.path().to_path_buf()));
    assert!(session
        .set_session_save_path(dir.path().join("absent"))
        .is_err());
    assert_eq!(store.save_path(), Some(dir.path().to_path_buf()));
}
