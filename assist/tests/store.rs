use scholar_assist::UsageLimiter;
use scholar_assist::factory::Backend;
use scholar_assist::factory::open_store;

fn backends() -> Vec<Backend> {
    #[cfg(feature = "sqlite")]
    {
        vec![Backend::Json, Backend::Sqlite]
    }
    #[cfg(not(feature = "sqlite"))]
    {
        vec![Backend::Json]
    }
}

#[test]
fn store_get_set_remove() {
    for be in backends() {
        let home = tempfile::tempdir().unwrap();
        let store = open_store(home.path(), Some(be)).unwrap();

        assert_eq!(store.get("missing").unwrap(), None);
        store.set("a", "one").unwrap();
        store.set("b", "two").unwrap();
        store.set("a", "uno").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("uno"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("two"));
    }
}

#[test]
fn usage_survives_reopen() {
    for be in backends() {
        let home = tempfile::tempdir().unwrap();
        {
            let store = open_store(home.path(), Some(be)).unwrap();
            let mut limiter = UsageLimiter::load(store, "freemium-data");
            assert!(limiter.try_consume_interaction());
            assert!(limiter.try_consume_interaction());
            limiter.record_upload();
        }
        let store = open_store(home.path(), Some(be)).unwrap();
        let limiter = UsageLimiter::load(store, "freemium-data");
        assert_eq!(limiter.state().ai_uses_left, 3);
        assert_eq!(limiter.state().total_ai_uses, 2);
        assert_eq!(limiter.state().documents_uploaded, 1);
        assert!(!limiter.is_premium());
    }
}

#[test]
fn json_blob_uses_camel_case_keys() {
    let home = tempfile::tempdir().unwrap();
    let store = open_store(home.path(), Some(Backend::Json)).unwrap();
    let mut limiter = UsageLimiter::load(store, "freemium-data");
    limiter.upgrade();

    let raw = std::fs::read_to_string(home.path().join("storage.json")).unwrap();
    let outer: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let blob: serde_json::Value =
        serde_json::from_str(outer["freemium-data"].as_str().unwrap()).unwrap();
    assert_eq!(
        blob,
        serde_json::json!({
            "aiUsesLeft": 5,
            "totalAiUses": 0,
            "documentsUploaded": 0,
            "isPremium": true
        })
    );
}
