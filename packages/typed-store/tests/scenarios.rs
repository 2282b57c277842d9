use tempfile::TempDir;

use typedprefs::{preferences, Environment, Error, Kind, Preferences};
use typedprefs_json_store::{Error as StoreError, LocalDiskEnvironment, MemoryEnvironment};

preferences! {
    /// Preferences of the shopping app.
    pub struct UserPreferences {
        api_token: Option<String> => "api_token",
        buy_click_count: i32 => "click_count" = 0,
        has_data: bool = false,
    }
}

preferences! {
    pub struct AllKinds {
        flag: bool = true,
        count: i32 = 42,
        stamp: i64 => "last_sync" = -1,
        ratio: f32 = 0.25,
        label: Option<String>,
    }
}

fn disk_env() -> (TempDir, LocalDiskEnvironment) {
    let dir = TempDir::new().unwrap();
    let env = LocalDiskEnvironment::new(dir.path().join("prefs")).unwrap();
    (dir, env)
}

fn check_defaults<E: Environment>(env: &E) {
    let mut prefs = AllKinds::open(env, "defaults").unwrap();

    assert!(prefs.flag().get().unwrap());
    assert_eq!(prefs.count().get().unwrap(), 42);
    assert_eq!(prefs.stamp().get().unwrap(), -1);
    assert_eq!(prefs.ratio().get().unwrap(), 0.25);
    assert_eq!(prefs.label().get().unwrap(), None);
}

fn check_round_trip<E: Environment>(env: &E) {
    let mut prefs = AllKinds::open(env, "round_trip").unwrap();

    prefs.flag().set(false).unwrap();
    prefs.count().set(-7).unwrap();
    prefs.stamp().set(1_700_000_000_000).unwrap();
    prefs.ratio().set(3.5).unwrap();
    prefs.label().set(Some("héllo wörld".to_string())).unwrap();

    assert!(!prefs.flag().get().unwrap());
    assert_eq!(prefs.count().get().unwrap(), -7);
    assert_eq!(prefs.stamp().get().unwrap(), 1_700_000_000_000);
    assert_eq!(prefs.ratio().get().unwrap(), 3.5);
    assert_eq!(
        prefs.label().get().unwrap().as_deref(),
        Some("héllo wörld")
    );
}

fn check_clear<E: Environment>(env: &E) {
    let mut prefs = AllKinds::open(env, "clearing").unwrap();
    prefs.count().set(1).unwrap();
    prefs.label().set(Some("x".to_string())).unwrap();

    prefs.clear().unwrap();

    assert_eq!(prefs.count().get().unwrap(), 42);
    assert_eq!(prefs.label().get().unwrap(), None);
}

fn check_isolation<E: Environment>(env: &E) {
    let mut first = UserPreferences::open(env, "first").unwrap();
    let mut second = UserPreferences::open(env, "second").unwrap();

    first.buy_click_count().set(5).unwrap();
    first.api_token().set(Some("secret".to_string())).unwrap();

    assert_eq!(second.buy_click_count().get().unwrap(), 0);
    assert_eq!(second.api_token().get().unwrap(), None);

    second.clear().unwrap();
    assert_eq!(first.buy_click_count().get().unwrap(), 5);
}

fn check_shared_key<E: Environment>(env: &E) {
    let mut shop = UserPreferences::open(env, "user_prefs").unwrap();
    let mut counter = Preferences::open(env, "user_prefs").unwrap();
    let click_count = counter.declare("click_count", None, 0i32).unwrap();

    shop.buy_click_count().set(11).unwrap();
    assert_eq!(counter.get(&click_count).unwrap(), 11);

    counter.set(&click_count, 12).unwrap();
    assert_eq!(shop.buy_click_count().get().unwrap(), 12);
}

fn check_user_scenario<E: Environment>(env: &E) {
    let mut prefs = UserPreferences::open(env, "user_prefs").unwrap();

    assert_eq!(prefs.api_token().get().unwrap(), None);
    assert_eq!(prefs.buy_click_count().get().unwrap(), 0);
    assert!(!prefs.has_data().get().unwrap());

    prefs.api_token().set(Some("tok-1".to_string())).unwrap();
    prefs.buy_click_count().set(3).unwrap();
    prefs.has_data().set(true).unwrap();

    assert_eq!(prefs.api_token().get().unwrap().as_deref(), Some("tok-1"));
    assert_eq!(prefs.buy_click_count().get().unwrap(), 3);
    assert!(prefs.has_data().get().unwrap());

    prefs.api_token().set(None).unwrap();
    assert_eq!(prefs.api_token().get().unwrap(), None);

    prefs.clear().unwrap();
    assert_eq!(prefs.api_token().get().unwrap(), None);
    assert_eq!(prefs.buy_click_count().get().unwrap(), 0);
    assert!(!prefs.has_data().get().unwrap());
}

#[test]
fn test_defaults_in_memory() {
    check_defaults(&MemoryEnvironment::new());
}

#[test]
fn test_defaults_on_disk() {
    let (_dir, env) = disk_env();
    check_defaults(&env);
}

#[test]
fn test_round_trip_in_memory() {
    check_round_trip(&MemoryEnvironment::new());
}

#[test]
fn test_round_trip_on_disk() {
    let (_dir, env) = disk_env();
    check_round_trip(&env);
}

#[test]
fn test_clear_in_memory() {
    check_clear(&MemoryEnvironment::new());
}

#[test]
fn test_clear_on_disk() {
    let (_dir, env) = disk_env();
    check_clear(&env);
}

#[test]
fn test_namespace_isolation_in_memory() {
    check_isolation(&MemoryEnvironment::new());
}

#[test]
fn test_namespace_isolation_on_disk() {
    let (_dir, env) = disk_env();
    check_isolation(&env);
}

#[test]
fn test_instances_share_keys_in_memory() {
    check_shared_key(&MemoryEnvironment::new());
}

#[test]
fn test_instances_share_keys_on_disk() {
    let (_dir, env) = disk_env();
    check_shared_key(&env);
}

#[test]
fn test_user_scenario_in_memory() {
    check_user_scenario(&MemoryEnvironment::new());
}

#[test]
fn test_user_scenario_on_disk() {
    let (_dir, env) = disk_env();
    check_user_scenario(&env);
}

#[test]
fn test_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("prefs");

    {
        let env = LocalDiskEnvironment::new(root.clone()).unwrap();
        let mut prefs = UserPreferences::open(&env, "user_prefs").unwrap();
        prefs.api_token().set(Some("tok-1".to_string())).unwrap();
        prefs.buy_click_count().update(|n| n + 3).unwrap();
    }

    let env = LocalDiskEnvironment::new(root).unwrap();
    let mut prefs = UserPreferences::open(&env, "user_prefs").unwrap();
    assert_eq!(prefs.api_token().get().unwrap().as_deref(), Some("tok-1"));
    assert_eq!(prefs.buy_click_count().get().unwrap(), 3);
    assert!(!prefs.has_data().get().unwrap());
}

#[test]
fn test_conflicting_kind_on_one_instance() {
    let env = MemoryEnvironment::new();
    let mut prefs = UserPreferences::open(&env, "user_prefs").unwrap();

    let err = prefs
        .preferences_mut()
        .declare("clicks_as_long", Some("click_count"), 0i64)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::KindConflict {
            existing: Kind::Int,
            requested: Kind::Long,
            ..
        }
    ));
}

#[test]
fn test_foreign_kind_reported_on_read() {
    let env = MemoryEnvironment::new();
    let mut shop = UserPreferences::open(&env, "user_prefs").unwrap();
    shop.buy_click_count().set(3).unwrap();

    let mut other = Preferences::open(&env, "user_prefs").unwrap();
    let as_text = other.declare_optional("click_count", None).unwrap();

    assert!(matches!(other.get(&as_text), Err(Error::Store(_))));
}

#[test]
fn test_invalid_namespace_rejected() {
    let env = MemoryEnvironment::new();
    let err = UserPreferences::open(&env, "../escape").err().unwrap();
    assert!(matches!(
        err,
        Error::Store(StoreError::InvalidNamespace { .. })
    ));
}

#[test]
fn test_threads_on_one_namespace_keep_every_write() {
    let (_dir, env) = disk_env();

    for round in 0..25 {
        let namespace = format!("round_{}", round);

        std::thread::scope(|scope| {
            for name in ["k0", "k1"] {
                let env = &env;
                let namespace = namespace.as_str();
                scope.spawn(move || {
                    let mut prefs = Preferences::open(env, namespace).unwrap();
                    let field = prefs.declare(name, None, 0i32).unwrap();
                    prefs.set(&field, 1).unwrap();
                });
            }
        });

        let mut prefs = Preferences::open(&env, &namespace).unwrap();
        let k0 = prefs.declare("k0", None, 0i32).unwrap();
        let k1 = prefs.declare("k1", None, 0i32).unwrap();
        assert_eq!(prefs.get(&k0).unwrap(), 1, "round {}", round);
        assert_eq!(prefs.get(&k1).unwrap(), 1, "round {}", round);
    }
}
