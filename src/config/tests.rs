use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadenza_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", "/tmp/cadenza-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cadenza-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_state_dir() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/cadenza/cadenza.log")
    );

    let _g3 = EnvGuard::set("XDG_STATE_HOME", "/tmp/state");
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/state/cadenza/cadenza.log")
    );
}

#[test]
fn defaults_match_the_music_app() {
    let s = Settings::default();
    assert_eq!(s.search.default_term, "adele");
    assert_eq!(s.search.limit, 25);
    assert_eq!(s.search.entity, "song");
    assert_eq!(s.controls.scrub_seconds, 10);
    assert_eq!(s.audio.shutdown_wait_ms, 1_500);
    assert_eq!(
        s.ui.track_fields,
        vec![TrackDisplayField::Artist, TrackDisplayField::Title]
    );
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
tick_ms = 50
fetch_timeout_secs = 3
shutdown_wait_ms = 250

[search]
limit = 20
country = "in"
default_term = "tamil"

[controls]
scrub_seconds = 5

[ui]
theme = "light"
header_text = "hello"
track_fields = ["title", "id"]
track_separator = " • "

[logging]
filter = "cadenza=debug"
file = "/tmp/cadenza.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENZA__AUDIO__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.tick_ms, 50);
    assert_eq!(s.audio.fetch_timeout_secs, 3);
    assert_eq!(s.audio.shutdown_wait_ms, 250);
    assert_eq!(s.search.limit, 20);
    assert_eq!(s.search.country.as_deref(), Some("in"));
    assert_eq!(s.search.default_term, "tamil");
    // untouched keys keep their defaults
    assert_eq!(s.search.entity, "song");
    assert_eq!(s.controls.scrub_seconds, 5);
    assert_eq!(s.ui.theme, ThemeSetting::Light);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(
        s.ui.track_fields,
        vec![TrackDisplayField::Title, TrackDisplayField::Id]
    );
    assert_eq!(s.ui.track_separator, " • ");
    assert_eq!(s.logging.filter, "cadenza=debug");
    assert_eq!(
        s.logging.file,
        Some(std::path::PathBuf::from("/tmp/cadenza.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENZA__AUDIO__TICK_MS", "100");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.tick_ms, 100);
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("CADENZA__AUDIO__TICK_MS");

    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load_from(Some(dir.path().join("nope.toml").as_path())).unwrap();
    assert_eq!(s.audio.tick_ms, 200);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.search.limit = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.search.limit = 201;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 1;
    assert!(s.validate().is_err());
}

#[test]
fn to_toml_round_trips_through_load() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("CADENZA__AUDIO__TICK_MS");

    let mut s = Settings::default();
    s.search.country = Some("gb".into());
    s.ui.theme = ThemeSetting::Light;

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, s.to_toml().unwrap()).unwrap();

    let loaded = Settings::load_from(Some(cfg_path.as_path())).unwrap();
    assert_eq!(loaded.search.country.as_deref(), Some("gb"));
    assert_eq!(loaded.ui.theme, ThemeSetting::Light);
}
