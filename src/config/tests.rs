use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
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
fn resolve_config_path_prefers_relink_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RELINK_CONFIG_PATH", "/tmp/relink-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/relink-test-config.toml")
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
            .join("relink")
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
            .join("relink")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[catalog]
file_name = "Library.xml"

[scan]
media_dir = "Media"
extensions = ["mp3", "m4a"]
follow_links = false
include_hidden = true

[report]
old_locations_file = "before.txt"
new_locations_file = "after.txt"

[apply]
application = "iTunes"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RELINK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RELINK__SCAN__MEDIA_DIR");

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.file_name, "Library.xml");
    assert_eq!(s.scan.media_dir, "Media");
    assert_eq!(s.scan.extensions, vec!["mp3".to_string(), "m4a".to_string()]);
    assert!(!s.scan.follow_links);
    assert!(s.scan.include_hidden);
    assert_eq!(s.report.old_locations_file, "before.txt");
    assert_eq!(s.report.new_locations_file, "after.txt");
    assert_eq!(s.apply.application, "iTunes");
    assert_eq!(s.apply.osascript, "osascript");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[scan]
media_dir = "Media"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RELINK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RELINK__SCAN__MEDIA_DIR", "Elsewhere");

    let s = Settings::load().unwrap();
    assert_eq!(s.scan.media_dir, "Elsewhere");
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("absent.toml");
    let _g1 = EnvGuard::set("RELINK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RELINK__SCAN__MEDIA_DIR");

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.file_name, "iTunes Library.xml");
    assert_eq!(s.scan.media_dir, "iTunes Media/Music");
    assert_eq!(s.scan.extensions, vec!["mp3".to_string()]);
}

#[test]
fn validate_rejects_empty_extensions_and_clashing_report_files() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.scan.extensions = vec![" . ".into()];
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.report.new_locations_file = s.report.old_locations_file.clone();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.catalog.file_name = "  ".into();
    assert!(s.validate().is_err());
}
