//! Tests for configured registries

use super::common::app::{self, Clock, FrozenClock};
use super::common::init_tracing;
use depinj::di::scoped;
use depinj::{Registry, RegistryConfig};
use std::fs;
use tempfile::TempDir;

static FROZEN: FrozenClock = FrozenClock(7);

#[test]
fn test_disabled_registry_from_file_reaches_reals() {
    init_tracing();

    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("depinj.yaml");
    fs::write(&config_path, "enabled: false\n").unwrap();

    let config = RegistryConfig::load_from(&config_path).unwrap();
    let registry = Registry::with_config(config);
    let frozen: &'static dyn Clock = &FROZEN;
    registry.register_object_substitution(frozen, &app::system_clock());

    let stamped = scoped(&registry, || app::stamp("tick"));
    assert_ne!(stamped, "[7] tick");
    assert_eq!(registry.stats().objects, 1);
}

#[test]
fn test_missing_config_file_enables_substitution() {
    init_tracing();

    let temp = TempDir::new().unwrap();
    let config = RegistryConfig::load_or_default(&temp.path().join("absent.yaml")).unwrap();
    let registry = Registry::with_config(config);
    let frozen: &'static dyn Clock = &FROZEN;
    registry.register_object_substitution(frozen, &app::system_clock());

    assert_eq!(scoped(&registry, || app::stamp("tick")), "[7] tick");
}

#[test]
fn test_stats_serialize_to_yaml() {
    init_tracing();

    let registry = Registry::new();
    registry.register_factory_substitution(|| 1u8, || 0u8);

    let yaml = serde_yaml::to_string(&registry.stats()).unwrap();
    assert!(yaml.contains("factories: 1"));
    assert!(yaml.contains("constructed: 0"));
}
