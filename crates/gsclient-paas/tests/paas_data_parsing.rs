//! Integration tests for parsing PaaS data.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use gsclient_paas::{PaasSecurityZone, PaasService};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> serde_json::Value {
    let fixture_path = fixtures_dir().join(name);
    let raw = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("Invalid JSON in {name}: {e}"))
}

fn load_services() -> BTreeMap<String, PaasService> {
    let mut document = load_fixture("paas_service_list.json");
    serde_json::from_value(document["paas_services"].take())
        .unwrap_or_else(|e| panic!("Failed to deserialize PaaS service list: {e}"))
}

#[test]
fn test_deserialize_service_list() {
    let services = load_services();
    assert_eq!(services.len(), 2);
    for (key, service) in &services {
        assert_eq!(key, &service.object_uuid.to_string());
    }
}

#[test]
fn test_service_with_full_details() {
    let services = load_services();
    let db = services
        .values()
        .find(|s| s.name == "orders-db")
        .expect("Should contain the database service");

    assert_eq!(db.status, "active");
    assert!(db.security_zone_uuid.is_some());
    assert_eq!(db.credentials.len(), 1);
    assert_eq!(db.credentials[0].credential_type, "mysql");
    assert_eq!(db.listen_ports["fcfc::1:305e:6eff:fe62:4503"]["mysql"], 3306);
    assert_eq!(db.resource_limits[1].limit, 4096);
    assert_eq!(db.parameters["mysql_max_connections"], serde_json::json!(200));
    assert_eq!(db.usage_in_minutes, Some(4320));
    assert_eq!(db.labels, vec!["orders", "prod"]);
}

#[test]
fn test_service_with_string_ports() {
    let services = load_services();
    let cache = services
        .values()
        .find(|s| s.name == "cache")
        .expect("Should contain the cache service");

    assert_eq!(cache.listen_ports["10.0.0.12"]["redis"], 6379);
    assert!(cache.security_zone_uuid.is_none());
    assert!(cache.create_time.is_none());
}

#[test]
fn test_security_zone_relations() {
    let mut document = load_fixture("paas_security_zone_list.json");
    let zones: BTreeMap<String, PaasSecurityZone> =
        serde_json::from_value(document["paas_security_zones"].take())
            .unwrap_or_else(|e| panic!("Failed to deserialize security zones: {e}"));

    let zone = zones.values().next().expect("Should contain one zone");
    assert_eq!(zone.location_iata.as_deref(), Some("fra"));
    assert_eq!(zone.relations.services.len(), 1);

    let services = load_services();
    let member = zone.relations.services[0].object_uuid;
    assert!(services.values().any(|s| s.object_uuid == member));
}

#[test]
fn test_null_collections_deserialize_as_empty() {
    let mut document = load_fixture("paas_nulls.json");

    let service: PaasService = serde_json::from_value(document["paas_service"].take())
        .expect("null collections should parse");
    assert!(service.credentials.is_empty());
    assert!(service.listen_ports.is_empty());
    assert!(service.resource_limits.is_empty());
    assert!(service.parameters.is_empty());
    assert!(service.labels.is_empty());

    let zone: PaasSecurityZone = serde_json::from_value(document["paas_security_zone"].take())
        .expect("null collections should parse");
    assert!(zone.labels.is_empty());
    assert!(zone.relations.services.is_empty());
}
