use fnet_domain::config::ConfigError;
use fnet_domain::{CliOverrides, Config};
use std::io::Write;
use std::net::Ipv4Addr;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.dns.port, 53);
    assert_eq!(config.dns.retransmission_timeout_secs, 4);
    assert_eq!(config.dns.retransmission_timeout_ms(), 4000);
    assert_eq!(config.dns.retransmission_max, 2);
    assert_eq!(config.dns.message_size, 512);
    assert_eq!(config.llmnr.max_instances, 1);
    assert_eq!(config.llmnr.port, 5355);
    assert_eq!(config.llmnr.hostname_ttl, 30);
    assert_eq!(config.poll.max_services, 10);
    assert_eq!(config.logging.level, "info");
    assert!(config.netif.ip4_addr.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let toml_str = r#"
        [dns]
        retransmission_max = 5

        [netif]
        name = "en0"
        ip4_addr = "192.168.1.20"
        ip4_dns = "192.168.1.1"
    "#;
    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.dns.retransmission_max, 5);
    assert_eq!(config.dns.port, 53);
    assert_eq!(config.netif.name, "en0");
    assert_eq!(config.netif.ip4_addr, Some(Ipv4Addr::new(192, 168, 1, 20)));
    assert_eq!(config.netif.ip4_dns, Some(Ipv4Addr::new(192, 168, 1, 1)));
    assert!(config.netif.ip6_dns.is_empty());
}

#[test]
fn test_validate_rejects_small_message_size() {
    let mut config = Config::default();
    config.dns.message_size = 256;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_zero_instances_and_ports() {
    let mut config = Config::default();
    config.llmnr.max_instances = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.llmnr.port = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.poll.max_services = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[llmnr]\nhostname_ttl = 120\n\n[logging]\nlevel = \"debug\"").unwrap();

    let overrides = CliOverrides {
        dns_port: Some(5353),
        log_level: Some("trace".to_string()),
        ..CliOverrides::default()
    };
    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.llmnr.hostname_ttl, 120);
    assert_eq!(config.dns.port, 5353);
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_load_missing_file_fails() {
    let result = Config::load(Some("/nonexistent/fnet.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_load_invalid_toml_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[dns\nport = ").unwrap();
    let result = Config::load(file.path().to_str(), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
