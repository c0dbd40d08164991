//! # Config Commands

use tracing::debug;

use crate::state::AppConfig;

/// Gets the resolved configuration.
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawer_core::Locale;
    use std::path::PathBuf;

    #[test]
    fn test_get_config_serializes_camel_case() {
        let config = AppConfig::from_lookup(|_| None).with_overrides(
            Some(PathBuf::from("/tmp/d.db")),
            Some(PathBuf::from("/tmp/out")),
            Some(Locale::En),
        );

        let json = serde_json::to_value(get_config(&config)).unwrap();
        assert_eq!(json["locale"], "en");
        assert_eq!(json["databasePath"], "/tmp/d.db");
        assert_eq!(json["downloadDir"], "/tmp/out");
    }
}
