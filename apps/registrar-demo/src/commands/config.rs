//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// The configuration the application started with.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes_camel_case() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();
        assert_eq!(json["rateBps"], 800);
        assert_eq!(json["delimiter"], "-");
        assert_eq!(json["companyName"], "Registrar");
        assert!(json["categoryPattern"].is_null());
    }
}
