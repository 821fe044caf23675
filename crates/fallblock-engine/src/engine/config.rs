use serde::{Deserialize, Serialize};

use super::piece_factory::PieceSeed;

/// Construction parameters of a [`Board`](super::Board).
///
/// Missing fields take their defaults, so `{}` is a valid configuration
/// describing a standard 10×20 board with a random seed.
///
/// # Example
///
/// ```
/// use fallblock_engine::BoardConfig;
///
/// let config: BoardConfig = serde_json::from_str(r#"{ "width": 8 }"#).unwrap();
/// assert_eq!(config.width, 8);
/// assert_eq!(config.height, BoardConfig::DEFAULT_HEIGHT);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    /// Seed for the piece sequence; `None` draws one from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
}

impl BoardConfig {
    pub const DEFAULT_WIDTH: i32 = 10;
    pub const DEFAULT_HEIGHT: i32 = 20;
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: BoardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "width": 6,
            "height": 12,
            "seed": "00000000000000000000000000000001"
        }"#;
        let config: BoardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, 12);
        let mut bytes = [0; 16];
        bytes[15] = 1;
        assert_eq!(config.seed, Some(PieceSeed::from_bytes(bytes)));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<BoardConfig>(r#"{ "depth": 3 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_without_seed() {
        let json = serde_json::to_string(&BoardConfig::default()).unwrap();
        assert_eq!(json, r#"{"width":10,"height":20}"#);
    }
}
