use crate::error::{Result, SimSearchError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub default_top_k: u32,
    pub default_threshold: f64,
    pub log_limit: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
            default_top_k: 10,
            default_threshold: 0.0,
            log_limit: 50,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SimSearchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("simsearch").join("config.json"))
    }

    /// バックエンドURL（環境変数を優先）
    pub fn backend_url(&self) -> String {
        if let Ok(url) = std::env::var("SIMSEARCH_BACKEND_URL") {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.backend_url.clone()
    }

    pub fn set_backend_url(&mut self, url: String) -> Result<()> {
        self.backend_url = url;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.default_top_k, 10);
        assert_eq!(config.default_threshold, 0.0);
        assert_eq!(config.log_limit, 50);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_deserialize_partial() {
        // 未知・欠損フィールドはデフォルトで補う
        let json = r#"{"backend_url": "http://search.example.com"}"#;
        let config: Config = serde_json::from_str(json).expect("デシリアライズ失敗");

        assert_eq!(config.backend_url, "http://search.example.com");
        assert_eq!(config.default_top_k, 10); // デフォルト値
    }

    #[test]
    fn test_config_roundtrip() {
        let original = Config {
            backend_url: "http://10.0.0.5:8000".into(),
            default_top_k: 20,
            default_threshold: 0.25,
            log_limit: 100,
            timeout_seconds: 60,
        };

        let json = serde_json::to_string(&original).expect("シリアライズ失敗");
        let restored: Config = serde_json::from_str(&json).expect("デシリアライズ失敗");

        assert_eq!(restored.backend_url, original.backend_url);
        assert_eq!(restored.default_top_k, original.default_top_k);
        assert_eq!(restored.log_limit, original.log_limit);
    }
}
