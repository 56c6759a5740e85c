//! 検索バックエンドと共有する型定義
//!
//! CLIと対話セッションで共有される型:
//! - DatasetStats: データセット統計（GET /api/dataset-stats）
//! - LogEntry: バックエンド活動ログ（GET /api/logs）
//! - SearchResult: 類似検索結果の1件
//! - SearchStats: 直近の検索メトリクス（検索レスポンスから導出）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// データセット統計
///
/// `index_built == false` の間は検索を実行できない。
/// `index_size <= total_images` はバックエンド側の不変条件で、
/// クライアントでは検証しない。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetStats {
    pub total_images: u64,
    pub categories: BTreeMap<String, u64>,
    pub index_built: bool,
    pub index_size: u64,
}

impl DatasetStats {
    /// カテゴリ数
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

/// ログレベル
///
/// バックエンドは文字列で返すため、未知のレベルはUnknownに落とす
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
    Debug,
    Unknown,
}

impl LogLevel {
    /// バックエンドのラベル表記（WARNも受け付ける）
    pub fn from_label(label: &str) -> Self {
        match label {
            "INFO" => LogLevel::Info,
            "WARNING" | "WARN" => LogLevel::Warning,
            "ERROR" => LogLevel::Error,
            "DEBUG" => LogLevel::Debug,
            _ => LogLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
            LogLevel::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(LogLevel::from_label(&label))
    }
}

/// バックエンド活動ログの1件
///
/// 受信後は不変。並び順（新しい順）はバックエンドの返却順を保持する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub message: String,
}

/// 類似検索結果の1件
///
/// 結果集合の並び順はバックエンドの関連度順で、表示まで保持する
/// （rank = 位置 + 1）。similarity_scoreは[0,1]が期待値だが検証しない。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub image_id: String,
    pub filename: String,
    pub filepath: String,
    pub category: String,
    pub similarity_score: f64,
}

/// 直近の検索メトリクス
///
/// 検索成功のたびに丸ごと置き換え、クエリ画像の変更時にクリアする
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchStats {
    pub search_time_ms: f64,
    pub total_indexed: u64,
    pub results_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_stats_default() {
        let stats = DatasetStats::default();
        assert_eq!(stats.total_images, 0);
        assert!(stats.categories.is_empty());
        assert!(!stats.index_built);
        assert_eq!(stats.index_size, 0);
    }

    #[test]
    fn test_dataset_stats_deserialize() {
        let json = r#"{
            "total_images": 42,
            "categories": {"cat": 20, "dog": 22},
            "index_built": true,
            "index_size": 42
        }"#;

        let stats: DatasetStats = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(stats.total_images, 42);
        assert_eq!(stats.categories.get("cat"), Some(&20));
        assert_eq!(stats.categories.get("dog"), Some(&22));
        assert!(stats.index_built);
        assert_eq!(stats.category_count(), 2);
    }

    #[test]
    fn test_dataset_stats_deserialize_missing_fields() {
        // カテゴリマップが欠けていても空として扱う
        let json = r#"{"total_images": 3, "index_built": false}"#;

        let stats: DatasetStats = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(stats.total_images, 3);
        assert!(stats.categories.is_empty()); // デフォルト値
        assert_eq!(stats.index_size, 0); // デフォルト値
    }

    #[test]
    fn test_log_level_deserialize() {
        let level: LogLevel = serde_json::from_str(r#""INFO""#).expect("デシリアライズ失敗");
        assert_eq!(level, LogLevel::Info);

        // バックエンドはWARNINGを出すがWARNも受け付ける
        let level: LogLevel = serde_json::from_str(r#""WARNING""#).expect("デシリアライズ失敗");
        assert_eq!(level, LogLevel::Warning);
        let level: LogLevel = serde_json::from_str(r#""WARN""#).expect("デシリアライズ失敗");
        assert_eq!(level, LogLevel::Warning);

        let level: LogLevel = serde_json::from_str(r#""ERROR""#).expect("デシリアライズ失敗");
        assert_eq!(level, LogLevel::Error);
    }

    #[test]
    fn test_log_level_unknown() {
        // 未知のレベルはエラーにせずUnknownへ
        let level: LogLevel = serde_json::from_str(r#""TRACE""#).expect("デシリアライズ失敗");
        assert_eq!(level, LogLevel::Unknown);
    }

    #[test]
    fn test_log_entry_deserialize() {
        // バックエンドのisoformat出力
        let json = r#"{
            "timestamp": "2026-08-05T12:34:56.789012+00:00",
            "level": "ERROR",
            "category": "indexing",
            "message": "No images found in dataset"
        }"#;

        let entry: LogEntry = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.category, "indexing");
        assert_eq!(entry.message, "No images found in dataset");
    }

    #[test]
    fn test_log_entry_deserialize_minimal() {
        let json = r#"{"timestamp": "2026-08-05T00:00:00+00:00"}"#;

        let entry: LogEntry = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(entry.level, LogLevel::Info); // デフォルト値
        assert_eq!(entry.category, "");
        assert_eq!(entry.message, "");
    }

    #[test]
    fn test_search_result_deserialize() {
        let json = r#"{
            "image_id": "17",
            "filename": "dog3.jpg",
            "filepath": "/app/backend/uploads/dataset/dog/dog3.jpg",
            "category": "dog",
            "similarity_score": 0.9213
        }"#;

        let result: SearchResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.image_id, "17");
        assert_eq!(result.filename, "dog3.jpg");
        assert_eq!(result.category, "dog");
        assert!((result.similarity_score - 0.9213).abs() < 1e-9);
    }

    #[test]
    fn test_search_result_roundtrip() {
        let original = SearchResult {
            image_id: "3".to_string(),
            filename: "cat1.jpg".to_string(),
            filepath: "/app/backend/uploads/dataset/cat/cat1.jpg".to_string(),
            category: "cat".to_string(),
            similarity_score: 0.85,
        };

        let json = serde_json::to_string(&original).expect("シリアライズ失敗");
        let restored: SearchResult = serde_json::from_str(&json).expect("デシリアライズ失敗");

        assert_eq!(original.image_id, restored.image_id);
        assert_eq!(original.filepath, restored.filepath);
        assert_eq!(original.similarity_score, restored.similarity_score);
    }

    #[test]
    fn test_search_stats_default() {
        let stats = SearchStats::default();
        assert_eq!(stats.search_time_ms, 0.0);
        assert_eq!(stats.total_indexed, 0);
        assert_eq!(stats.results_count, 0);
    }
}
