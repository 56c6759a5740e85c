//! バックエンドAPIのレスポンス型
//!
//! FastAPIのレスポンスモデルと1:1対応。欠損フィールドは
//! デフォルト値で補い、レスポンス形状の揺れで落ちないようにする。

use serde::{Deserialize, Serialize};
use simsearch_common::{CategoryTaxonomy, SearchResult};

/// 検索レスポンス（POST /api/search）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// バックエンドに保存されたクエリ画像のストレージパス
    pub query_image: String,
    /// 関連度順の結果（並び順を保持する）
    pub results: Vec<SearchResult>,
    pub search_time_ms: f64,
    pub total_indexed: u64,
}

/// 成否レスポンス（build-index / clear-dataset / clear-logs）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/// アップロード済み画像のメタデータ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadedImage {
    pub id: String,
    pub filename: String,
    pub filepath: String,
    pub category: String,
}

/// アップロードレスポンス（POST /api/upload-dataset）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub uploaded: u64,
    pub images: Vec<UploadedImage>,
}

/// カテゴリ一覧レスポンス（GET /api/categories）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// サンプルカテゴリレスポンス（GET /api/sample-categories）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleCategoriesResponse {
    pub categories: CategoryTaxonomy,
}

/// エラーレスポンス（FastAPI形式）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
