//! 検索バックエンドAPIクライアント
//!
//! バックエンドの各エンドポイントへの型付きラッパー。
//! 1オペレーション=1往復で、リトライやトランスポート既定以上の
//! タイムアウトは持たない。非2xxレスポンスはボディのdetailメッセージを
//! そのままエラーに載せ、なければ操作ごとの汎用メッセージに落とす。

mod types;

pub use types::{
    CategoriesResponse, ErrorBody, SampleCategoriesResponse, SearchResponse, StatusResponse,
    UploadResponse, UploadedImage,
};

use crate::config::Config;
use crate::error::{Result, SimSearchError};
use crate::scanner;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use simsearch_common::{CategoryTaxonomy, DatasetStats, LogEntry};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.backend_url(), config.timeout_seconds)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// データセット統計を取得
    pub async fn dataset_stats(&self) -> Result<DatasetStats> {
        let resp = self.client.get(self.api("dataset-stats")).send().await?;
        Self::parse_json(resp, "統計の取得に失敗しました").await
    }

    /// 活動ログを取得（新しい順、最大limit件）
    pub async fn logs(&self, limit: u32, category: Option<&str>) -> Result<Vec<LogEntry>> {
        let mut req = self
            .client
            .get(self.api("logs"))
            .query(&[("limit", limit.to_string())]);
        if let Some(category) = category {
            req = req.query(&[("category", category)]);
        }

        let resp = req.send().await?;
        Self::parse_json(resp, "ログの取得に失敗しました").await
    }

    /// サンプルカテゴリ分類を取得
    pub async fn sample_categories(&self) -> Result<CategoryTaxonomy> {
        let resp = self
            .client
            .get(self.api("sample-categories"))
            .send()
            .await?;
        let response: SampleCategoriesResponse =
            Self::parse_json(resp, "カテゴリの取得に失敗しました").await?;
        Ok(response.categories)
    }

    /// データセットに実在するカテゴリ一覧を取得
    pub async fn dataset_categories(&self) -> Result<Vec<String>> {
        let resp = self.client.get(self.api("categories")).send().await?;
        let response: CategoriesResponse =
            Self::parse_json(resp, "カテゴリの取得に失敗しました").await?;
        Ok(response.categories)
    }

    /// 類似検索を実行
    pub async fn search(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        top_k: u32,
        threshold: f64,
    ) -> Result<SearchResponse> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(scanner::mime_for(Path::new(file_name)))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("top_k", top_k.to_string())
            .text("threshold", threshold.to_string());

        let resp = self
            .client
            .post(self.api("search"))
            .multipart(form)
            .send()
            .await?;
        Self::parse_json(resp, "検索に失敗しました").await
    }

    /// インデックスを構築/再構築
    pub async fn build_index(&self) -> Result<StatusResponse> {
        let resp = self.client.post(self.api("build-index")).send().await?;
        Self::parse_json(resp, "インデックス構築に失敗しました").await
    }

    /// 画像ファイル群を1リクエストでアップロード
    pub async fn upload_dataset(
        &self,
        files: &[PathBuf],
        category: &str,
    ) -> Result<UploadResponse> {
        let mut form = multipart::Form::new().text("category", category.to_string());

        for path in files {
            let bytes = tokio::fs::read(path).await?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "image.jpg".to_string());
            // content-typeがimage/*でないファイルはバックエンドが黙って捨てる
            let part = multipart::Part::bytes(bytes)
                .file_name(name)
                .mime_str(scanner::mime_for(path))?;
            form = form.part("files", part);
        }

        let resp = self
            .client
            .post(self.api("upload-dataset"))
            .multipart(form)
            .send()
            .await?;
        Self::parse_json(resp, "アップロードに失敗しました").await
    }

    /// データセットを全削除
    pub async fn clear_dataset(&self) -> Result<StatusResponse> {
        let resp = self.client.delete(self.api("clear-dataset")).send().await?;
        Self::parse_json(resp, "データセット削除に失敗しました").await
    }

    /// 活動ログを全削除
    pub async fn clear_logs(&self) -> Result<StatusResponse> {
        let resp = self.client.delete(self.api("clear-logs")).send().await?;
        Self::parse_json(resp, "ログ削除に失敗しました").await
    }

    async fn parse_json<T: DeserializeOwned>(
        resp: reqwest::Response,
        fallback: &str,
    ) -> Result<T> {
        let resp = Self::check_status(resp, fallback).await?;
        Ok(resp.json::<T>().await?)
    }

    /// 非2xxをバックエンドのdetailメッセージ付きエラーへ変換
    async fn check_status(resp: reqwest::Response, fallback: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail);
        Err(SimSearchError::Backend(
            detail.unwrap_or_else(|| fallback.to_string()),
        ))
    }
}
