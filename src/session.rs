//! セッション状態ストア
//!
//! クエリ画像・検索結果・統計・ログ・カテゴリ分類の唯一の所有者。
//! 各ワークフローはスナップショットを読み、新しい値を計算して
//! 丸ごと置き換える。部分的な書き換えはしない。

use crate::error::{Result, SimSearchError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::GenericImageView;
use simsearch_common::{
    analyze, CategoryTaxonomy, DatasetStats, LogEntry, ResultAnalytics, SearchResult, SearchStats,
};
use std::path::{Path, PathBuf};

use crate::scanner;

/// 検索試行の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded,
    Failed,
}

/// 選択中クエリ画像のプレビュー
///
/// data: URLは選択が置き換えられた時点でバッファごと破棄される
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub data_url: String,
    /// デコードできた場合のピクセル寸法（width, height）
    pub dimensions: Option<(u32, u32)>,
}

/// 選択中のクエリ画像
#[derive(Debug, Clone)]
pub struct QuerySelection {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewImage,
}

impl QuerySelection {
    /// ファイルを読み込んで選択状態を作る
    ///
    /// 画像としてデコードできないファイルでも選択自体は成立させ、
    /// 寸法だけNoneにする（検証はバックエンド側の責務）
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SimSearchError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let dimensions = image::load_from_memory(&bytes).ok().map(|img| img.dimensions());
        let data_url = format!(
            "data:{};base64,{}",
            scanner::mime_for(path),
            BASE64.encode(&bytes)
        );

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            bytes,
            preview: PreviewImage {
                data_url,
                dimensions,
            },
        })
    }
}

/// アップロード対象（ワークフロー実行中のみ存在）
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    pub files: Vec<PathBuf>,
    pub category: String,
}

/// セッション状態ストア
#[derive(Debug, Default)]
pub struct SessionState {
    query: Option<QuerySelection>,
    results: Vec<SearchResult>,
    search_stats: Option<SearchStats>,
    dataset_stats: Option<DatasetStats>,
    logs: Vec<LogEntry>,
    taxonomy: Option<CategoryTaxonomy>,
    upload_batch: Option<UploadBatch>,
    search_phase: SearchPhase,
    building: bool,
    uploading: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------
    // クエリ画像
    // ---------------------------------------------

    /// クエリ画像を選択する
    ///
    /// 既存の選択は（プレビューごと）置き換えられ、
    /// 結果と検索統計は検索の進行状態に関わらずクリアされる
    pub fn select_query(&mut self, path: &Path) -> Result<&QuerySelection> {
        let selection = QuerySelection::load(path)?;
        self.reset_results();
        self.search_phase = SearchPhase::Idle;
        Ok(self.query.insert(selection))
    }

    /// クエリ画像の選択を解除する（結果と統計もクリア）
    pub fn clear_query(&mut self) {
        self.query = None;
        self.reset_results();
        self.search_phase = SearchPhase::Idle;
    }

    pub fn query(&self) -> Option<&QuerySelection> {
        self.query.as_ref()
    }

    // ---------------------------------------------
    // 検索結果・統計
    // ---------------------------------------------

    /// 検索成功時の結果反映（並び順はそのまま、丸ごと置き換え）
    pub fn set_results(&mut self, results: Vec<SearchResult>, stats: SearchStats) {
        self.results = results;
        self.search_stats = Some(stats);
    }

    fn reset_results(&mut self) {
        self.results = Vec::new();
        self.search_stats = None;
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn search_stats(&self) -> Option<&SearchStats> {
        self.search_stats.as_ref()
    }

    /// 現在の結果集合から分析を導出する（空ならNone）
    pub fn analytics(&self) -> Option<ResultAnalytics> {
        analyze(&self.results)
    }

    // ---------------------------------------------
    // データセット統計・ログ・カテゴリ
    // ---------------------------------------------

    pub fn set_dataset_stats(&mut self, stats: DatasetStats) {
        self.dataset_stats = Some(stats);
    }

    pub fn dataset_stats(&self) -> Option<&DatasetStats> {
        self.dataset_stats.as_ref()
    }

    /// 直近取得の統計でインデックスが構築済みか
    pub fn index_built(&self) -> bool {
        self.dataset_stats
            .as_ref()
            .map(|s| s.index_built)
            .unwrap_or(false)
    }

    /// ログ窓を丸ごと置き換える（マージしない）
    pub fn set_logs(&mut self, logs: Vec<LogEntry>) {
        self.logs = logs;
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn set_taxonomy(&mut self, taxonomy: CategoryTaxonomy) {
        self.taxonomy = Some(taxonomy);
    }

    pub fn taxonomy(&self) -> Option<&CategoryTaxonomy> {
        self.taxonomy.as_ref()
    }

    /// データセット削除成功後の後始末
    ///
    /// 表示中の結果は消えた画像を参照し得るため破棄する。
    /// クエリ選択とログ窓はそのまま。
    pub fn on_dataset_cleared(&mut self) {
        self.results = Vec::new();
    }

    // ---------------------------------------------
    // アップロード対象
    // ---------------------------------------------

    pub fn set_upload_batch(&mut self, files: Vec<PathBuf>, category: String) {
        self.upload_batch = Some(UploadBatch { files, category });
    }

    /// 成功時のみ呼ぶ。失敗時は選択を保持して再試行できるようにする
    pub fn clear_upload_batch(&mut self) {
        self.upload_batch = None;
    }

    pub fn upload_batch(&self) -> Option<&UploadBatch> {
        self.upload_batch.as_ref()
    }

    // ---------------------------------------------
    // 進行状態フラグ
    // ---------------------------------------------

    pub fn set_search_phase(&mut self, phase: SearchPhase) {
        self.search_phase = phase;
    }

    pub fn search_phase(&self) -> SearchPhase {
        self.search_phase
    }

    pub fn is_searching(&self) -> bool {
        self.search_phase == SearchPhase::InFlight
    }

    pub fn set_building(&mut self, building: bool) {
        self.building = building;
    }

    pub fn is_building(&self) -> bool {
        self.building
    }

    pub fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    // ---------------------------------------------
    // 前提条件
    // ---------------------------------------------

    /// 検索を開始できるか（違反時はリクエストを送らない）
    pub fn can_search(&self) -> Result<()> {
        if self.query.is_none() {
            return Err(SimSearchError::NoQueryImage);
        }
        if !self.index_built() {
            return Err(SimSearchError::IndexNotBuilt);
        }
        Ok(())
    }
}
