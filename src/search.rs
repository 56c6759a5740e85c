//! 検索ワークフロー
//!
//! 前提条件の検証 → 検索リクエスト → 結果のセッション反映、の
//! 1試行を駆動する。試行は Idle → Validating → InFlight →
//! {Succeeded, Failed} の順に遷移する。

use crate::client::ApiClient;
use crate::error::{Result, SimSearchError};
use crate::refresh;
use crate::session::{SearchPhase, SessionState};
use simsearch_common::SearchStats;

/// 検索パラメータ
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub top_k: u32,
    /// 類似度の下限（[0,1]が期待値、クライアントでは検証しない）
    pub threshold: f64,
    /// 成功後に取り直すログ窓の件数
    pub log_limit: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: 10,
            threshold: 0.0,
            log_limit: 50,
        }
    }
}

/// 検索成功時の要約
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results_count: usize,
    pub search_time_ms: f64,
    pub total_indexed: u64,
    /// バックエンドに保存されたクエリ画像のストレージパス
    pub query_image: String,
}

/// 類似検索を1回実行してセッションへ反映する
///
/// 前提条件（クエリ画像あり・インデックス構築済み）を満たさない場合は
/// リクエストを送らずにエラーを返し、状態は変えない。
/// 失敗時は直前の結果と統計をそのまま保持する。
pub async fn run_search(
    client: &ApiClient,
    session: &mut SessionState,
    params: SearchParams,
) -> Result<SearchOutcome> {
    session.set_search_phase(SearchPhase::Validating);

    let (file_name, bytes) = match session.query() {
        Some(query) => (query.file_name.clone(), query.bytes.clone()),
        None => {
            session.set_search_phase(SearchPhase::Idle);
            return Err(SimSearchError::NoQueryImage);
        }
    };

    if !session.index_built() {
        session.set_search_phase(SearchPhase::Idle);
        return Err(SimSearchError::IndexNotBuilt);
    }

    session.set_search_phase(SearchPhase::InFlight);

    match client
        .search(&file_name, bytes, params.top_k, params.threshold)
        .await
    {
        Ok(response) => {
            let stats = SearchStats {
                search_time_ms: response.search_time_ms,
                total_indexed: response.total_indexed,
                results_count: response.results.len(),
            };
            let outcome = SearchOutcome {
                results_count: response.results.len(),
                search_time_ms: response.search_time_ms,
                total_indexed: response.total_indexed,
                query_image: response.query_image,
            };

            session.set_results(response.results, stats);
            session.set_search_phase(SearchPhase::Succeeded);

            // ログ窓は全件取り直す。取得失敗は検索の成否に影響させない
            let _ = refresh::refresh_logs(client, session, params.log_limit).await;

            Ok(outcome)
        }
        Err(e) => {
            session.set_search_phase(SearchPhase::Failed);
            Err(e)
        }
    }
}
