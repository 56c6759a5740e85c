//! 状態リフレッシュ
//!
//! 統計・ログ・カテゴリ分類をバックエンドから取り直して
//! セッションへ丸ごと置き換える。ワークフロー成功後の追随取得に使う。

use crate::client::ApiClient;
use crate::error::Result;
use crate::session::SessionState;

/// データセット統計を取り直す
pub async fn refresh_stats(client: &ApiClient, session: &mut SessionState) -> Result<()> {
    let stats = client.dataset_stats().await?;
    session.set_dataset_stats(stats);
    Ok(())
}

/// ログ窓を取り直す（マージせず丸ごと置き換え）
pub async fn refresh_logs(client: &ApiClient, session: &mut SessionState, limit: u32) -> Result<()> {
    let logs = client.logs(limit, None).await?;
    session.set_logs(logs);
    Ok(())
}

/// サンプルカテゴリ分類を取り直す
pub async fn refresh_taxonomy(client: &ApiClient, session: &mut SessionState) -> Result<()> {
    let taxonomy = client.sample_categories().await?;
    session.set_taxonomy(taxonomy);
    Ok(())
}
