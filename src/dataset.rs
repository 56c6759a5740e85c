//! データセット系ワークフロー
//!
//! アップロード・インデックス構築・破壊的な全削除の3系統。
//! いずれもユーザーによる再試行を前提にした冪等な操作で、
//! 自動リトライはしない。変更系の成功後は統計とログを取り直す。
//!
//! 破壊的操作の確認はCLI/対話レイヤの責務で、ここでは行わない。

use crate::client::{ApiClient, StatusResponse, UploadResponse};
use crate::error::{Result, SimSearchError};
use crate::refresh;
use crate::session::SessionState;

/// 画像群をアップロードする
///
/// 前提条件: セッションに1件以上のファイルが選択されていること。
/// 成功時は選択を解除して統計とログを取り直す。
/// 失敗時は選択を保持したまま返し、ユーザーが再試行できるようにする。
pub async fn run_upload(
    client: &ApiClient,
    session: &mut SessionState,
    log_limit: u32,
) -> Result<UploadResponse> {
    let batch = match session.upload_batch() {
        Some(batch) if !batch.files.is_empty() => batch.clone(),
        _ => return Err(SimSearchError::NoFilesSelected),
    };

    session.set_uploading(true);
    let result = client.upload_dataset(&batch.files, &batch.category).await;
    session.set_uploading(false);

    let response = result?;
    session.clear_upload_batch();
    refresh_after_mutation(client, session, log_limit).await;

    Ok(response)
}

/// インデックスを構築/再構築する
///
/// 総画像数0のガードは表示レイヤの都合であり、ここでは行わない
/// （バックエンドが空データセットを自分でエラーにする）。
pub async fn run_build_index(
    client: &ApiClient,
    session: &mut SessionState,
    log_limit: u32,
) -> Result<StatusResponse> {
    session.set_building(true);
    let result = client.build_index().await;
    session.set_building(false);

    let response = result?;
    refresh_after_mutation(client, session, log_limit).await;

    Ok(response)
}

/// データセットを全削除する
///
/// 成功時は表示中の結果集合も破棄する（消えた画像を参照し得るため）
pub async fn run_clear_dataset(
    client: &ApiClient,
    session: &mut SessionState,
    log_limit: u32,
) -> Result<StatusResponse> {
    let response = client.clear_dataset().await?;
    session.on_dataset_cleared();
    refresh_after_mutation(client, session, log_limit).await;

    Ok(response)
}

/// 活動ログを全削除する（ログ窓のみ空にする）
pub async fn run_clear_logs(
    client: &ApiClient,
    session: &mut SessionState,
) -> Result<StatusResponse> {
    let response = client.clear_logs().await?;
    session.set_logs(Vec::new());

    Ok(response)
}

/// 変更系の成功後に統計とログを取り直す
///
/// 取得失敗は操作自体の成否に影響させず、直前の値を保持して続行する
async fn refresh_after_mutation(client: &ApiClient, session: &mut SessionState, log_limit: u32) {
    let _ = refresh::refresh_stats(client, session).await;
    let _ = refresh::refresh_logs(client, session, log_limit).await;
}
