//! バックエンド統合テスト
//!
//! SIMSEARCH_BACKEND_URL が設定されている場合のみ実行する

use simsearch_rust::client::ApiClient;

fn backend_url() -> Option<String> {
    match std::env::var("SIMSEARCH_BACKEND_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => None,
    }
}

#[tokio::test]
async fn backend_read_endpoints_integration() {
    let Some(url) = backend_url() else {
        eprintln!("SIMSEARCH_BACKEND_URL not set; skipping integration test");
        return;
    };

    let client = ApiClient::new(url, 30).expect("クライアント生成失敗");

    let stats = client.dataset_stats().await.expect("統計の取得失敗");
    // index_size <= total_images はバックエンド側の不変条件
    assert!(stats.index_size <= stats.total_images);

    let logs = client.logs(10, None).await.expect("ログの取得失敗");
    assert!(logs.len() <= 10);

    let taxonomy = client.sample_categories().await.expect("カテゴリの取得失敗");
    assert!(!taxonomy.is_empty());

    let categories = client.dataset_categories().await.expect("カテゴリ一覧の取得失敗");
    // 実データセットのカテゴリは統計のカテゴリと整合する
    for category in &categories {
        assert!(!category.is_empty());
    }
}

#[tokio::test]
async fn backend_logs_category_filter_integration() {
    let Some(url) = backend_url() else {
        eprintln!("SIMSEARCH_BACKEND_URL not set; skipping integration test");
        return;
    };

    let client = ApiClient::new(url, 30).expect("クライアント生成失敗");

    let logs = client.logs(20, Some("system")).await.expect("ログの取得失敗");
    for log in &logs {
        assert_eq!(log.category, "system");
    }
}
