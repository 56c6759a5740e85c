//! 対話モード
//!
//! セッション状態（クエリ画像・結果・統計・ログ）を保持したまま、
//! 検索・アップロード・インデックス構築・削除操作を繰り返す。
//! 実行中の操作や前提条件を満たさない操作は受け付けずに弾く。

use crate::client::ApiClient;
use crate::config::Config;
use crate::dataset;
use crate::error::{Result, SimSearchError};
use crate::refresh;
use crate::render;
use crate::scanner;
use crate::search::{run_search, SearchParams};
use crate::session::SessionState;
use dialoguer::{Confirm, Input, Select};
use simsearch_common::ResourceLocator;
use std::path::Path;

/// 対話アクション
enum SessionAction {
    /// クエリ画像を選択
    SelectImage,
    /// クエリ画像の選択を解除
    ClearImage,
    /// 類似検索を実行
    Search,
    /// 直近の検索結果を表示
    ShowResults,
    /// 結果分析を表示
    ShowAnalytics,
    /// 画像フォルダをアップロード
    Upload,
    /// インデックスを構築/再構築
    BuildIndex,
    /// データセット統計を表示
    ShowStats,
    /// 活動ログを表示
    ShowLogs,
    /// データセットを全削除
    ClearDataset,
    /// 活動ログを全削除
    ClearLogs,
    /// ヘルプを表示
    Help,
    /// 終了
    Quit,
    Unknown,
}

fn parse_action(input: &str) -> SessionAction {
    match input.trim() {
        "i" => SessionAction::SelectImage,
        "x" => SessionAction::ClearImage,
        "s" => SessionAction::Search,
        "r" => SessionAction::ShowResults,
        "a" => SessionAction::ShowAnalytics,
        "u" => SessionAction::Upload,
        "b" => SessionAction::BuildIndex,
        "t" => SessionAction::ShowStats,
        "l" => SessionAction::ShowLogs,
        "d" => SessionAction::ClearDataset,
        "L" => SessionAction::ClearLogs,
        "h" | "?" => SessionAction::Help,
        "q" | "Q" => SessionAction::Quit,
        _ => SessionAction::Unknown,
    }
}

fn print_help() {
    println!("---");
    println!("操作: [i]画像選択 [x]選択解除 [s]検索 [r]結果 [a]分析");
    println!("      [u]アップロード [b]インデックス構築 [t]統計 [l]ログ");
    println!("      [d]データセット削除 [L]ログ削除 [q]終了");
    println!("---");
}

/// 対話セッションを開始する
pub async fn run_session(client: &ApiClient, config: &Config, verbose: bool) -> Result<()> {
    let locator = ResourceLocator::new(client.base_url());
    let mut session = SessionState::new();

    println!("🔎 simsearch 対話モード");
    println!("バックエンド: {}\n", client.base_url());

    // 初期状態の取得。失敗しても起動はさせる（後から再取得できる）
    let _ = refresh::refresh_stats(client, &mut session).await;
    let _ = refresh::refresh_logs(client, &mut session, config.log_limit).await;
    let _ = refresh::refresh_taxonomy(client, &mut session).await;

    match session.dataset_stats() {
        Some(stats) if stats.index_built => {
            println!("画像 {}件 / インデックス構築済み ({}件)", stats.total_images, stats.index_size);
        }
        Some(stats) => {
            println!("画像 {}件 / インデックス未構築", stats.total_images);
        }
        None => println!("⚠ バックエンドに接続できません（操作時に再試行します）"),
    }

    print_help();

    loop {
        let input = prompt_line("操作 (hでヘルプ)")?;

        match parse_action(&input) {
            SessionAction::SelectImage => select_image(&mut session)?,
            SessionAction::ClearImage => {
                session.clear_query();
                println!("  → 選択を解除し、結果と統計をクリアしました\n");
            }
            SessionAction::Search => do_search(client, &mut session, config, &locator, verbose).await?,
            SessionAction::ShowResults => {
                if let Some(stats) = session.search_stats() {
                    render::print_search_stats(stats);
                }
                render::print_results(session.results(), &locator, verbose);
                println!();
            }
            SessionAction::ShowAnalytics => {
                match session.analytics() {
                    Some(analytics) => render::print_analytics(&analytics),
                    None => println!("検索結果がありません（未検索または0件ヒット）"),
                }
                println!();
            }
            SessionAction::Upload => do_upload(client, &mut session, config).await?,
            SessionAction::BuildIndex => do_build_index(client, &mut session, config).await?,
            SessionAction::ShowStats => {
                let _ = refresh::refresh_stats(client, &mut session).await;
                match session.dataset_stats() {
                    Some(stats) => render::print_stats(stats, session.taxonomy()),
                    None => println!("✖ 統計を取得できません"),
                }
                println!();
            }
            SessionAction::ShowLogs => {
                match refresh::refresh_logs(client, &mut session, config.log_limit).await {
                    Ok(()) => render::print_logs(session.logs()),
                    Err(e) => println!("✖ {}", e),
                }
                println!();
            }
            SessionAction::ClearDataset => do_clear_dataset(client, &mut session, config).await?,
            SessionAction::ClearLogs => do_clear_logs(client, &mut session).await?,
            SessionAction::Help => print_help(),
            SessionAction::Quit => {
                println!("終了します");
                break;
            }
            SessionAction::Unknown => {
                if !input.trim().is_empty() {
                    println!("不明な操作です（hでヘルプ）");
                }
            }
        }
    }

    Ok(())
}

fn select_image(session: &mut SessionState) -> Result<()> {
    let path = prompt_line("クエリ画像のパス")?;
    if path.trim().is_empty() {
        return Ok(());
    }

    match session.select_query(Path::new(path.trim())) {
        Ok(selection) => {
            match selection.preview.dimensions {
                Some((w, h)) => println!(
                    "  → {} ({}x{}px, {}バイト) を選択しました",
                    selection.file_name,
                    w,
                    h,
                    selection.bytes.len()
                ),
                None => println!(
                    "  → {} ({}バイト) を選択しました（画像として解釈できません）",
                    selection.file_name,
                    selection.bytes.len()
                ),
            }
            println!("  → 前回の結果と統計をクリアしました\n");
        }
        Err(e) => println!("✖ {}\n", e),
    }

    Ok(())
}

async fn do_search(
    client: &ApiClient,
    session: &mut SessionState,
    config: &Config,
    locator: &ResourceLocator,
    verbose: bool,
) -> Result<()> {
    if session.is_searching() {
        println!("⏳ 検索を実行中です\n");
        return Ok(());
    }

    // 前提条件はリクエスト前に確認する（違反時は通信しない）
    if let Err(e) = session.can_search() {
        println!("✖ {}\n", e);
        return Ok(());
    }

    let top_k = prompt_number("取得件数", config.default_top_k)?;
    let threshold = prompt_threshold("類似度の下限", config.default_threshold)?;

    let params = SearchParams {
        top_k,
        threshold,
        log_limit: config.log_limit,
    };

    let pb = render::spinner("検索中...");
    let outcome = run_search(client, session, params).await;
    pb.finish_and_clear();

    match outcome {
        Ok(outcome) => {
            println!(
                "✔ {}件の類似画像が見つかりました ({:.2}ms, インデックス{}件)",
                outcome.results_count, outcome.search_time_ms, outcome.total_indexed
            );
            render::print_results(session.results(), locator, verbose);
            println!();
        }
        Err(e) => println!("✖ {}\n", e),
    }

    Ok(())
}

async fn do_upload(client: &ApiClient, session: &mut SessionState, config: &Config) -> Result<()> {
    if session.is_uploading() {
        println!("⏳ アップロードを実行中です\n");
        return Ok(());
    }

    let path = prompt_line("画像フォルダ（または画像ファイル）のパス")?;
    if path.trim().is_empty() {
        return Ok(());
    }

    let target = Path::new(path.trim());
    let files = if target.is_file() {
        if !scanner::is_image_path(target) {
            println!("✖ 画像ファイルではありません: {}\n", target.display());
            return Ok(());
        }
        vec![target.to_path_buf()]
    } else {
        match scanner::scan_folder(target) {
            Ok(files) => files,
            Err(e) => {
                println!("✖ {}\n", e);
                return Ok(());
            }
        }
    };

    if files.is_empty() {
        println!("✖ {}\n", SimSearchError::NoImagesFound(target.display().to_string()));
        return Ok(());
    }

    let category = prompt_category(session)?;
    println!("  {}件を「{}」へアップロードします", files.len(), category);

    session.set_upload_batch(files, category);

    let pb = render::spinner("アップロード中...");
    let result = dataset::run_upload(client, session, config.log_limit).await;
    pb.finish_and_clear();

    match result {
        Ok(response) => println!("✔ {}件をアップロードしました\n", response.uploaded),
        // 失敗時は選択を保持しているので u で再試行できる
        Err(e) => println!("✖ {}（uで再試行できます）\n", e),
    }

    Ok(())
}

async fn do_build_index(
    client: &ApiClient,
    session: &mut SessionState,
    config: &Config,
) -> Result<()> {
    if session.is_building() {
        println!("⏳ インデックスを構築中です\n");
        return Ok(());
    }

    // 画像0件での構築は無意味なのでメニュー側で弾く（表示レイヤの都合）
    if let Some(stats) = session.dataset_stats() {
        if stats.total_images == 0 {
            println!("✖ 画像がありません。先にアップロードしてください\n");
            return Ok(());
        }
    }

    let pb = render::spinner("インデックス構築中...（画像数に応じて時間がかかります）");
    let result = dataset::run_build_index(client, session, config.log_limit).await;
    pb.finish_and_clear();

    match result {
        Ok(response) => {
            println!("✔ {}", response.message);
            if let Some(stats) = session.dataset_stats() {
                println!("  インデックス件数: {}\n", stats.index_size);
            }
        }
        Err(e) => println!("✖ {}\n", e),
    }

    Ok(())
}

async fn do_clear_dataset(
    client: &ApiClient,
    session: &mut SessionState,
    config: &Config,
) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt("データセットの全画像を削除します。よろしいですか？")
        .default(false)
        .interact()
        .map_err(|e| SimSearchError::Prompt(e.to_string()))?;

    if !confirmed {
        println!("中止しました\n");
        return Ok(());
    }

    match dataset::run_clear_dataset(client, session, config.log_limit).await {
        Ok(_) => println!("✔ データセットを削除しました（表示中の結果もクリア）\n"),
        Err(e) => println!("✖ {}\n", e),
    }

    Ok(())
}

async fn do_clear_logs(client: &ApiClient, session: &mut SessionState) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt("活動ログを全削除します。よろしいですか？")
        .default(false)
        .interact()
        .map_err(|e| SimSearchError::Prompt(e.to_string()))?;

    if !confirmed {
        println!("中止しました\n");
        return Ok(());
    }

    match dataset::run_clear_logs(client, session).await {
        Ok(_) => println!("✔ ログを削除しました\n"),
        Err(e) => println!("✖ {}\n", e),
    }

    Ok(())
}

// =============================================
// プロンプトヘルパー
// =============================================

fn prompt_line(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| SimSearchError::Prompt(e.to_string()))
}

fn prompt_number(prompt: &str, default: u32) -> Result<u32> {
    let input = prompt_line(&format!("{} [{}]", prompt, default))?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    Ok(trimmed.parse().unwrap_or(default))
}

fn prompt_threshold(prompt: &str, default: f64) -> Result<f64> {
    let input = prompt_line(&format!("{} [{:.2}]", prompt, default))?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    Ok(trimmed.parse().unwrap_or(default))
}

/// サンプル分類からカテゴリを選ぶ（常にunknownを選択肢に含める）
fn prompt_category(session: &SessionState) -> Result<String> {
    let mut options: Vec<String> = session
        .taxonomy()
        .map(|t| t.names())
        .unwrap_or_default();
    if !options.iter().any(|c| c == "unknown") {
        options.push("unknown".to_string());
    }

    let selected = Select::new()
        .with_prompt("カテゴリ")
        .items(&options)
        .default(options.len() - 1)
        .interact()
        .map_err(|e| SimSearchError::Prompt(e.to_string()))?;

    Ok(options[selected].clone())
}
