use clap::Parser;
use simsearch_rust::{cli, config, dataset, error, interactive, refresh, render, scanner, search, session};

use cli::{Cli, Commands};
use config::Config;
use dialoguer::Confirm;
use error::{Result, SimSearchError};
use session::SessionState;
use simsearch_common::ResourceLocator;
use simsearch_rust::client::ApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let backend_url = cli
        .backend_url
        .clone()
        .unwrap_or_else(|| config.backend_url());
    let client = ApiClient::new(backend_url, config.timeout_seconds)?;
    let locator = ResourceLocator::new(client.base_url());

    match cli.command {
        Commands::Search { image, top_k, threshold, json } => {
            if !json {
                println!("🔍 simsearch - 類似画像検索\n");
            }

            let mut session = SessionState::new();

            // 1. クエリ画像の読み込み
            if !json {
                println!("[1/3] クエリ画像を読み込み中...");
            }
            let selection = session.select_query(&image)?;
            if !json {
                match selection.preview.dimensions {
                    Some((w, h)) => println!("✔ {} ({}x{}px)\n", selection.file_name, w, h),
                    None => println!("✔ {}\n", selection.file_name),
                }
            }

            // 2. インデックス状態の確認（未構築なら通信せずに終了）
            if !json {
                println!("[2/3] インデックス状態を確認中...");
            }
            refresh::refresh_stats(&client, &mut session).await?;
            if let Some(stats) = session.dataset_stats() {
                if !json {
                    println!("✔ 画像{}件 / インデックス{}件\n", stats.total_images, stats.index_size);
                }
            }

            // 3. 検索
            if !json {
                println!("[3/3] 検索中...");
            }
            let params = search::SearchParams {
                top_k: top_k.unwrap_or(config.default_top_k),
                threshold: threshold.unwrap_or(config.default_threshold),
                log_limit: config.log_limit,
            };
            let outcome = search::run_search(&client, &mut session, params).await?;

            if json {
                let payload = serde_json::json!({
                    "results": session.results(),
                    "search_stats": session.search_stats(),
                    "query_image": outcome.query_image,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "✔ {}件が見つかりました ({:.2}ms)\n",
                    outcome.results_count, outcome.search_time_ms
                );
                if cli.verbose {
                    println!("  クエリ画像: {}\n", locator.resolve(&outcome.query_image));
                }
                render::print_results(session.results(), &locator, cli.verbose);

                if let Some(analytics) = session.analytics() {
                    println!("\n📊 結果分析");
                    render::print_analytics(&analytics);
                }

                println!("\n✅ 検索完了");
            }
        }

        Commands::Upload { path, category } => {
            println!("📤 simsearch - データセットアップロード\n");

            // 1. 画像の列挙
            println!("[1/2] 画像をスキャン中...");
            let files = if path.is_file() {
                // 非画像はバックエンドが黙って捨てるため先に弾く
                if !scanner::is_image_path(&path) {
                    return Err(SimSearchError::NoImagesFound(path.display().to_string()));
                }
                vec![path.clone()]
            } else {
                scanner::scan_folder(&path)?
            };

            if files.is_empty() {
                return Err(SimSearchError::NoImagesFound(path.display().to_string()));
            }
            println!("✔ {}枚の画像を検出\n", files.len());

            // 2. アップロード
            println!("[2/2] カテゴリ「{}」へアップロード中...", category);
            let mut session = SessionState::new();
            session.set_upload_batch(files, category);

            let pb = render::spinner("アップロード中...");
            let result = dataset::run_upload(&client, &mut session, config.log_limit).await;
            pb.finish_and_clear();

            let response = result?;
            println!("✔ {}件をアップロードしました", response.uploaded);

            if cli.verbose {
                for img in &response.images {
                    println!("  {} → {}", img.filename, locator.resolve(&img.filepath));
                }
            }

            if let Some(stats) = session.dataset_stats() {
                println!("  総画像数: {} / インデックス: {}", stats.total_images,
                    if stats.index_built { "構築済み（再構築を推奨）" } else { "未構築" });
            }

            println!("\n✅ アップロード完了");
        }

        Commands::BuildIndex => {
            println!("🧭 simsearch - インデックス構築\n");

            let mut session = SessionState::new();
            let pb = render::spinner("インデックス構築中...（画像数に応じて時間がかかります）");
            let result = dataset::run_build_index(&client, &mut session, config.log_limit).await;
            pb.finish_and_clear();

            let response = result?;
            println!("✔ {}", response.message);

            if let Some(stats) = session.dataset_stats() {
                println!("  インデックス件数: {}", stats.index_size);
            }

            println!("\n✅ 構築完了");
        }

        Commands::Stats { json } => {
            let stats = client.dataset_stats().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("📊 データセット統計\n");
                // グループ表示のためにサンプル分類を取り直す（失敗しても続行）
                let taxonomy = client.sample_categories().await.ok();
                render::print_stats(&stats, taxonomy.as_ref());
            }
        }

        Commands::Logs { limit, category } => {
            println!("📜 活動ログ\n");
            let limit = limit.unwrap_or(config.log_limit);
            let logs = client.logs(limit, category.as_deref()).await?;
            render::print_logs(&logs);
        }

        Commands::Categories => {
            println!("🏷  カテゴリ一覧\n");

            let taxonomy = client.sample_categories().await?;
            println!("サンプル分類:");
            render::print_taxonomy(&taxonomy);

            let existing = client.dataset_categories().await?;
            println!("\nデータセットに存在するカテゴリ:");
            if existing.is_empty() {
                println!("  （なし）");
            } else {
                println!("  {}", existing.join(", "));
            }
        }

        Commands::ClearDataset { yes } => {
            if !yes && !confirm_destructive("データセットの全画像を削除します。よろしいですか？")? {
                println!("中止しました");
                return Ok(());
            }

            let mut session = SessionState::new();
            let response = dataset::run_clear_dataset(&client, &mut session, config.log_limit).await?;
            println!("✔ {}", response.message);
        }

        Commands::ClearLogs { yes } => {
            if !yes && !confirm_destructive("活動ログを全削除します。よろしいですか？")? {
                println!("中止しました");
                return Ok(());
            }

            let mut session = SessionState::new();
            let response = dataset::run_clear_logs(&client, &mut session).await?;
            println!("✔ {}", response.message);
        }

        Commands::Session => {
            interactive::run_session(&client, &config, cli.verbose).await?;
        }

        Commands::Config { set_backend_url, show } => {
            let mut config = config;

            if let Some(url) = set_backend_url {
                config.set_backend_url(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  バックエンドURL: {}", config.backend_url());
                println!("  取得件数(top_k): {}", config.default_top_k);
                println!("  類似度の下限:    {:.2}", config.default_threshold);
                println!("  ログ取得件数:    {}", config.log_limit);
                println!("  タイムアウト:    {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn confirm_destructive(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SimSearchError::Prompt(e.to_string()))
}
