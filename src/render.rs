//! 表示ヘルパー
//!
//! 検索結果・分析・統計・ログの端末出力。CLIの各サブコマンドと
//! 対話モードで共用する。

use chrono::Local;
use indicatif::ProgressBar;
use simsearch_common::{
    CategoryTaxonomy, DatasetStats, LogEntry, ResourceLocator, ResultAnalytics, SearchResult,
    SearchStats,
};
use std::time::Duration;

/// 処理中スピナー
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// 検索結果を順位付きで表示（並び順はバックエンドの関連度順のまま）
pub fn print_results(results: &[SearchResult], locator: &ResourceLocator, verbose: bool) {
    if results.is_empty() {
        println!("該当する画像はありませんでした");
        return;
    }

    for (idx, result) in results.iter().enumerate() {
        println!(
            "  #{:<3} {:>5.1}%  [{}] {}",
            idx + 1,
            result.similarity_score * 100.0,
            result.category,
            result.filename
        );
        if verbose {
            println!("        {}", locator.resolve(&result.filepath));
        }
    }
}

/// 直近の検索メトリクスを表示
pub fn print_search_stats(stats: &SearchStats) {
    println!(
        "  {}件 / {:.2}ms / インデックス{}件",
        stats.results_count, stats.search_time_ms, stats.total_indexed
    );
}

/// 結果分析を表示
pub fn print_analytics(analytics: &ResultAnalytics) {
    println!("  平均類似度: {:>5.1}%", analytics.mean_similarity * 100.0);
    println!("  最大類似度: {:>5.1}%", analytics.max_similarity * 100.0);
    println!("  最小類似度: {:>5.1}%", analytics.min_similarity * 100.0);
    println!("  カテゴリ数: {}", analytics.category_counts.len());
    println!("  カテゴリ分布:");

    for (category, count) in &analytics.category_counts {
        let share = analytics.share(*count);
        println!(
            "    {:<12} {:>3}件 ({:.0}%)",
            category,
            count,
            share * 100.0
        );
    }
}

/// データセット統計を表示
///
/// カテゴリ分布はサンプル分類のグループに沿って表示する（データ駆動）
pub fn print_stats(stats: &DatasetStats, taxonomy: Option<&CategoryTaxonomy>) {
    println!("  総画像数:     {}", stats.total_images);
    println!("  カテゴリ数:   {}", stats.category_count());

    if stats.index_built {
        println!("  インデックス: 構築済み ({}件)", stats.index_size);
    } else {
        println!("  インデックス: 未構築");
    }

    if stats.categories.is_empty() {
        return;
    }

    println!("  カテゴリ分布:");
    let fallback = CategoryTaxonomy::default();
    let taxonomy = taxonomy.unwrap_or(&fallback);
    for (group, members) in taxonomy.group_counts(&stats.categories) {
        println!("    [{}]", group);
        for (category, count) in members {
            println!("      {:<12} {}件", category, count);
        }
    }
}

/// 活動ログを表示（新しい順）
pub fn print_logs(logs: &[LogEntry]) {
    if logs.is_empty() {
        println!("ログはありません");
        return;
    }

    for log in logs {
        let time = log.timestamp.with_timezone(&Local);
        println!(
            "  {} {:<7} [{}] {}",
            time.format("%m-%d %H:%M:%S"),
            log.level.as_str(),
            log.category,
            log.message
        );
    }
}

/// サンプルカテゴリ分類を表示
pub fn print_taxonomy(taxonomy: &CategoryTaxonomy) {
    match taxonomy {
        CategoryTaxonomy::Grouped(groups) => {
            for (group, categories) in groups {
                println!("  [{}]", group);
                println!("    {}", categories.join(", "));
            }
        }
        CategoryTaxonomy::Flat(names) => {
            println!("  {}", names.join(", "));
        }
    }
}
