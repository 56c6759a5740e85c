//! 検索結果の分析
//!
//! 現在の結果集合から要約統計（平均・最大・最小類似度、カテゴリ別件数）を
//! 導出する。結果集合が変わるたびに再計算し、キャッシュしない。

use crate::types::SearchResult;
use std::collections::BTreeMap;

/// 結果集合の要約統計
#[derive(Debug, Clone, PartialEq)]
pub struct ResultAnalytics {
    /// 全件の算術平均（上位K件のみではない）
    pub mean_similarity: f64,
    pub max_similarity: f64,
    pub min_similarity: f64,
    /// カテゴリ別件数
    pub category_counts: BTreeMap<String, usize>,
    /// 計算時点の結果件数（割合の分母）
    pub results_count: usize,
}

impl ResultAnalytics {
    /// カテゴリ件数の全体に対する割合（0.0-1.0）
    ///
    /// 分母は常に現在の結果件数で、過去の件数は使わない
    pub fn share(&self, count: usize) -> f64 {
        count as f64 / self.results_count as f64
    }
}

/// 結果集合から要約統計を計算する
///
/// 空集合はNoneを返し、「未検索」と「0件ヒット」を区別できるようにする
pub fn analyze(results: &[SearchResult]) -> Option<ResultAnalytics> {
    if results.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();

    for result in results {
        let score = result.similarity_score;
        sum += score;
        if score > max {
            max = score;
        }
        if score < min {
            min = score;
        }
        *category_counts.entry(result.category.clone()).or_insert(0) += 1;
    }

    Some(ResultAnalytics {
        mean_similarity: sum / results.len() as f64,
        max_similarity: max,
        min_similarity: min,
        category_counts,
        results_count: results.len(),
    })
}
