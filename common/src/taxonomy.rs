//! カテゴリ分類の型定義
//!
//! GET /api/sample-categories はフラットなカテゴリ名の配列か、
//! 種別ごとにグループ化したマッピングのどちらかを返す。
//! 表示用のグループ分けはこのデータに従い、コード内に
//! 固定のグループ表は持たない。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// どのグループにも属さないカテゴリの受け皿
pub const OTHER_GROUP: &str = "other";

/// バックエンドが提供するカテゴリ分類
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryTaxonomy {
    /// 種別グループ → カテゴリ名
    Grouped(BTreeMap<String, Vec<String>>),
    /// フラットなカテゴリ名の集合
    Flat(Vec<String>),
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        CategoryTaxonomy::Flat(Vec::new())
    }
}

impl CategoryTaxonomy {
    pub fn is_empty(&self) -> bool {
        match self {
            CategoryTaxonomy::Grouped(groups) => groups.values().all(|v| v.is_empty()),
            CategoryTaxonomy::Flat(names) => names.is_empty(),
        }
    }

    /// カテゴリ名をフラットに列挙する（選択肢の生成用）
    ///
    /// 空文字のカテゴリ名は選択肢に載せない
    pub fn names(&self) -> Vec<String> {
        match self {
            CategoryTaxonomy::Grouped(groups) => groups
                .values()
                .flatten()
                .filter(|n| !n.is_empty())
                .cloned()
                .collect(),
            CategoryTaxonomy::Flat(names) => {
                names.iter().filter(|n| !n.is_empty()).cloned().collect()
            }
        }
    }

    /// カテゴリの属するグループ名
    pub fn group_of(&self, category: &str) -> Option<&str> {
        match self {
            CategoryTaxonomy::Grouped(groups) => groups
                .iter()
                .find(|(_, cats)| cats.iter().any(|c| c == category))
                .map(|(name, _)| name.as_str()),
            CategoryTaxonomy::Flat(_) => None,
        }
    }

    /// データセットのカテゴリ別件数を表示用グループへ振り分ける
    ///
    /// グループに載っていないカテゴリは`other`へ。件数0のグループは出さない。
    pub fn group_counts(&self, counts: &BTreeMap<String, u64>) -> Vec<(String, Vec<(String, u64)>)> {
        let mut grouped: Vec<(String, Vec<(String, u64)>)> = Vec::new();
        let mut remaining: BTreeMap<&str, u64> =
            counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();

        if let CategoryTaxonomy::Grouped(groups) = self {
            for (group, cats) in groups {
                let mut members = Vec::new();
                for cat in cats {
                    if let Some(count) = remaining.remove(cat.as_str()) {
                        members.push((cat.clone(), count));
                    }
                }
                if !members.is_empty() {
                    grouped.push((group.clone(), members));
                }
            }
        }

        if !remaining.is_empty() {
            let members = remaining
                .into_iter()
                .map(|(cat, count)| (cat.to_string(), count))
                .collect();
            grouped.push((OTHER_GROUP.to_string(), members));
        }

        grouped
    }
}
