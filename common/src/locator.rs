//! ストレージパス→配信URL変換
//!
//! バックエンドが報告するストレージパス
//! （例: /app/backend/uploads/dataset/dog/dog1.jpg）を、
//! 画像配信APIのURLへ書き換える。バックエンド側の名前空間と
//! バイト単位で一致させる必要がある。

/// 配信URLリゾルバ
///
/// 変換は純粋関数で、同じ入力には常に同じ出力を返す。失敗はせず、
/// 解釈できないパスは決め打ちのフォールバックに落とす。
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    backend_root: String,
}

/// queries配下のURLに挟む固定プレースホルダセグメント
const QUERY_PLACEHOLDER: &str = "_";

impl ResourceLocator {
    pub fn new(backend_url: impl Into<String>) -> Self {
        let backend_root = backend_url.into().trim_end_matches('/').to_string();
        Self { backend_root }
    }

    /// ストレージパスを配信URLへ解決する
    ///
    /// - `.../uploads/dataset/<category>/<rest...>` →
    ///   `{root}/api/images/dataset/<category>/<rest...>`
    /// - `.../uploads/queries/<rest...>` →
    ///   `{root}/api/images/queries/_/<rest...>`
    /// - `/uploads/` マーカーなし → 入力をそのまま返す
    /// - それ以外 → `{root}/uploads/<relative>`
    pub fn resolve(&self, storage_path: &str) -> String {
        let Some((_, relative)) = storage_path.split_once("/uploads/") else {
            return storage_path.to_string();
        };

        let parts: Vec<&str> = relative.split('/').collect();
        match parts.as_slice() {
            ["dataset", category, rest @ ..] if !rest.is_empty() => format!(
                "{}/api/images/dataset/{}/{}",
                self.backend_root,
                category,
                rest.join("/")
            ),
            ["queries", rest @ ..] if !rest.is_empty() => format!(
                "{}/api/images/queries/{}/{}",
                self.backend_root,
                QUERY_PLACEHOLDER,
                rest.join("/")
            ),
            _ => format!("{}/uploads/{}", self.backend_root, relative),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> ResourceLocator {
        ResourceLocator::new("http://localhost:8000")
    }

    #[test]
    fn test_resolve_dataset_path() {
        let url = locator().resolve("/app/backend/uploads/dataset/dog/dog1.jpg");
        assert_eq!(url, "http://localhost:8000/api/images/dataset/dog/dog1.jpg");
    }

    #[test]
    fn test_resolve_dataset_nested_path() {
        // カテゴリ以下に階層があっても結合して渡す
        let url = locator().resolve("/app/backend/uploads/dataset/cat/batch1/cat2.png");
        assert_eq!(
            url,
            "http://localhost:8000/api/images/dataset/cat/batch1/cat2.png"
        );
    }

    #[test]
    fn test_resolve_query_path() {
        let url = locator().resolve("/app/backend/uploads/queries/abc-123.jpg");
        assert_eq!(url, "http://localhost:8000/api/images/queries/_/abc-123.jpg");
    }

    #[test]
    fn test_resolve_without_marker() {
        // マーカーがなければ入力をそのまま返す
        let url = locator().resolve("/some/other/path.jpg");
        assert_eq!(url, "/some/other/path.jpg");
    }

    #[test]
    fn test_resolve_unrecognized_shape_falls_back() {
        // dataset直下にカテゴリがない → 静的配信パスへフォールバック
        let url = locator().resolve("/app/backend/uploads/dataset/orphan.jpg");
        assert_eq!(url, "http://localhost:8000/uploads/dataset/orphan.jpg");

        // 未知のトップセグメント
        let url = locator().resolve("/app/backend/uploads/thumbnails/t1.jpg");
        assert_eq!(url, "http://localhost:8000/uploads/thumbnails/t1.jpg");
    }

    #[test]
    fn test_resolve_empty_queries_falls_back() {
        // queries直下にファイル名がない → 静的配信パスへフォールバック
        let url = locator().resolve("/app/backend/uploads/queries");
        assert_eq!(url, "http://localhost:8000/uploads/queries");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let loc = locator();
        let path = "/app/backend/uploads/dataset/dog/dog1.jpg";
        assert_eq!(loc.resolve(path), loc.resolve(path));
    }

    #[test]
    fn test_trailing_slash_on_root_is_trimmed() {
        let loc = ResourceLocator::new("http://localhost:8000/");
        let url = loc.resolve("/app/backend/uploads/queries/q.jpg");
        assert_eq!(url, "http://localhost:8000/api/images/queries/_/q.jpg");
    }
}
