use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimSearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("クエリ画像が選択されていません")]
    NoQueryImage,

    #[error("インデックスが未構築です。`simsearch build-index` で構築してください")]
    IndexNotBuilt,

    #[error("アップロードするファイルが選択されていません")]
    NoFilesSelected,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    // バックエンドのdetailメッセージをそのまま表示する
    #[error("{0}")]
    Backend(String),

    #[error("API呼び出しエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

impl SimSearchError {
    /// ネットワーク到達前に弾かれる前提条件違反かどうか
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SimSearchError::NoQueryImage
                | SimSearchError::IndexNotBuilt
                | SimSearchError::NoFilesSelected
        )
    }
}

pub type Result<T> = std::result::Result<T, SimSearchError>;
