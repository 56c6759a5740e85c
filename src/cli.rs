use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simsearch")]
#[command(about = "動物画像類似検索クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイルと環境変数より優先）
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// クエリ画像で類似検索を実行
    Search {
        /// クエリ画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 取得件数（デフォルトは設定値）
        #[arg(short = 'k', long)]
        top_k: Option<u32>,

        /// 類似度の下限 (0.0-1.0)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 画像フォルダ（またはファイル）をデータセットへアップロード
    Upload {
        /// 画像フォルダまたは画像ファイルのパス
        #[arg(required = true)]
        path: PathBuf,

        /// カテゴリ名
        #[arg(short, long, default_value = "unknown")]
        category: String,
    },

    /// 検索インデックスを構築/再構築
    BuildIndex,

    /// データセット統計を表示
    Stats {
        /// 統計をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// バックエンドの活動ログを表示
    Logs {
        /// 取得件数（デフォルトは設定値）
        #[arg(short, long)]
        limit: Option<u32>,

        /// ログカテゴリで絞り込み (search/indexing/upload/system)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// カテゴリ一覧（サンプル分類と実データセット）を表示
    Categories,

    /// データセットを全削除（要確認）
    ClearDataset {
        /// 確認プロンプトをスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 活動ログを全削除（要確認）
    ClearLogs {
        /// 確認プロンプトをスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 対話モードで検索セッションを開始
    Session,

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_backend_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
