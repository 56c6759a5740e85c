//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use simsearch_rust::error::SimSearchError;
use simsearch_rust::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, SimSearchError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    // テキストファイルのみ作成
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// SimSearchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SimSearchError::Config("テスト設定エラー".to_string()),
        SimSearchError::NoQueryImage,
        SimSearchError::IndexNotBuilt,
        SimSearchError::NoFilesSelected,
        SimSearchError::FileNotFound("query.jpg".to_string()),
        SimSearchError::FolderNotFound("/path/to/folder".to_string()),
        SimSearchError::NoImagesFound("/path/to/folder".to_string()),
        SimSearchError::Backend("Search failed".to_string()),
        SimSearchError::Prompt("入力中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// バックエンドのdetailメッセージはそのまま表示される
#[test]
fn test_backend_error_shows_exact_message() {
    let err = SimSearchError::Backend("No images found".to_string());
    assert_eq!(format!("{}", err), "No images found");

    let err = SimSearchError::Backend("Index not built. Please build the index first.".to_string());
    assert_eq!(
        format!("{}", err),
        "Index not built. Please build the index first."
    );
}

/// IndexNotBuiltエラーのメッセージ確認
#[test]
fn test_index_not_built_message() {
    let err = SimSearchError::IndexNotBuilt;
    let display = format!("{}", err);

    assert!(display.contains("インデックス"));
    assert!(display.contains("build-index"));
}

/// 前提条件違反の判定
#[test]
fn test_is_precondition() {
    assert!(SimSearchError::NoQueryImage.is_precondition());
    assert!(SimSearchError::IndexNotBuilt.is_precondition());
    assert!(SimSearchError::NoFilesSelected.is_precondition());

    assert!(!SimSearchError::Backend("x".into()).is_precondition());
    assert!(!SimSearchError::Config("x".into()).is_precondition());
    assert!(!SimSearchError::FileNotFound("x".into()).is_precondition());
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = SimSearchError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SimSearchError = io_err.into();

    assert!(matches!(err, SimSearchError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: SimSearchError = json_err.into();

    assert!(matches!(err, SimSearchError::JsonParse(_)));
}
