use crate::error::{Result, SimSearchError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// バックエンドが受け付ける画像拡張子
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// フォルダ直下の画像を列挙する（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(SimSearchError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if is_image_path(path) {
            images.push(path.to_path_buf());
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

/// 拡張子が画像かどうか（大文字小文字は区別しない）
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}

/// 拡張子からMIMEタイプを推定する
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("dog.jpg")));
        assert!(is_image_path(Path::new("dog.JPG")));
        assert!(is_image_path(Path::new("cat.jpeg")));
        assert!(is_image_path(Path::new("owl.png")));
        assert!(is_image_path(Path::new("bee.webp")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("result.json")));
        assert!(!is_image_path(Path::new("noext")));
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_for(Path::new("a.jpg")), "image/jpeg");
        // 不明な拡張子はjpegをデフォルトにする
        assert_eq!(mime_for(Path::new("a")), "image/jpeg");
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_folder_empty() {
        let temp_dir = std::env::temp_dir().join("simsearch-test-empty");
        fs::create_dir_all(&temp_dir).unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        assert!(result.is_empty());

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_scan_folder_with_images() {
        let temp_dir = std::env::temp_dir().join("simsearch-test-images");
        fs::create_dir_all(&temp_dir).unwrap();

        File::create(temp_dir.join("dog1.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("dog2.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("cat1.webp")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("readme.txt")).unwrap().write_all(b"text").unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].file_name().unwrap(), "cat1.webp");
        assert_eq!(result[1].file_name().unwrap(), "dog1.jpg");
        assert_eq!(result[2].file_name().unwrap(), "dog2.PNG");

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_scan_folder_ignores_subdirs() {
        let temp_dir = std::env::temp_dir().join("simsearch-test-subdirs");
        fs::create_dir_all(temp_dir.join("nested")).unwrap();

        File::create(temp_dir.join("top.jpg")).unwrap();
        File::create(temp_dir.join("nested").join("deep.jpg")).unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].file_name().unwrap(), "top.jpg");

        fs::remove_dir_all(&temp_dir).ok();
    }
}
