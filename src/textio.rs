//! Reading exports and writing reports in a configurable legacy encoding.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use encoding_rs::Encoding;
use log::{debug, warn};

use crate::error::{Result, TfsLogError};

pub const DEFAULT_ENCODING: &str = "utf-8";

/// Looks up an encoding by its WHATWG label (`gbk`, `gb18030`, `utf-8`, ...).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| TfsLogError::UnknownEncoding(label.to_string()))
}

/// Reads the whole export and decodes it. A byte order mark overrides the
/// configured encoding.
pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    if !path.exists() {
        return Err(TfsLogError::InputNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(
            "{} contains bytes that are not valid {}, replaced with U+FFFD",
            path.display(),
            used.name()
        );
    }
    debug!("read {} bytes from {} as {}", bytes.len(), path.display(), used.name());

    Ok(text.into_owned())
}

/// Creates the parent directory of `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir).map_err(|source| TfsLogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Writes `text` to `path`, replacing any previous content.
pub fn write_text(path: &Path, text: &str, encoding: &'static Encoding) -> Result<()> {
    ensure_parent_dir(path)?;

    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        warn!(
            "some characters cannot be represented in {}, written as numeric references",
            encoding.name()
        );
    }

    let to_output_error = |source: std::io::Error| TfsLogError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_output_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(to_output_error)?;
    writer.flush().map_err(to_output_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_encoding_labels() {
        assert_eq!(resolve_encoding("GBK").unwrap().name(), "GBK");
        assert_eq!(resolve_encoding(" utf8 ").unwrap().name(), "UTF-8");
        assert!(matches!(
            resolve_encoding("klingon"),
            Err(TfsLogError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("tfs.txt");
        let err = read_text(&missing, encoding_rs::UTF_8).unwrap_err();
        assert!(matches!(err, TfsLogError::InputNotFound(p) if p == missing));
    }

    #[test]
    fn test_gbk_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        let gbk = resolve_encoding("gbk").unwrap();

        write_text(&path, "用户: 张三\n", gbk).unwrap();
        let raw = fs::read(&path).unwrap();
        assert_ne!(raw, "用户: 张三\n".as_bytes());
        assert_eq!(read_text(&path, gbk).unwrap(), "用户: 张三\n");
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_text(&path, "a much longer first version\n", encoding_rs::UTF_8).unwrap();
        write_text(&path, "short\n", encoding_rs::UTF_8).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn test_create_dir_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_text(&blocker.join("sub").join("x.csv"), "x", encoding_rs::UTF_8).unwrap_err();
        assert!(matches!(err, TfsLogError::CreateDir { .. }));
    }
}
