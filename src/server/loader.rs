use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Read every regular file directly inside `dir`.
///
/// Keys are file names, values the file contents, ordered by file name.
/// Subdirectories are skipped. A file that cannot be read, or is not UTF-8,
/// fails the whole load. Non-UTF-8 file names are converted lossily; when
/// two of them end up as the same key the first one (by path) is kept.
pub fn load_library(dir: impl AsRef<Path>) -> Result<IndexMap<String, String>> {
    let dir = dir.as_ref();
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| Error::Io { path, source }
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let entry = entry.map_err(io_err(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_err(&path))?;
        if file_type.is_dir() {
            tracing::warn!(path = %path.display(), "skipping directory");
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push((name, path));
    }
    files.sort();

    let mut contents: IndexMap<String, String> = IndexMap::with_capacity(files.len());
    for (name, path) in files {
        if contents.contains_key(&name) {
            tracing::warn!(document = %name, path = %path.display(), "duplicate document name, skipping");
            continue;
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::InvalidData => return Err(Error::InvalidUtf8 { path }),
            Err(source) => return Err(Error::Io { path, source }),
        };
        tracing::debug!(document = %name, bytes = text.len(), "loaded");
        contents.insert(name, text);
    }
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "the dog sat").unwrap();
        fs::write(dir.path().join("a.txt"), "the cat sat").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "ignored").unwrap();

        let library = load_library(dir.path()).unwrap();
        assert_eq!(library.keys().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
        assert_eq!(library["a.txt"], "the cat sat");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        match load_library(&missing) {
            Err(Error::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_utf8_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(matches!(load_library(dir.path()), Err(Error::InvalidUtf8 { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn colliding_file_names_keep_the_first_file() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        // both names become "doc\u{FFFD}" once made lossy
        fs::write(dir.path().join(OsStr::from_bytes(b"doc\xfe")), "first").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"doc\xff")), "second").unwrap();

        let library = load_library(dir.path()).unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library["doc\u{FFFD}"], "first");
    }

    #[test]
    fn empty_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_library(dir.path()).unwrap().is_empty());
    }
}
