use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Per-user state directory.
///
/// ```text
/// <root>/
///   topics/          <topic>.txt or <topic>.md, one reference document each
///   stop_words.txt   optional, replaces the English stop-word list
///   lemmas.txt       optional, extra `word lemma` pairs
/// ```
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Pick the root from `--data-dir`, then `DOCQA_DATA_DIR`, then the XDG
    /// data home, and create it. Only the root is created here; `topics/`
    /// is created by [`DataDir::topics_dir`] when a command reads topics.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let root = if let Some(path) = explicit {
            path.to_path_buf()
        } else if let Ok(val) = std::env::var("DOCQA_DATA_DIR") {
            PathBuf::from(val)
        } else {
            xdg::BaseDirectories::with_prefix("docqa")
                .get_data_home()
                .ok_or_else(|| {
                    Error::Config(
                        "could not determine XDG data home directory".into(),
                    )
                })?
        };

        std::fs::create_dir_all(&root)
            .map_err(|_| Error::DataDir(root.clone()))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of `<topic>.txt` / `<topic>.md` files, created on demand.
    pub fn topics_dir(&self) -> Result<PathBuf> {
        let path = self.root.join("topics");
        std::fs::create_dir_all(&path)
            .map_err(|_| Error::DataDir(path.clone()))?;
        Ok(path)
    }

    /// Stop-word override, if the user placed one in the data directory.
    pub fn stop_words_file(&self) -> Option<PathBuf> {
        Some(self.root.join("stop_words.txt")).filter(|p| p.is_file())
    }

    /// Lemma dictionary extension, if present.
    pub fn lemmas_file(&self) -> Option<PathBuf> {
        Some(self.root.join("lemmas.txt")).filter(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_with_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::resolve(Some(tmp.path())).unwrap();

        assert_eq!(dir.root(), tmp.path());
        assert!(!tmp.path().join("topics").exists());
        assert!(dir.stop_words_file().is_none());
        assert!(dir.lemmas_file().is_none());
    }

    #[test]
    fn topics_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::resolve(Some(tmp.path())).unwrap();
        let topics = dir.topics_dir().unwrap();

        assert!(topics.is_dir());
        assert_eq!(topics, tmp.path().join("topics"));
    }

    #[test]
    fn optional_files_are_found() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("stop_words.txt"), "the\n").unwrap();
        std::fs::write(tmp.path().join("lemmas.txt"), "cacti cactus\n")
            .unwrap();

        let dir = DataDir::resolve(Some(tmp.path())).unwrap();
        assert_eq!(
            dir.stop_words_file(),
            Some(tmp.path().join("stop_words.txt"))
        );
        assert_eq!(dir.lemmas_file(), Some(tmp.path().join("lemmas.txt")));
    }

    #[test]
    fn nested_root_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let dir = DataDir::resolve(Some(nested.as_path())).unwrap();
        assert!(dir.root().is_dir());
    }
}
