//! Atomic artifact staging.
//!
//! Every artifact is written in full to `<path>.tmp`; the temporaries are
//! renamed into place only once all artifacts of the run have been staged,
//! so a failed run never exposes a partial artifact set. Dropping the stager
//! without committing removes the temporaries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Collects staged artifacts and renames them into place on commit.
#[derive(Debug, Default)]
pub struct OutputStager {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl OutputStager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `contents` to the staging twin of `path`.
    pub fn stage(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, contents)?;
        tracing::debug!(path = %path.display(), "staged artifact");
        self.staged.push((tmp, path.to_path_buf()));
        Ok(())
    }

    /// Make every staged artifact visible. Renames happen only after all
    /// writes succeeded; an earlier stage failure means this is never
    /// reached and the temporaries are cleaned up on drop.
    pub fn commit(mut self) -> io::Result<()> {
        for (tmp, path) in std::mem::take(&mut self.staged) {
            fs::rename(&tmp, &path)?;
        }
        Ok(())
    }
}

impl Drop for OutputStager {
    fn drop(&mut self) {
        for (tmp, _) in &self.staged {
            let _ = fs::remove_file(tmp);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn commit_renames_all() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.h");
        let b = dir.path().join("b.c");

        let mut stager = OutputStager::new();
        stager.stage(&a, "aa").unwrap();
        stager.stage(&b, "bb").unwrap();
        // Nothing visible until commit.
        assert!(!a.exists());
        assert!(!b.exists());

        stager.commit().unwrap();
        assert_eq!(fs::read_to_string(&a).unwrap(), "aa");
        assert_eq!(fs::read_to_string(&b).unwrap(), "bb");
        assert!(!dir.path().join("a.h.tmp").exists());
    }

    #[test]
    fn drop_without_commit_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.h");
        {
            let mut stager = OutputStager::new();
            stager.stage(&a, "aa").unwrap();
        }
        assert!(!a.exists());
        assert!(!dir.path().join("a.h.tmp").exists());
    }
}
