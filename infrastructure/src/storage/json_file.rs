//! JSON file quiz gateway.
//!
//! Layout: `<dir>/<quiz_id>.json` holding a [`VersionedQuiz`] document, next
//! to a `<quiz_id>.lock` file. Writers hold an exclusive `flock` on the lock
//! file for the whole read-compare-write, so saves to one quiz are serialized
//! across gateway instances and processes.
//!
//! A document is replaced by writing a named temp file in the same
//! directory, syncing it, renaming it over the target and syncing the
//! directory. Readers see either the old or the new aggregate.

use super::{commit, first_version};
use async_trait::async_trait;
use quizpatch_application::{GatewayError, QuizGateway, VersionedQuiz};
use quizpatch_domain::{PatchLimits, Quiz, QuizId};
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Quiz gateway storing one JSON document per quiz in a directory.
///
/// File I/O runs on the blocking pool. Cross-process locking relies on
/// `flock` and is only available on Unix.
pub struct JsonFileQuizGateway {
    dir: PathBuf,
    limits: PatchLimits,
}

impl JsonFileQuizGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            limits: PatchLimits::default(),
        }
    }

    /// Text limits a new quiz must satisfy in [`insert`](Self::insert).
    pub fn with_limits(mut self, limits: PatchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store a quiz that does not exist yet, at version 1.
    ///
    /// Fails with [`GatewayError::InvalidQuiz`] when the quiz breaks the text
    /// rules and with [`GatewayError::Conflict`] when the id is taken.
    pub async fn insert(&self, quiz: Quiz) -> Result<VersionedQuiz, GatewayError> {
        let path = self.path_for(&quiz.id)?;
        let dir = self.dir.clone();
        let limits = self.limits;

        let stored = run_blocking(move || {
            fs::create_dir_all(&dir).map_err(|e| storage_error("create", &dir, e))?;
            let _lock = QuizLock::acquire(&path)?;
            if let Some(existing) = read_document(&quiz.id, &path)? {
                return Err(GatewayError::Conflict {
                    quiz_id: quiz.id,
                    expected: 0,
                    actual: existing.version,
                });
            }
            let stored = first_version(quiz, &limits)?;
            write_document(&path, &stored)?;
            Ok(stored)
        })
        .await?;

        info!("Imported quiz {} into {}", stored.quiz.id, self.dir.display());
        Ok(stored)
    }

    /// Map a quiz id to its file, rejecting ids that are not plain file names.
    fn path_for(&self, id: &QuizId) -> Result<PathBuf, GatewayError> {
        let valid = !id.as_str().is_empty()
            && id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(GatewayError::NotFound(id.clone()));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }
}

#[async_trait]
impl QuizGateway for JsonFileQuizGateway {
    async fn load(&self, id: &QuizId) -> Result<VersionedQuiz, GatewayError> {
        let path = self.path_for(id)?;
        let id = id.clone();
        run_blocking(move || read_document(&id, &path)?.ok_or(GatewayError::NotFound(id))).await
    }

    async fn save(&self, quiz: Quiz, expected_version: u64) -> Result<VersionedQuiz, GatewayError> {
        let path = self.path_for(&quiz.id)?;

        let (stored, path) = run_blocking(move || {
            // An unknown quiz gets no lock file.
            if !path.exists() {
                return Err(GatewayError::NotFound(quiz.id));
            }
            let _lock = QuizLock::acquire(&path)?;
            let current = read_document(&quiz.id, &path)?;
            let stored = commit(current.as_ref(), quiz, expected_version)?;
            write_document(&path, &stored)?;
            Ok((stored, path))
        })
        .await?;

        debug!(
            "Wrote quiz {} version {} to {}",
            stored.quiz.id,
            stored.version,
            path.display()
        );
        Ok(stored)
    }
}

/// Exclusive lock on `<quiz_id>.lock`, released when dropped.
struct QuizLock {
    _file: File,
}

impl QuizLock {
    fn acquire(document: &Path) -> Result<Self, GatewayError> {
        let path = document.with_extension("lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| storage_error("open", &path, e))?;
        lock_exclusive(&file).map_err(|e| storage_error("lock", &path, e))?;
        Ok(Self { _file: file })
    }
}

/// Block until an exclusive `flock` is held on `file`.
#[cfg(unix)]
#[allow(unsafe_code)]
fn lock_exclusive(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    loop {
        // SAFETY: the descriptor comes from an open `File` that outlives this
        // call, and `LOCK_EX` is a valid `flock` operation.
        let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
        if rc == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(unix))]
fn lock_exclusive(_: &File) -> io::Result<()> {
    Ok(())
}

fn read_document(id: &QuizId, path: &Path) -> Result<Option<VersionedQuiz>, GatewayError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("read", path, e)),
    };
    let stored: VersionedQuiz = serde_json::from_str(&content)
        .map_err(|e| GatewayError::Serialization(format!("{}: {}", path.display(), e)))?;
    if &stored.quiz.id != id {
        return Err(GatewayError::Storage(format!(
            "{} holds quiz {}, expected {}",
            path.display(),
            stored.quiz.id,
            id
        )));
    }
    Ok(Some(stored))
}

/// Replace `path` with the serialized document: temp file, fsync, rename,
/// then fsync the directory so the rename itself is durable.
fn write_document(path: &Path, stored: &VersionedQuiz) -> Result<(), GatewayError> {
    let json = serde_json::to_vec_pretty(stored)
        .map_err(|e| GatewayError::Serialization(e.to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| storage_error("create temp file in", dir, e))?;
    tmp.write_all(&json)
        .and_then(|()| tmp.flush())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| storage_error("write", tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| storage_error("replace", path, e.error))?;

    sync_directory(dir).map_err(|e| storage_error("sync", dir, e))
}

#[cfg(unix)]
fn sync_directory(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_directory(_: &Path) -> io::Result<()> {
    Ok(())
}

async fn run_blocking<T, F>(task: F) -> Result<T, GatewayError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, GatewayError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| GatewayError::Storage(format!("storage task failed: {}", e)))?
}

fn storage_error(action: &str, path: &Path, error: io::Error) -> GatewayError {
    GatewayError::Storage(format!("could not {} {}: {}", action, path.display(), error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizpatch_domain::{Answer, Question};
    use std::sync::Arc;

    fn quiz() -> Quiz {
        Quiz::new("Q1", "Arithmetic").with_questions(vec![
            Question::with_id("A1", "2+2=?").with_answers(vec![
                Answer::with_id("a1", "4", true),
                Answer::with_id("a2", "5", false),
            ]),
        ])
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_insert_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path().join("store"));

        gateway.insert(quiz()).await.unwrap();
        let loaded = gateway.load(&QuizId::from("Q1")).await.unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.quiz, quiz());
        assert!(dir.path().join("store").join("Q1.json").exists());
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_text_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path());
        let mut invalid = quiz();
        invalid.questions[0].answers[1].text = " ".to_string();

        let err = gateway.insert(invalid).await.unwrap_err();

        assert_eq!(
            err,
            GatewayError::InvalidQuiz("question #1: answer #2: text must not be blank".to_string())
        );
        assert!(!dir.path().join("Q1.json").exists());
    }

    #[tokio::test]
    async fn test_insert_twice_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path());
        gateway.insert(quiz()).await.unwrap();

        let err = gateway.insert(quiz()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Conflict { actual: 1, .. }));
    }

    #[tokio::test]
    async fn test_save_replaces_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path());
        gateway.insert(quiz()).await.unwrap();

        let mut next = quiz();
        next.questions[0].answers.remove(1);
        next.questions
            .push(Question::new("3+3=?").with_answers(vec![Answer::new("6", true)]));
        let stored = gateway.save(next, 1).await.unwrap();

        assert_eq!(stored.version, 2);
        assert!(!stored.quiz.has_unsaved_nodes());
        assert_eq!(file_names(dir.path()), vec!["Q1.json", "Q1.lock"]);

        let reloaded = gateway.load(&QuizId::from("Q1")).await.unwrap();
        assert_eq!(reloaded, stored);
    }

    #[tokio::test]
    async fn test_stale_save_conflicts_and_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path());
        gateway.insert(quiz()).await.unwrap();
        gateway.save(quiz(), 1).await.unwrap();

        let mut stale = quiz();
        stale.title = "Stale".to_string();
        let err = gateway.save(stale, 1).await.unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Conflict {
                expected: 1,
                actual: 2,
                ..
            }
        ));
        let stored = gateway.load(&QuizId::from("Q1")).await.unwrap();
        assert_eq!(stored.quiz.title, "Arithmetic");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_two_gateways_on_one_directory_commit_each_version_once() {
        let dir = tempfile::tempdir().unwrap();
        let first = Arc::new(JsonFileQuizGateway::new(dir.path()));
        let second = Arc::new(JsonFileQuizGateway::new(dir.path()));
        first.insert(quiz()).await.unwrap();
        let id = QuizId::from("Q1");

        let rounds = 50;
        for round in 0..rounds {
            let base = first.load(&id).await.unwrap();
            let mut from_first = base.quiz.clone();
            from_first.title = format!("first {}", round);
            let mut from_second = base.quiz.clone();
            from_second.title = format!("second {}", round);

            let (a, b) = tokio::join!(
                tokio::spawn({
                    let gateway = first.clone();
                    async move { gateway.save(from_first, base.version).await }
                }),
                tokio::spawn({
                    let gateway = second.clone();
                    async move { gateway.save(from_second, base.version).await }
                }),
            );
            let results = [a.unwrap(), b.unwrap()];

            let committed = results.iter().filter(|r| r.is_ok()).count();
            assert_eq!(committed, 1, "round {}: {:?}", round, results);
            assert!(
                results
                    .iter()
                    .any(|r| matches!(r, Err(GatewayError::Conflict { .. }))),
                "round {}: {:?}",
                round,
                results
            );
        }

        let stored = second.load(&id).await.unwrap();
        assert_eq!(stored.version, 1 + rounds);
        assert_eq!(file_names(dir.path()), vec!["Q1.json", "Q1.lock"]);
    }

    #[tokio::test]
    async fn test_missing_quiz_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path());

        let err = gateway.load(&QuizId::from("Q9")).await.unwrap_err();
        assert_eq!(err, GatewayError::NotFound(QuizId::from("Q9")));

        let err = gateway.save(quiz(), 1).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
        assert!(file_names(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_path_like_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path());
        let err = gateway
            .load(&QuizId::from("../etc/passwd"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Q1.json"), "{not json").unwrap();
        let gateway = JsonFileQuizGateway::new(dir.path());

        let err = gateway.load(&QuizId::from("Q1")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Serialization(_)));
    }
}
