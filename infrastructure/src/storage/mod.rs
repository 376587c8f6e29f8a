//! Storage adapters implementing the
//! [`QuizGateway`](quizpatch_application::QuizGateway) port.
//!
//! - [`InMemoryQuizGateway`] - process-local map, for tests and embedding
//! - [`JsonFileQuizGateway`] - one JSON document per quiz, replaced atomically
//!
//! Both enforce optimistic versioning on save and assign ids to new nodes.

mod json_file;
mod memory;

pub use json_file::JsonFileQuizGateway;
pub use memory::InMemoryQuizGateway;

use quizpatch_application::{GatewayError, VersionedQuiz};
use quizpatch_domain::{DomainError, EntityKind, PatchLimits, Quiz};

/// Id for a node inserted by a patch.
fn new_node_id(_kind: EntityKind) -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Shared save step: version check, id assignment, version bump.
fn commit(
    current: Option<&VersionedQuiz>,
    mut quiz: Quiz,
    expected_version: u64,
) -> Result<VersionedQuiz, GatewayError> {
    let current = current.ok_or_else(|| GatewayError::NotFound(quiz.id.clone()))?;
    if current.version != expected_version {
        return Err(GatewayError::Conflict {
            quiz_id: quiz.id,
            expected: expected_version,
            actual: current.version,
        });
    }
    quiz.assign_missing_ids(new_node_id);
    Ok(VersionedQuiz::new(quiz, current.version + 1))
}

/// Prepare a quiz that enters storage for the first time.
///
/// The quiz is held to the same text rules a patch is, so nothing stored
/// here can later be refused by the reconciler as corrupt.
fn first_version(mut quiz: Quiz, limits: &PatchLimits) -> Result<VersionedQuiz, GatewayError> {
    limits.check_quiz(&quiz).map_err(|e| match e {
        DomainError::InvalidPatch(reason) => GatewayError::InvalidQuiz(reason),
        other => GatewayError::InvalidQuiz(other.to_string()),
    })?;
    quiz.assign_missing_ids(new_node_id);
    Ok(VersionedQuiz::new(quiz, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizpatch_domain::{Answer, Question};

    #[test]
    fn test_commit_bumps_version_and_assigns_ids() {
        let current = VersionedQuiz::new(Quiz::new("Q1", "T"), 3);
        let next = Quiz::new("Q1", "T")
            .with_questions(vec![Question::new("new").with_answers(vec![Answer::new("x", true)])]);

        let stored = commit(Some(&current), next, 3).unwrap();
        assert_eq!(stored.version, 4);
        assert!(!stored.quiz.has_unsaved_nodes());
    }

    #[test]
    fn test_commit_rejects_stale_version() {
        let current = VersionedQuiz::new(Quiz::new("Q1", "T"), 3);
        let err = commit(Some(&current), Quiz::new("Q1", "T"), 2).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Conflict {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_commit_missing_quiz_is_not_found() {
        let err = commit(None, Quiz::new("Q1", "T"), 1).unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[test]
    fn test_first_version_rejects_duplicate_ids() {
        let quiz = Quiz::new("Q1", "T").with_questions(vec![
            Question::with_id("A1", "x"),
            Question::with_id("A1", "y"),
        ]);
        assert!(matches!(
            first_version(quiz, &PatchLimits::default()),
            Err(GatewayError::InvalidQuiz(_))
        ));
    }

    #[test]
    fn test_first_version_rejects_blank_text() {
        let quiz = Quiz::new("Q1", "   ").with_questions(vec![
            Question::new("").with_answers(vec![Answer::new("", true)]),
        ]);
        let err = first_version(quiz, &PatchLimits::default()).unwrap_err();
        assert_eq!(
            err,
            GatewayError::InvalidQuiz("title must not be blank".to_string())
        );
    }

    #[test]
    fn test_first_version_uses_given_limits() {
        let quiz = Quiz::new("Q1", "A long quiz title");
        assert!(first_version(quiz.clone(), &PatchLimits::default()).is_ok());

        let err = first_version(quiz, &PatchLimits::default().with_max_title_len(5)).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidQuiz(_)));
    }
}
