//! Document Identifier Rewriter
//!
//! Applies the rewrite decision and guarantees that a failed stamp never
//! corrupts the document: on any error the original bytes are returned.

use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{DocumentRewriteError, IdentifierStamper};
use crate::domain::documents::{PassthroughReason, RewriteDecision};
use crate::domain::shared::{ExternalOrderId, LocalOrderId};
use crate::observability::record_document_rewrite;

/// What happened to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStatus {
    /// The identifier was replaced.
    Rewritten,
    /// Nothing to replace.
    Passthrough,
    /// Replacement failed; the original was returned.
    Failed,
}

impl RewriteStatus {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rewritten => "rewritten",
            Self::Passthrough => "passthrough",
            Self::Failed => "failed",
        }
    }
}

/// A document and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Resulting bytes.
    pub document: Vec<u8>,
    /// Outcome.
    pub status: RewriteStatus,
}

/// Rewrites the printed order identifier with a format-specific stamper.
#[derive(Debug, Clone)]
pub struct DocumentIdentifierRewriter<S>
where
    S: IdentifierStamper,
{
    stamper: S,
}

impl<S> DocumentIdentifierRewriter<S>
where
    S: IdentifierStamper,
{
    /// Create a rewriter.
    #[must_use]
    pub const fn new(stamper: S) -> Self {
        Self { stamper }
    }

    /// Replace `local` with `external` in `document`, or pass it through.
    #[must_use]
    pub fn rewrite(
        &self,
        document: Vec<u8>,
        local: Option<&LocalOrderId>,
        external: Option<&ExternalOrderId>,
    ) -> RewriteOutcome {
        match RewriteDecision::decide(local, external) {
            RewriteDecision::Passthrough(reason) => self.passthrough(document, reason),
            RewriteDecision::Rewrite { local, external } => {
                let result = self.stamper.stamp(&document, local, external);
                self.finish(document, local, external, result)
            }
        }
    }

    fn passthrough(&self, document: Vec<u8>, reason: PassthroughReason) -> RewriteOutcome {
        let format = self.stamper.format();
        tracing::debug!(format, %reason, "Document passed through");
        record_document_rewrite(format, RewriteStatus::Passthrough.as_str());
        RewriteOutcome {
            document,
            status: RewriteStatus::Passthrough,
        }
    }

    fn finish(
        &self,
        document: Vec<u8>,
        local: &LocalOrderId,
        external: &ExternalOrderId,
        result: Result<Vec<u8>, DocumentRewriteError>,
    ) -> RewriteOutcome {
        let format = self.stamper.format();
        match result {
            Ok(rewritten) => {
                tracing::info!(format, %local, %external, "Order identifier rewritten");
                record_document_rewrite(format, RewriteStatus::Rewritten.as_str());
                RewriteOutcome {
                    document: rewritten,
                    status: RewriteStatus::Rewritten,
                }
            }
            Err(e) => {
                tracing::warn!(
                    format,
                    error = %e,
                    %local,
                    "Identifier rewrite failed, returning original document"
                );
                record_document_rewrite(format, RewriteStatus::Failed.as_str());
                RewriteOutcome {
                    document,
                    status: RewriteStatus::Failed,
                }
            }
        }
    }
}

impl<S> DocumentIdentifierRewriter<S>
where
    S: IdentifierStamper + 'static,
{
    /// [`Self::rewrite`] with the stamp running on the blocking thread pool.
    ///
    /// A panicking stamper counts as a failed stamp.
    pub async fn rewrite_blocking(
        self: Arc<Self>,
        document: Vec<u8>,
        local: Option<LocalOrderId>,
        external: Option<ExternalOrderId>,
    ) -> RewriteOutcome {
        let (local, external) = match RewriteDecision::decide(local.as_ref(), external.as_ref()) {
            RewriteDecision::Passthrough(reason) => return self.passthrough(document, reason),
            RewriteDecision::Rewrite { local, external } => (local.clone(), external.clone()),
        };

        let original = Arc::new(document);
        let task = {
            let this = Arc::clone(&self);
            let input = Arc::clone(&original);
            let (local, external) = (local.clone(), external.clone());
            tokio::task::spawn_blocking(move || this.stamper.stamp(&input, &local, &external))
        };
        let result = task
            .await
            .unwrap_or_else(|e| Err(DocumentRewriteError::Encode(format!("stamp task failed: {e}"))));

        let document = Arc::try_unwrap(original).unwrap_or_else(|shared| shared.as_ref().clone());
        self.finish(document, &local, &external, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockIdentifierStamper;

    fn stamper() -> MockIdentifierStamper {
        let mut stamper = MockIdentifierStamper::new();
        stamper.expect_format().return_const("test");
        stamper
    }

    fn doc() -> Vec<u8> {
        b"%PDF-1.4 Order ID: 123".to_vec()
    }

    #[test]
    fn no_op_laws_return_identical_bytes() {
        let mut stamper = stamper();
        stamper.expect_stamp().never();
        let rewriter = DocumentIdentifierRewriter::new(stamper);

        let local = LocalOrderId::new("123");
        let empty_local = LocalOrderId::new("");
        let external = ExternalOrderId::new("456");
        let same = ExternalOrderId::new("123");

        let cases = [
            rewriter.rewrite(doc(), Some(&local), None),
            rewriter.rewrite(doc(), Some(&empty_local), Some(&external)),
            rewriter.rewrite(doc(), Some(&local), Some(&same)),
        ];
        for outcome in cases {
            assert_eq!(outcome.document, doc());
            assert_eq!(outcome.status, RewriteStatus::Passthrough);
        }
    }

    #[test]
    fn successful_stamp_returns_new_bytes() {
        let mut stamper = stamper();
        stamper
            .expect_stamp()
            .withf(|_, local, external| local.as_str() == "123" && external.as_str() == "456")
            .returning(|_, _, _| Ok(b"rewritten".to_vec()));
        let rewriter = DocumentIdentifierRewriter::new(stamper);

        let outcome = rewriter.rewrite(
            doc(),
            Some(&LocalOrderId::new("123")),
            Some(&ExternalOrderId::new("456")),
        );
        assert_eq!(outcome.document, b"rewritten".to_vec());
        assert_eq!(outcome.status, RewriteStatus::Rewritten);
    }

    #[test]
    fn failed_stamp_returns_original() {
        let mut stamper = stamper();
        stamper
            .expect_stamp()
            .returning(|_, _, _| Err(DocumentRewriteError::Parse("not a pdf".to_string())));
        let rewriter = DocumentIdentifierRewriter::new(stamper);

        let outcome = rewriter.rewrite(
            doc(),
            Some(&LocalOrderId::new("123")),
            Some(&ExternalOrderId::new("456")),
        );
        assert_eq!(outcome.document, doc());
        assert_eq!(outcome.status, RewriteStatus::Failed);
    }

    #[tokio::test]
    async fn blocking_rewrite_stamps_off_the_runtime() {
        let mut stamper = stamper();
        stamper
            .expect_stamp()
            .returning(|_, _, _| Ok(b"rewritten".to_vec()));
        let rewriter = Arc::new(DocumentIdentifierRewriter::new(stamper));

        let outcome = rewriter
            .rewrite_blocking(
                doc(),
                Some(LocalOrderId::new("123")),
                Some(ExternalOrderId::new("456")),
            )
            .await;
        assert_eq!(outcome.document, b"rewritten".to_vec());
        assert_eq!(outcome.status, RewriteStatus::Rewritten);
    }

    struct PanickingStamper;

    impl IdentifierStamper for PanickingStamper {
        fn format(&self) -> &'static str {
            "test"
        }

        fn stamp(
            &self,
            _document: &[u8],
            _local: &LocalOrderId,
            _external: &ExternalOrderId,
        ) -> Result<Vec<u8>, DocumentRewriteError> {
            panic!("corrupt xref table")
        }
    }

    #[tokio::test]
    async fn blocking_rewrite_survives_panicking_stamper() {
        let rewriter = Arc::new(DocumentIdentifierRewriter::new(PanickingStamper));

        let outcome = rewriter
            .rewrite_blocking(
                doc(),
                Some(LocalOrderId::new("123")),
                Some(ExternalOrderId::new("456")),
            )
            .await;
        assert_eq!(outcome.document, doc());
        assert_eq!(outcome.status, RewriteStatus::Failed);
    }

    #[tokio::test]
    async fn blocking_rewrite_passes_through_without_spawning() {
        let mut stamper = stamper();
        stamper.expect_stamp().never();
        let rewriter = Arc::new(DocumentIdentifierRewriter::new(stamper));

        let outcome = rewriter
            .rewrite_blocking(doc(), Some(LocalOrderId::new("123")), None)
            .await;
        assert_eq!(outcome.document, doc());
        assert_eq!(outcome.status, RewriteStatus::Passthrough);
    }
}
