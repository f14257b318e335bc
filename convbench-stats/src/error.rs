//! Analysis Errors

use thiserror::Error;

/// Caller errors from comparative analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Reference position {reference} out of range for {len} runs")]
    ReferenceOutOfRange { reference: usize, len: usize },

    #[error("Candidate position {candidate} out of range for {len} runs")]
    CandidateOutOfRange { candidate: usize, len: usize },

    #[error("Run collection is empty")]
    EmptyCollection,

    #[error("Sweep needs at least one step")]
    ZeroSteps,
}
