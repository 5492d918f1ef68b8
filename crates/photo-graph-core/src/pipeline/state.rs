//! Run phase state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Phase of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunPhase {
    Reset,
    Ingesting,
    NodesComplete,
    ComputingSimilarity,
    EdgesApplied,
    Pruned,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::Ingesting => "INGESTING",
            Self::NodesComplete => "NODES_COMPLETE",
            Self::ComputingSimilarity => "COMPUTING_SIMILARITY",
            Self::EdgesApplied => "EDGES_APPLIED",
            Self::Pruned => "PRUNED",
        }
    }

    /// The phase that must follow this one.
    pub fn next(&self) -> Option<RunPhase> {
        match self {
            Self::Reset => Some(Self::Ingesting),
            Self::Ingesting => Some(Self::NodesComplete),
            Self::NodesComplete => Some(Self::ComputingSimilarity),
            Self::ComputingSimilarity => Some(Self::EdgesApplied),
            Self::EdgesApplied => Some(Self::Pruned),
            Self::Pruned => None,
        }
    }

    /// Whether the store holds a complete node set in this phase.
    pub fn nodes_complete(&self) -> bool {
        matches!(
            self,
            Self::NodesComplete | Self::ComputingSimilarity | Self::EdgesApplied | Self::Pruned
        )
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the phase of one run and rejects illegal transitions.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    phase: Option<RunPhase>,
    transitions: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase, `None` before the first reset.
    pub fn phase(&self) -> Option<RunPhase> {
        self.phase
    }

    /// Number of accepted transitions.
    pub fn transitions(&self) -> usize {
        self.transitions
    }

    /// Moves to `to`.
    ///
    /// Accepted: any phase to `RESET`, `INGESTING` to itself, and each phase
    /// to its successor.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidTransition` for anything else; the phase is unchanged.
    pub fn advance(&mut self, to: RunPhase) -> CoreResult<()> {
        let allowed = match (self.phase, to) {
            (_, RunPhase::Reset) => true,
            (Some(RunPhase::Ingesting), RunPhase::Ingesting) => true,
            (Some(from), to) => from.next() == Some(to),
            (None, _) => false,
        };

        if !allowed {
            return Err(CoreError::InvalidTransition {
                from: self
                    .phase
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_else(|| "START".to_string()),
                to,
            });
        }

        self.phase = Some(to);
        self.transitions += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sequence() {
        let mut state = RunState::new();
        for phase in [
            RunPhase::Reset,
            RunPhase::Ingesting,
            RunPhase::Ingesting,
            RunPhase::Ingesting,
            RunPhase::NodesComplete,
            RunPhase::ComputingSimilarity,
            RunPhase::EdgesApplied,
            RunPhase::Pruned,
        ] {
            state.advance(phase).unwrap();
        }
        assert_eq!(state.phase(), Some(RunPhase::Pruned));
        assert_eq!(state.transitions(), 8);
    }

    #[test]
    fn test_must_start_with_reset() {
        let mut state = RunState::new();
        let err = state.advance(RunPhase::Ingesting).unwrap_err();
        assert_eq!(err.to_string(), "Invalid run transition: START -> INGESTING");
        assert_eq!(state.phase(), None);
    }

    #[test]
    fn test_cannot_skip_phase() {
        let mut state = RunState::new();
        state.advance(RunPhase::Reset).unwrap();
        state.advance(RunPhase::Ingesting).unwrap();
        assert!(state.advance(RunPhase::ComputingSimilarity).is_err());
        assert_eq!(state.phase(), Some(RunPhase::Ingesting));
    }

    #[test]
    fn test_no_ingest_after_nodes_complete() {
        let mut state = RunState::new();
        state.advance(RunPhase::Reset).unwrap();
        state.advance(RunPhase::Ingesting).unwrap();
        state.advance(RunPhase::NodesComplete).unwrap();
        assert!(state.advance(RunPhase::Ingesting).is_err());
    }

    #[test]
    fn test_reset_from_anywhere() {
        let mut state = RunState::new();
        state.advance(RunPhase::Reset).unwrap();
        state.advance(RunPhase::Ingesting).unwrap();
        state.advance(RunPhase::Reset).unwrap();
        assert_eq!(state.phase(), Some(RunPhase::Reset));
    }

    #[test]
    fn test_pruned_is_terminal() {
        assert_eq!(RunPhase::Pruned.next(), None);
        assert!(RunPhase::Pruned.nodes_complete());
        assert!(!RunPhase::Ingesting.nodes_complete());
    }
}
