//! Errors surfaced by the climbing core's boundary operations.

use thiserror::Error;

use crate::surface::SurfaceId;

/// Failures returned by fallible [`Climber`](crate::Climber) operations.
///
/// The per-frame path never fails; these only cover lookups by raw
/// identifiers supplied from outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClimbError {
    /// A tracked-point index outside the supported range was supplied.
    #[error("tracked point {0} does not exist; only indices 0 and 1 are tracked")]
    UnknownHand(usize),
    /// A surface identifier that was never registered was supplied.
    #[error("surface {0} is not registered")]
    UnknownSurface(SurfaceId),
}
