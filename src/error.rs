//! Planner error hierarchy.
//!
//! Every fallible operation in the crate returns `Result<_, PlannerError>`.
//! Errors are never swallowed: they propagate unmodified from the component
//! that detected them up to the caller.

use thiserror::Error;

/// The error kinds a trip plan request can fail with.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// A request field was missing, malformed, or out of its allowed range.
    #[error("invalid request field `{field}`: {message}")]
    InvalidRequest { field: String, message: String },

    /// `DEFAULT_RULE_SET` (or an explicitly requested tag) has no entry in
    /// the rule table.
    #[error("unknown rule set: {0}")]
    UnknownRuleSet(String),

    /// The routing oracle could not be reached, timed out, or returned a
    /// non-success status. Retriable by the caller.
    #[error("routing oracle unavailable: {0}")]
    RoutingUnavailable(String),

    /// The routing oracle responded but the response violated the expected
    /// schema. Not retriable.
    #[error("routing oracle response malformed: {0}")]
    RoutingMalformed(String),

    /// The planner reached a state where no forward progress is possible.
    /// Under a correct algorithm this should never occur; surfacing it
    /// rather than looping forever indicates a bug or corrupted clock state.
    #[error("trip plan infeasible: {0}")]
    PlanInfeasible(String),
}
