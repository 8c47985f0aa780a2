use thiserror::Error;

/// Errors surfaced by the route-search engine to its driver.
///
/// `CycleDetected` from the design notes has no variant here: a cycle is
/// handled inline by discarding the offending outcome (see `route::expand`)
/// and never reaches a caller.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A chemistry adapter call that the engine cannot absorb failed.
    /// `apply_template` and `lookup_price` failures are absorbed instead
    /// (empty outcome list / unpriced), per the adapter contract.
    #[error("adapter call failed: {0}")]
    Adapter(String),

    #[error("unrecognized path format {0:?}, expected \"json\" or \"graph\"")]
    BadFormat(String),

    /// Selection produced no options at a chemical whose out-degree was
    /// still below `max_branching`. Unreachable if invariants I1-I9 hold;
    /// surfaced as a hard failure rather than silently picking nothing.
    #[error("selection produced no options at chemical {chemical:?}")]
    EmptyOptions { chemical: String },

    #[error("node already exists: {0:?}")]
    DuplicateNode(String),
}

pub type Result<T> = std::result::Result<T, RouteError>;
