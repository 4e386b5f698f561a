use floodroute_core::Point;

/// Malformed search input. An unreachable goal is not an error; searches
/// report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("start {0} is not passable")]
    BlockedStart(Point),
    #[error("end {0} is not passable")]
    BlockedEnd(Point),
    #[error("{0} lies outside the search range")]
    OutOfRange(Point),
    #[error("a route needs at least one cell")]
    EmptyRoute,
    #[error("route cells {0} and {1} are not orthogonally adjacent")]
    Disconnected(Point, Point),
}
