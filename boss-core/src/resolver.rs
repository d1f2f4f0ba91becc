use crate::catalog::{Region, TaskKind};

/// Path prefix the delivery host serves task sheets under.
pub const TASKSHEET_PREFIX: &str = "p01/tasksheet/1/";

/// Map an inbound request path back to catalog coordinates.
///
/// The token sets are fixed, so at most one (region, task) pair can match a
/// well-formed path; `None` is the "unknown" answer and callers decide
/// whether that is an error.
pub fn resolve_task(path: &str) -> Option<(Region, TaskKind)> {
    for region in Region::ALL {
        for task in TaskKind::ALL {
            let needle = format!("{TASKSHEET_PREFIX}{}/{}", region.token(), task.token());
            if path.contains(&needle) {
                return Some((region, task));
            }
        }
    }
    None
}
