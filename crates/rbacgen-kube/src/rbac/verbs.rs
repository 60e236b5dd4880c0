//! RBAC verb vocabulary and capability-to-verb mapping

use indexmap::IndexSet;
use rbacgen_core::Capabilities;

pub const GET: &str = "get";
pub const LIST: &str = "list";
pub const WATCH: &str = "watch";
pub const CREATE: &str = "create";
pub const UPDATE: &str = "update";
pub const PATCH: &str = "patch";
pub const DELETE: &str = "delete";
pub const DELETE_COLLECTION: &str = "deletecollection";

/// Verbs every dependent needs
pub const READ_VERBS: [&str; 3] = [GET, LIST, WATCH];

/// Verbs added for update-capable dependents
pub const UPDATE_VERBS: [&str; 1] = [UPDATE];

/// Verbs granted on a controller's primary resource
pub const ALL_COMMON_VERBS: [&str; 8] = [
    GET,
    LIST,
    WATCH,
    CREATE,
    UPDATE,
    PATCH,
    DELETE,
    DELETE_COLLECTION,
];

/// Verbs a dependent requires, given its capabilities
///
/// Read verbs always come first. Delete capability adds only `delete`,
/// never `deletecollection`. Create capability adds `create` and `patch`.
pub fn verbs_for(capabilities: &Capabilities) -> Vec<String> {
    let mut verbs: IndexSet<&str> = READ_VERBS.into_iter().collect();

    if capabilities.update {
        verbs.extend(UPDATE_VERBS);
    }
    if capabilities.delete {
        verbs.insert(DELETE);
    }
    if capabilities.create {
        verbs.insert(CREATE);
        verbs.insert(PATCH);
    }

    verbs.into_iter().map(String::from).collect()
}
