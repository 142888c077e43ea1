//! Entity kind descriptors.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::odata::ODataKey;

/// Describes one kind of entity in the Project Server object graph.
///
/// Kinds are zero-sized markers (see [`crate::kind`]); handles are generic
/// over them so that navigation and actions are only offered where the
/// server supports them.
pub trait Kind: Send + Sync + 'static {
    /// The data returned when the entity is fetched.
    type Data: DeserializeOwned + Send + 'static;

    /// The key type used in `Collection(key)` segments.
    type Id: ODataKey;

    /// OData entity type name, e.g. `PS.Calendar`.
    const ENTITY_TYPE: &'static str;
}

/// Kinds whose collection accepts new entities.
pub trait Creatable: Kind {
    /// The creation-information payload.
    type Creation: Serialize + Send + Sync;
}

/// Kinds that can be deleted without producing a queue job.
pub trait Deletable: Kind {}
