//! Record identity and the typed read-model contract.
//!
//! Documents travel between the service and the store as BSON. Typed
//! records are decoded from those documents after enrichment and encoded to
//! JSON for clients, where identifiers appear as 24-character hex strings.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Store-native record identifier.
pub type RecordId = bson::oid::ObjectId;

/// Store wire format.
pub type Document = bson::Document;

/// Conversion of caller-supplied identifiers into [`RecordId`].
///
/// `None` means the input cannot name any record; services treat that as a
/// lookup miss rather than a malformed request.
///
/// # Examples
/// ```
/// use recipebook::domain::IntoRecordId;
///
/// assert!("65f1c0ffee00000000000001".into_record_id().is_some());
/// assert!("not-an-id".into_record_id().is_none());
/// ```
pub trait IntoRecordId {
    /// Coerce into a store identifier.
    fn into_record_id(self) -> Option<RecordId>;
}

impl IntoRecordId for RecordId {
    fn into_record_id(self) -> Option<RecordId> {
        Some(self)
    }
}

impl IntoRecordId for &RecordId {
    fn into_record_id(self) -> Option<RecordId> {
        Some(*self)
    }
}

impl IntoRecordId for &str {
    fn into_record_id(self) -> Option<RecordId> {
        RecordId::parse_str(self.trim()).ok()
    }
}

impl IntoRecordId for &String {
    fn into_record_id(self) -> Option<RecordId> {
        self.as_str().into_record_id()
    }
}

impl IntoRecordId for String {
    fn into_record_id(self) -> Option<RecordId> {
        self.as_str().into_record_id()
    }
}

/// Typed read model stored in one collection.
///
/// `Draft` is the create/update payload. It is what validation hooks
/// inspect and what the default parse hook writes to the store.
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    /// Client-supplied payload for create and update.
    type Draft: Serialize + Send + Sync + 'static;

    /// Identifier of this record.
    fn id(&self) -> RecordId;
}

/// Serde helpers emitting identifiers as hex strings.
///
/// bson decodes `_id` natively; these only shape the JSON side.
pub mod hex_id {
    use serde::Serializer;

    use super::RecordId;

    /// Serialise an identifier as its hex string.
    pub fn serialize<S: Serializer>(id: &RecordId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_hex())
    }
}
