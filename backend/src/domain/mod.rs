//! Domain primitives, services and ports.
//!
//! Purpose: keep the catalogue rules and the generic collection service free
//! of transport and storage concerns. Adapters reach the domain through the
//! types re-exported here.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error category.
//! - CollectionQueryService: CRUD and pagination over one collection.
//! - RecordId, Record, IntoRecordId: identity of stored records.

pub mod catalogue;
pub mod collection_query;
pub mod error;
pub mod hooks;
pub mod pipeline;
pub mod ports;
pub mod record;
pub mod trace_id;

pub use self::collection_query::CollectionQueryService;
pub use self::error::{Error, ErrorCode};
pub use self::hooks::{HookContext, NoHooks, RecordHooks};
pub use self::record::{Document, IntoRecordId, Record, RecordId, hex_id};
pub use self::trace_id::TraceId;

