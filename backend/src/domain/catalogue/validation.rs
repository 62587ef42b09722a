//! Validation helpers shared by catalogue resources.

use bson::Bson;

use crate::domain::pipeline::Filter;
use crate::domain::{Error, HookContext};

/// Shortest accepted name, in characters.
pub const MIN_NAME_LEN: usize = 2;

/// Error reasons and wording for a resource's `name` field.
pub(super) struct NameRules {
    pub label: &'static str,
    pub missing: &'static str,
    pub invalid: &'static str,
    pub unique: &'static str,
}

impl NameRules {
    /// Require a name of at least [`MIN_NAME_LEN`] characters.
    pub(super) fn check<'a>(&self, name: Option<&'a str>) -> Result<&'a str, Error> {
        let Some(name) = name.filter(|value| !value.is_empty()) else {
            return Err(Error::validation(
                self.missing,
                format!("{} name is missing", self.label),
            ));
        };
        if name.chars().count() < MIN_NAME_LEN {
            return Err(Error::validation(
                self.invalid,
                format!("{} name is invalid", self.label),
            ));
        }
        Ok(name)
    }

    /// Reject a name already used by another record of the collection.
    pub(super) async fn ensure_unique(&self, name: &str, ctx: &HookContext<'_>) -> Result<(), Error> {
        let existing = ctx
            .store
            .find_one(ctx.collection, &Filter::field_eq("name", name))
            .await?;
        let Some(existing) = existing else {
            return Ok(());
        };
        let is_self = match (existing.get("_id"), ctx.id) {
            (Some(Bson::ObjectId(found)), Some(target)) => *found == target,
            _ => false,
        };
        if is_self {
            return Ok(());
        }
        Err(Error::validation(
            self.unique,
            format!("{} name must be unique", self.label),
        ))
    }
}

/// True when the value is absent or empty.
pub(super) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}
