//! Payload DTO support
//!
//! DTOs keep optional fields as `Option<T>` with
//! `#[serde(skip_serializing_if = "Option::is_none")]`, so a field the caller
//! never set is absent from the wire rather than `null`. `0`, `""` and `false`
//! are ordinary values and are always sent when set.

use crate::error::{CloudError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A request body.
pub trait Payload: Serialize {
    /// Cross-field checks that the type system cannot express.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Validate and serialize.
    fn to_json(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

/// Build a DTO from loosely-typed parameters.
///
/// Missing required fields, unknown keys (for DTOs that deny them) and type
/// mismatches are validation errors.
pub fn from_params<P: Payload + DeserializeOwned>(params: &Map<String, Value>) -> Result<P> {
    let payload: P = serde_json::from_value(Value::Object(params.clone()))
        .map_err(|e| CloudError::validation(e.to_string()))?;
    payload.validate()?;
    Ok(payload)
}

/// Check `value` lies in `range`, naming `field` in the error.
pub fn ensure_range<T>(field: &str, value: T, range: std::ops::RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CloudError::validation(format!(
            "{} must be between {} and {} (got {})",
            field,
            range.start(),
            range.end(),
            value
        )))
    }
}

/// Generate chaining setters for the optional fields of a DTO.
///
/// ```ignore
/// payload_setters!(BlockCreate {
///     label: String,
///     #[deprecated(note = "use `tags`")]
///     tag: String,
/// });
/// ```
#[macro_export]
macro_rules! payload_setters {
    ($ty:ident { $( $(#[$meta:meta])* $field:ident : $fty:ty ),* $(,)? }) => {
        impl $ty {
            $(
                $(#[$meta])*
                pub fn $field(mut self, value: impl Into<$fty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}
