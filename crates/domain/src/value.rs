//! Value descriptor — the legal value space of a bit-field or parameter.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::schema::ValuesSpec;

/// A linear numeric mapping with a display unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    /// Raw value corresponding to zero.
    pub offset: i64,
    /// Increment per raw unit.
    pub step: i64,
    /// Display unit, e.g. `mV`.
    pub unit: String,
}

/// The legal value space of a bit-field or parameter.
///
/// The declarative grammar allows `range`, `enum`, and `boolean` keys on the
/// same `values` block; declaring more than one is rejected during the build,
/// since a holder with several simultaneous value spaces has no meaningful
/// accessor mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec {
    /// No value space declared; any raw value is legal.
    Any,
    /// Numeric range with offset, step, and unit.
    Range(Range),
    /// Named values mapped to raw integers.
    Enum(BTreeMap<String, i64>),
    /// Boolean states mapped to raw integers.
    Boolean(BTreeMap<bool, i64>),
}

impl ValueSpec {
    /// Build a value descriptor from its raw shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ConflictingValueSpec`] when more than one
    /// of range/enum/boolean is declared at `path`.
    pub fn from_spec(spec: ValuesSpec, path: &str) -> Result<Self, ValidationError> {
        let declared = usize::from(spec.range.is_some())
            + usize::from(spec.enumeration.is_some())
            + usize::from(spec.boolean.is_some());
        if declared > 1 {
            return Err(ValidationError::ConflictingValueSpec {
                path: path.to_string(),
            });
        }
        if let Some(range) = spec.range {
            return Ok(Self::Range(Range {
                offset: range.offset,
                step: range.step,
                unit: range.unit,
            }));
        }
        if let Some(enumeration) = spec.enumeration {
            return Ok(Self::Enum(enumeration));
        }
        if let Some(boolean) = spec.boolean {
            return Ok(Self::Boolean(boolean));
        }
        Ok(Self::Any)
    }
}
