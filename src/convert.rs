//! String-to-field conversion.
//!
//! Numbers use the fixed `.` decimal convention regardless of host locale.

use crate::error::ValueError;
use crate::options::Slot;

/// Converts `raw` to the slot's type and stores it.
///
/// Scalars are overwritten; sequences get `raw` appended as one element.
pub(crate) fn store(slot: Slot<'_>, raw: &str) -> Result<(), ValueError> {
    match slot {
        Slot::Str(value) => *value = raw.to_owned(),
        Slot::Int(value) => *value = parse_integer(raw)?,
        Slot::Bool(value) => *value = parse_boolean(raw)?,
        Slot::Float(value) => *value = parse_float(raw)?,
        Slot::StrList(values) => values.push(raw.to_owned()),
        Slot::IntList(values) => values.push(parse_integer(raw)?),
        Slot::BoolList(values) => values.push(parse_boolean(raw)?),
        Slot::FloatList(values) => values.push(parse_float(raw)?),
    }
    Ok(())
}

fn parse_integer(raw: &str) -> Result<i64, ValueError> {
    Ok(raw.parse::<i64>()?)
}

fn parse_float(raw: &str) -> Result<f64, ValueError> {
    Ok(raw.parse::<f64>()?)
}

fn parse_boolean(raw: &str) -> Result<bool, ValueError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ValueError::Boolean)
    }
}
