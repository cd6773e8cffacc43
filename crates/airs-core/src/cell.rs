//! Cell: an evolving prototype vector.
//!
//! A cell owns its attribute vector outright. Building one from a record
//! copies the record, and mutation strategies work on a `clone()` of the
//! parent, so a live memory cell is never changed in place.

use crate::error::{AirsError, Result};
use crate::types::Schema;
use serde::{Deserialize, Serialize};

/// Unchecked form of a persisted cell.
#[derive(Deserialize)]
struct CellRaw {
    values: Vec<f64>,
    class_position: usize,
    stimulation: f64,
}

/// Deserialising goes through the same checks as construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CellRaw")]
pub struct Cell {
    values: Vec<f64>,
    class_position: usize,
    /// Fitness against the last antigen this cell was compared with.
    stimulation: f64,
}

impl TryFrom<CellRaw> for Cell {
    type Error = AirsError;

    fn try_from(raw: CellRaw) -> Result<Self> {
        let class = raw.values.get(raw.class_position).copied().ok_or_else(|| {
            AirsError::schema_mismatch(
                raw.class_position,
                format!("class position past the end of {} attributes", raw.values.len()),
            )
        })?;
        if !(class.is_finite() && class >= 0.0 && class.fract() == 0.0) {
            return Err(AirsError::schema_mismatch(
                raw.class_position,
                format!("class value {} is not a class code", class),
            ));
        }
        if raw.stimulation.is_nan() {
            return Err(AirsError::invariant(raw.class_position, "stimulation is NaN"));
        }
        Ok(Self {
            values: raw.values,
            class_position: raw.class_position,
            stimulation: raw.stimulation.clamp(0.0, 1.0),
        })
    }
}

impl Cell {
    /// Copy a record into a new, unstimulated cell.
    pub fn from_record(record: &[f64], schema: &Schema) -> Result<Self> {
        schema.class_of(record)?;
        Ok(Self {
            values: record.to_vec(),
            class_position: schema.class_position(),
            stimulation: 0.0,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }

    /// Overwrite a non-class attribute.
    pub fn set_value(&mut self, position: usize, value: f64) -> Result<()> {
        if position == self.class_position {
            return Err(AirsError::invariant(
                position,
                "class attribute is immutable after creation",
            ));
        }
        match self.values.get_mut(position) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(AirsError::schema_mismatch(
                position,
                format!("cell has only {} attributes", self.values.len()),
            )),
        }
    }

    pub fn class_position(&self) -> usize {
        self.class_position
    }

    /// The class code carried in the class slot.
    pub fn class_value(&self) -> usize {
        self.values[self.class_position] as usize
    }

    pub fn stimulation(&self) -> f64 {
        self.stimulation
    }

    pub fn set_stimulation(&mut self, stimulation: f64) {
        self.stimulation = stimulation.clamp(0.0, 1.0);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
