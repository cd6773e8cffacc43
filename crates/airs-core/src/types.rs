//! Schema and dataset types.
//!
//! Records are ordered vectors of reals. Nominal and class values are
//! pre-encoded as integer codes, so a record is always `&[f64]` regardless
//! of the attribute types it carries.

use crate::error::{AirsError, Result};
use serde::{Deserialize, Serialize};

/// The type tag of one attribute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Real-valued feature.
    Numeric,
    /// Categorical feature with codes `0..cardinality`.
    Nominal { cardinality: usize },
    /// The class label, codes `0..num_classes`.
    Class { num_classes: usize },
    /// Anything AIRS has no distance or mutation handler for (dates, strings).
    Unsupported { type_name: String },
}

impl AttributeKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeKind::Numeric)
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, AttributeKind::Nominal { .. })
    }

    pub fn is_class(&self) -> bool {
        matches!(self, AttributeKind::Class { .. })
    }

    /// Short human-readable type name, used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            AttributeKind::Numeric => "numeric",
            AttributeKind::Nominal { .. } => "nominal",
            AttributeKind::Class { .. } => "class",
            AttributeKind::Unsupported { type_name } => type_name,
        }
    }
}

/// A named attribute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

/// Ordered attribute layout with exactly one class position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    attributes: Vec<Attribute>,
    class_position: usize,
    num_classes: usize,
}

impl Schema {
    /// Build a schema, checking that exactly one attribute is the class.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        let mut class = None;
        for (position, attribute) in attributes.iter().enumerate() {
            if let AttributeKind::Class { num_classes } = attribute.kind {
                if class.is_some() {
                    return Err(AirsError::schema_mismatch(
                        position,
                        "schema declares more than one class attribute",
                    ));
                }
                if num_classes == 0 {
                    return Err(AirsError::schema_mismatch(
                        position,
                        "class attribute must have at least one label",
                    ));
                }
                class = Some((position, num_classes));
            }
        }

        let (class_position, num_classes) = class.ok_or_else(|| {
            AirsError::schema_mismatch(attributes.len(), "schema has no class attribute")
        })?;

        Ok(Self {
            attributes,
            class_position,
            num_classes,
        })
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn kind(&self, position: usize) -> Option<&AttributeKind> {
        self.attributes.get(position).map(|a| &a.kind)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn class_position(&self) -> usize {
        self.class_position
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Check that a record has one value per attribute.
    pub fn check_record(&self, record: &[f64]) -> Result<()> {
        if record.len() != self.attributes.len() {
            return Err(AirsError::schema_mismatch(
                record.len().min(self.attributes.len()),
                format!(
                    "record has {} values, schema has {} attributes",
                    record.len(),
                    self.attributes.len()
                ),
            ));
        }
        Ok(())
    }

    /// The class code of a record, validated against the label count.
    pub fn class_of(&self, record: &[f64]) -> Result<usize> {
        self.check_record(record)?;
        let raw = record[self.class_position];
        if raw < 0.0 || raw.fract() != 0.0 || raw as usize >= self.num_classes {
            return Err(AirsError::schema_mismatch(
                self.class_position,
                format!("class code {} outside 0..{}", raw, self.num_classes),
            ));
        }
        Ok(raw as usize)
    }
}

/// Fluent builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    attributes: Vec<Attribute>,
}

impl SchemaBuilder {
    pub fn numeric(self, name: &str) -> Self {
        self.attribute(name, AttributeKind::Numeric)
    }

    pub fn nominal(self, name: &str, cardinality: usize) -> Self {
        self.attribute(name, AttributeKind::Nominal { cardinality })
    }

    pub fn class(self, name: &str, num_classes: usize) -> Self {
        self.attribute(name, AttributeKind::Class { num_classes })
    }

    pub fn unsupported(self, name: &str, type_name: &str) -> Self {
        self.attribute(
            name,
            AttributeKind::Unsupported {
                type_name: type_name.to_string(),
            },
        )
    }

    pub fn attribute(mut self, name: &str, kind: AttributeKind) -> Self {
        self.attributes.push(Attribute {
            name: name.to_string(),
            kind,
        });
        self
    }

    pub fn build(self) -> Result<Schema> {
        Schema::new(self.attributes)
    }
}

/// An in-memory labeled dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    /// Build a dataset from owned records, validating each one.
    pub fn from_records(schema: Schema, records: Vec<Vec<f64>>) -> Result<Self> {
        let mut dataset = Self::new(schema);
        for record in records {
            dataset.push(record)?;
        }
        Ok(dataset)
    }

    /// Append a record after checking its length and class code.
    pub fn push(&mut self, record: Vec<f64>) -> Result<()> {
        self.schema.class_of(&record)?;
        self.records.push(record);
        Ok(())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Vec<f64>] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&[f64]> {
        self.records.get(index).map(|r| r.as_slice())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Class code of the record at `index`. Records were validated on push.
    pub fn class_at(&self, index: usize) -> Option<usize> {
        self.records
            .get(index)
            .map(|r| r[self.schema.class_position()] as usize)
    }

    /// A new dataset with the same schema and every record passed through `f`.
    pub fn map_records<F>(&self, mut f: F) -> Result<Dataset>
    where
        F: FnMut(&[f64]) -> Result<Vec<f64>>,
    {
        let mut mapped = Dataset::new(self.schema.clone());
        for record in &self.records {
            mapped.push(f(record)?)?;
        }
        Ok(mapped)
    }
}
