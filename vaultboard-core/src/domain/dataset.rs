//! DataPoint, FieldSchema and Dataset — the ordered series every widget reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// One labeled observation with one or more named numeric fields.
///
/// The label is the sequence position as shown to the user: a date, a
/// batch id, a month, or a category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    label: String,
    values: BTreeMap<String, f64>,
}

/// A labeled entry in a non-time-ordered category list (token share, vault types).
pub type CategoryEntry = DataPoint;

impl DataPoint {
    pub fn new<L, I, K>(label: L, values: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            label: label.into(),
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value of a named field.
    pub fn value(&self, field: &str) -> Result<f64> {
        self.values
            .get(field)
            .copied()
            .ok_or_else(|| DashboardError::UnknownField(field.to_string()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Ordered set of numeric field names shared by every point of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    fields: Vec<String>,
}

impl FieldSchema {
    /// Build a schema. Rejects an empty field list and duplicate names.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if names.contains(&field) {
                return Err(DashboardError::DuplicateField(field));
            }
            names.push(field);
        }
        if names.is_empty() {
            return Err(DashboardError::SchemaMismatch(
                "schema must declare at least one field".into(),
            ));
        }
        Ok(Self { fields: names })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn names(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fail with `UnknownField` unless the schema declares `field`.
    pub fn require(&self, field: &str) -> Result<()> {
        if self.contains(field) {
            Ok(())
        } else {
            Err(DashboardError::UnknownField(field.to_string()))
        }
    }

    /// True if `point` carries exactly the fields of this schema.
    fn matches(&self, point: &DataPoint) -> bool {
        point.values.len() == self.fields.len()
            && self.fields.iter().all(|f| point.values.contains_key(f))
    }
}

/// An order-significant sequence of points sharing one schema.
///
/// The schema is checked once at construction, so field lookups on a
/// declared field never fail afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    schema: FieldSchema,
    points: Vec<DataPoint>,
}

impl Dataset {
    pub fn new(schema: FieldSchema, points: Vec<DataPoint>) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !schema.matches(p)) {
            let found: Vec<&str> = bad.fields().collect();
            return Err(DashboardError::SchemaMismatch(format!(
                "point '{}' has fields [{}], expected [{}]",
                bad.label(),
                found.join(", "),
                schema.names().join(", ")
            )));
        }
        Ok(Self { schema, points })
    }

    pub fn empty(schema: FieldSchema) -> Self {
        Self {
            schema,
            points: Vec::new(),
        }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All values of one field, in sequence order.
    pub fn column(&self, field: &str) -> Result<Vec<f64>> {
        self.schema.require(field)?;
        self.points.iter().map(|p| p.value(field)).collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(DataPoint::label)
    }
}
