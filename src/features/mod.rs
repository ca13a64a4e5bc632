//! Feature schema and the feature vector assembler.
//!
//! Both models were trained on the same 33 positional slots `F1..F33`. Six of
//! them come from the user; the rest are fixed for every request.

pub mod schema;

pub use schema::*;

use crate::domain::UserInputs;

/// One fully populated instantiation of the feature schema.
///
/// Built fresh per request and owned by it. Slot order is the schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [f64; FEATURE_COUNT],
}

impl FeatureRecord {
    /// Record with every slot at its schema default.
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, value) in FEATURE_SCHEMA.iter().zip(values.iter_mut()) {
            *value = slot.default;
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|idx| self.values[idx])
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_SCHEMA
            .iter()
            .zip(self.values.iter())
            .map(|(slot, &value)| (slot.name, value))
    }

    fn set(&mut self, slot: EditableSlot, value: f64) {
        self.values[slot.index()] = value;
    }
}

/// Merge user inputs over the schema defaults.
///
/// Pure and infallible: inputs are range-checked by the caller and the branch
/// is a closed enum, so every value has a code.
pub fn assemble(inputs: &UserInputs) -> FeatureRecord {
    let mut record = FeatureRecord::defaults();
    record.set(EditableSlot::Age, f64::from(inputs.age));
    record.set(EditableSlot::Height, f64::from(inputs.height_cm));
    record.set(EditableSlot::Weight, f64::from(inputs.weight_kg));
    record.set(EditableSlot::GymFrequency, f64::from(inputs.gym_freq));
    record.set(EditableSlot::Branch, f64::from(inputs.branch.code()));
    record.set(EditableSlot::SocialScore, f64::from(inputs.social_score));
    record
}
