//! The fixed feature schema.
//!
//! Order matters: the models consume slots positionally, so this table is the
//! single source of truth for both names and positions.

pub const FEATURE_COUNT: usize = 33;

/// A named slot with its static default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSlot {
    pub name: &'static str,
    pub default: f64,
}

const fn slot(name: &'static str, default: f64) -> FeatureSlot {
    FeatureSlot { name, default }
}

pub const FEATURE_SCHEMA: [FeatureSlot; FEATURE_COUNT] = [
    slot("F1", 20.0),
    slot("F2", 170.0),
    slot("F3", 60.0),
    slot("F4", 2.0),
    slot("F5", 0.0),
    slot("F6", 5.0),
    slot("F7", 0.0),
    slot("F8", 0.0),
    slot("F9", 0.0),
    slot("F10", 0.0),
    slot("F11", 5.0),
    slot("F12", 5.0),
    slot("F13", 0.0),
    slot("F14", 5.0),
    slot("F15", 5.0),
    slot("F16", 5.0),
    slot("F17", 5.0),
    slot("F18", 5.0),
    slot("F19", 5.0),
    slot("F20", 5.0),
    slot("F21", 5.0),
    slot("F22", 5.0),
    slot("F23", 5.0),
    slot("F24", 5.0),
    slot("F25", 5.0),
    slot("F26", 500.0),
    slot("F27", 100.0),
    slot("F28", 3.0),
    slot("F29", 5.0),
    slot("F30", 5.0),
    slot("F31", 5.0),
    slot("F32", 5.0),
    slot("F33", 5.0),
];

/// The user-editable slots, which are the first six of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableSlot {
    Age,
    Height,
    Weight,
    GymFrequency,
    Branch,
    SocialScore,
}

impl EditableSlot {
    pub const ALL: [EditableSlot; 6] = [
        EditableSlot::Age,
        EditableSlot::Height,
        EditableSlot::Weight,
        EditableSlot::GymFrequency,
        EditableSlot::Branch,
        EditableSlot::SocialScore,
    ];

    pub fn index(self) -> usize {
        match self {
            EditableSlot::Age => 0,
            EditableSlot::Height => 1,
            EditableSlot::Weight => 2,
            EditableSlot::GymFrequency => 3,
            EditableSlot::Branch => 4,
            EditableSlot::SocialScore => 5,
        }
    }

    pub fn name(self) -> &'static str {
        FEATURE_SCHEMA[self.index()].name
    }
}

/// Position of a named slot in the schema.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_SCHEMA.iter().position(|slot| slot.name == name)
}

/// Schema names in order.
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURE_SCHEMA.iter().map(|slot| slot.name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique_and_sequential() {
        let names: HashSet<&str> = feature_names().collect();
        assert_eq!(names.len(), FEATURE_COUNT);
        for (idx, name) in feature_names().enumerate() {
            assert_eq!(name, format!("F{}", idx + 1));
        }
    }

    #[test]
    fn editable_slots_map_to_first_six() {
        let names: Vec<&str> = EditableSlot::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["F1", "F2", "F3", "F4", "F5", "F6"]);
    }

    #[test]
    fn feature_index_resolves_names() {
        assert_eq!(feature_index("F1"), Some(0));
        assert_eq!(feature_index("F26"), Some(25));
        assert_eq!(feature_index("f26"), None);
    }
}
