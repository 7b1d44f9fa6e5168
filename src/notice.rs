use std::collections::BTreeMap;

use crate::fields::Field;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// One penalty notice, keyed by its detail-page link.
///
/// Starts as a bare link from the listing, then picks up detail fields and
/// finally a location before it is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub link: String,
    pub fields: BTreeMap<Field, String>,
    pub location: Option<Location>,
}

impl Notice {
    pub fn new(link: impl Into<String>) -> Self {
        Notice {
            link: link.into(),
            fields: BTreeMap::new(),
            location: None,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Later values overwrite earlier ones for the same field.
    pub fn merge(&mut self, details: BTreeMap<Field, String>) {
        self.fields.extend(details);
    }

    /// True when nothing beyond the link was extracted.
    pub fn is_stub(&self) -> bool {
        self.fields.is_empty()
    }
}
