//! Cart Data

/// New Line Item Data
///
/// Everything needed to add a variant to the cart. Properties are kept in
/// insertion order because the add endpoint receives them as repeated
/// `properties[key]` form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    /// Variant to add.
    pub variant_id: String,

    /// Units to add.
    pub quantity: u32,

    /// Custom line properties, e.g. engraving text.
    pub properties: Vec<(String, String)>,
}

impl NewLineItem {
    /// A plain add request with no custom properties.
    #[must_use]
    pub fn new(variant_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            variant_id: variant_id.into(),
            quantity,
            properties: Vec::new(),
        }
    }

    /// Attach a custom property to the line.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }
}
