//! Cart Models
//!
//! Client-side mirrors of the cart endpoint payloads. Field names follow the
//! wire format exactly; the server remains the source of truth and these
//! values are re-fetched rather than predicted after every mutation.

use serde::{Deserialize, Deserializer, Serialize};

/// Variant title the platform substitutes when a product has a single
/// default variant. Treated as absent for display purposes.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Cart Model
///
/// Snapshot of the server cart: total unit count, total price in minor
/// currency units, and line items in server-determined order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Total units across all line items.
    pub item_count: u32,

    /// Cart total in minor currency units (e.g. pence, cents).
    pub total_price: u64,

    /// Line items, in the order the server returned them.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Cart {
    /// A cart with no items. `item_count == 0` if and only if this is true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// LineItem Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque identifier, stable per cart entry. Distinct from the
    /// product/variant identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Identifier of the product this line was created from.
    #[serde(default, deserialize_with = "string_or_number")]
    pub product_id: String,

    /// Product display title.
    #[serde(default)]
    pub product_title: String,

    /// Variant display title, when the product has more than one variant.
    #[serde(default)]
    pub variant_title: Option<String>,

    /// Units of this line. Always positive on the wire; quantity zero
    /// removes the line instead.
    pub quantity: u32,

    /// Unit price in minor currency units.
    #[serde(default)]
    pub price: u64,

    /// Line total after discounts, in minor currency units.
    #[serde(default)]
    pub final_line_price: u64,

    /// Line total before discounts. Never less than `final_line_price`.
    #[serde(default)]
    pub original_line_price: u64,

    /// Product image URL, when one exists.
    #[serde(default)]
    pub image: Option<String>,
}

impl LineItem {
    /// Whether a discount is active on this line, i.e. the original line
    /// price strictly exceeds the final line price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.original_line_price > self.final_line_price
    }

    /// Variant title for display, filtering the platform's default-variant
    /// placeholder and empty strings.
    #[must_use]
    pub fn variant_label(&self) -> Option<&str> {
        self.variant_title
            .as_deref()
            .filter(|title| !title.is_empty() && *title != DEFAULT_VARIANT_TITLE)
    }
}

/// The platform serialises identifiers as JSON numbers in some payloads and
/// strings in others; accept both.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
