use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a list entry.
///
/// Assigned once when the item is created and kept across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated item values, not yet placed in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl ItemDraft {
    /// Quantity times price, or `None` if the product does not fit in a `Decimal`.
    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }
}

/// One shopping-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl Item {
    pub fn from_draft(id: ItemId, draft: ItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
        }
    }

    /// The item's contribution to the running total.
    ///
    /// Drafts are checked before becoming items, so saturation never kicks in
    /// for items held by a list.
    pub fn subtotal(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }

    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            nome: self.name.clone(),
            quantidade: self.quantity.to_f64().unwrap_or_default(),
            valor: self.unit_price.to_f64().unwrap_or_default(),
        }
    }
}

/// Flat row handed to the spreadsheet exporter.
///
/// Field names double as the sheet's column headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub nome: String,
    pub quantidade: f64,
    pub valor: f64,
}

impl ItemRecord {
    pub const HEADERS: [&'static str; 3] = ["nome", "quantidade", "valor"];
}
