//! The item list and its running total.
//!
//! [`ShoppingList`] is never mutated in place: each transition takes `&self` and
//! returns the next list, so a screen can swap its state wholesale and tests can
//! compare before and after.

use crate::domain::{Item, ItemDraft, ItemId, ItemRecord, ValidationError, ValidationResult};
use rust_decimal::Decimal;

/// Ordered items plus the incrementally maintained total.
///
/// # Examples
///
/// ```
/// use lista_compras::application::ShoppingList;
/// use lista_compras::domain::validate_item;
///
/// let list = ShoppingList::default();
/// let (list, _id) = list.with_added(validate_item("Leite", "2", "3,50").unwrap()).unwrap();
/// assert_eq!(list.total().to_string(), "7.00");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<Item>,
    total: Decimal,
}

fn draft_subtotal(draft: &ItemDraft) -> ValidationResult<Decimal> {
    draft.checked_subtotal().ok_or(ValidationError::AmountTooLarge)
}

impl ShoppingList {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Appends a new item under a fresh id.
    ///
    /// Fails without producing a list when the new total would not fit in a `Decimal`.
    pub fn with_added(&self, draft: ItemDraft) -> ValidationResult<(Self, ItemId)> {
        let total = self
            .total
            .checked_add(draft_subtotal(&draft)?)
            .ok_or(ValidationError::TotalTooLarge)?;

        let id = ItemId::new();
        let mut items = self.items.clone();
        items.push(Item::from_draft(id, draft));
        Ok((Self { items, total }, id))
    }

    /// Replaces the item with `id` in place, keeping its id and position.
    ///
    /// Returns `None` when no such item exists, and an error when the new total
    /// would overflow.
    pub fn with_replaced(&self, id: ItemId, draft: ItemDraft) -> Option<ValidationResult<Self>> {
        let index = self.position(id)?;
        Some(self.replace_at(index, draft))
    }

    fn replace_at(&self, index: usize, draft: ItemDraft) -> ValidationResult<Self> {
        let subtotal = draft_subtotal(&draft)?;
        let previous = self.items[index].subtotal();
        let total = self
            .total
            .checked_sub(previous)
            .and_then(|rest| rest.checked_add(subtotal))
            .ok_or(ValidationError::TotalTooLarge)?;

        let id = self.items[index].id;
        let mut items = self.items.clone();
        items[index] = Item::from_draft(id, draft);
        Ok(Self { items, total })
    }

    /// Drops the item with `id`. Unknown ids leave the list unchanged.
    pub fn without(&self, id: ItemId) -> Self {
        match self.position(id) {
            Some(index) => {
                let mut items = self.items.clone();
                let removed = items.remove(index);
                Self { items, total: self.total - removed.subtotal() }
            }
            None => self.clone(),
        }
    }

    pub fn records(&self) -> Vec<ItemRecord> {
        self.items.iter().map(Item::to_record).collect()
    }

    /// Recomputes the total from scratch.
    pub fn recomputed_total(&self) -> Decimal {
        self.items.iter().map(Item::subtotal).sum()
    }
}
