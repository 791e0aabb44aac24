use std::collections::BTreeMap;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: u64 = 7_500;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in cents.
    pub price_cents: u64,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    /// Price times quantity, saturating at `u64::MAX`.
    pub fn subtotal_cents(&self) -> u64 {
        self.product
            .price_cents
            .saturating_mul(u64::from(self.quantity))
    }
}

/// Derived totals handed to subscribers after each mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub total_items: u32,
    pub total_price_cents: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CartTotals)>;

/// In-memory cart: line items keyed by product id, derived totals, and the drawer flag.
///
/// Totals are recomputed from the items on every read; nothing is cached.
#[derive(Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    open: bool,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener: u64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("open", &self.open)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across all lines, saturating at `u32::MAX`.
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of line subtotals, saturating at `u64::MAX`.
    pub fn total_price_cents(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.subtotal_cents()))
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            total_items: self.total_items(),
            total_price_cents: self.total_price_cents(),
        }
    }

    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.total_price_cents() >= FREE_SHIPPING_THRESHOLD_CENTS
    }

    /// Add one unit of `product`. An existing line for the same id gains one unit instead of
    /// being duplicated.
    pub fn add_item(&mut self, product: Product) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(LineItem {
                product,
                quantity: 1,
            }),
        }
        self.notify();
    }

    /// Remove the line for `id`. Returns `false` if there was none.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.notify();
        }
        removed
    }

    /// Set the quantity for `id`; zero or negative removes the line and anything above
    /// `u32::MAX` is clamped to it. Returns `false` for an unknown id.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }
        let Some(line) = self.items.iter_mut().find(|i| i.product.id == id) else {
            return false;
        };
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.notify();
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Register `listener`, called with the new totals after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartTotals) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn notify(&mut self) {
        let totals = self.totals();
        tracing::debug!(
            items = totals.total_items,
            cents = totals.total_price_cents,
            "cart changed"
        );
        for listener in self.listeners.values_mut() {
            listener(&totals);
        }
    }
}

/// Format cents as dollars with two decimals (`8900` is `"$89.00"`).
pub fn format_price(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
#[path = "../../tests/unit/cart/store.rs"]
mod tests;
