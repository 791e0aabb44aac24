/// Cart line items, derived totals and change subscribers.
pub mod store;
