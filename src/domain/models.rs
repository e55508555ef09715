use serde::Serialize;

/// A single product entry in the inventory.
///
/// The id and name are fixed once the product exists. Price and quantity
/// change only through [`Inventory::update`](super::Inventory::update).
///
/// Field order matters: it is the column order of the inventory file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: i32,
    name: String,
    price: f64,
    quantity: i32,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub(crate) fn restock(&mut self, price: f64, quantity: i32) {
        self.price = price;
        self.quantity = quantity;
    }

    /// Whether this product counts as low stock for the given threshold.
    pub fn is_below(&self, threshold: i32) -> bool {
        self.quantity < threshold
    }
}
