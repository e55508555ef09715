//! In-memory record store for the inventory.
//!
//! Products are kept in insertion order and every lookup is a linear scan.
//! Ids are not required to be unique: lookups return the first match while
//! deletion removes every match.

use super::errors::{DomainError, DomainResult};
use super::models::Product;
use tracing::debug;

/// Ordered collection of products.
///
/// # Examples
///
/// ```
/// use stockroom::domain::{Inventory, Product};
///
/// let mut inventory = Inventory::default();
/// inventory.add(Product::new(1, "Pen", 2.5, 100));
/// inventory.add(Product::new(2, "Book", 15.0, 3));
///
/// let low: Vec<i32> = inventory.low_stock(10).iter().map(|p| p.id()).collect();
/// assert_eq!(low, vec![2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Appends a product to the end of the inventory.
    ///
    /// No validation is done and duplicate ids are accepted.
    pub fn add(&mut self, product: Product) {
        debug!(id = product.id(), name = product.name(), "adding product");
        self.products.push(product);
    }

    /// Index of the first product with the given id.
    pub fn position(&self, id: i32) -> Option<usize> {
        self.products.iter().position(|p| p.id() == id)
    }

    /// Returns the first product with the given id.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockroom::domain::{Inventory, Product};
    ///
    /// let mut inventory = Inventory::default();
    /// inventory.add(Product::new(4, "Tape", 1.25, 8));
    ///
    /// assert_eq!(inventory.find_by_id(4).map(|p| p.name()), Some("Tape"));
    /// assert!(inventory.find_by_id(5).is_none());
    /// ```
    pub fn find_by_id(&self, id: i32) -> Option<&Product> {
        self.position(id).map(|index| &self.products[index])
    }

    /// Overwrites price and quantity of the first product with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ProductNotFound`] when no product has that id.
    /// The inventory is left untouched in that case.
    pub fn update(&mut self, id: i32, price: f64, quantity: i32) -> DomainResult<()> {
        let index = self.position(id).ok_or(DomainError::ProductNotFound(id))?;
        self.products[index].restock(price, quantity);
        debug!(id, price, quantity, "updated product");
        Ok(())
    }

    /// Removes every product with the given id and returns how many went.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ProductNotFound`] when nothing was removed.
    pub fn delete(&mut self, id: i32) -> DomainResult<usize> {
        let before = self.products.len();
        self.products.retain(|p| p.id() != id);
        let removed = before - self.products.len();
        if removed == 0 {
            return Err(DomainError::ProductNotFound(id));
        }
        debug!(id, removed, "deleted products");
        Ok(removed)
    }

    /// All products in insertion order.
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    /// Products whose quantity is strictly below `threshold`, in insertion order.
    pub fn low_stock(&self, threshold: i32) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_below(threshold)).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
