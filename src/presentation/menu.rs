use crate::application::{StatusKind, StatusMessage};
use crate::domain::Product;
use crossterm::style::Stylize;
use std::io::{self, Write};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddProduct,
    DisplayAll,
    UpdateProduct,
    DeleteProduct,
    LowStockReport,
    SaveAndExit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::AddProduct,
        MenuChoice::DisplayAll,
        MenuChoice::UpdateProduct,
        MenuChoice::DeleteProduct,
        MenuChoice::LowStockReport,
        MenuChoice::SaveAndExit,
    ];

    /// Parses the number typed at the menu prompt.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockroom::presentation::MenuChoice;
    ///
    /// assert_eq!(MenuChoice::parse(" 3 "), Some(MenuChoice::UpdateProduct));
    /// assert_eq!(MenuChoice::parse("7"), None);
    /// assert_eq!(MenuChoice::parse("add"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let number = input.trim().parse::<usize>().ok()?;
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn number(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).map_or(0, |i| i + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddProduct => "Add Product",
            MenuChoice::DisplayAll => "Display All Products",
            MenuChoice::UpdateProduct => "Update Product",
            MenuChoice::DeleteProduct => "Delete Product",
            MenuChoice::LowStockReport => "Generate Low Stock Report",
            MenuChoice::SaveAndExit => "Save and Exit",
        }
    }
}

pub fn render_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Inventory Management System Menu:".cyan())?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{}. {}", choice.number(), choice.label())?;
    }
    write!(out, "Enter your choice: ")?;
    out.flush()
}

pub fn render_product(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(out, "Product ID: {}", product.id())?;
    writeln!(out, "Name: {}", product.name())?;
    writeln!(out, "Price: ₹{}", product.price())?;
    writeln!(out, "Quantity: {}", product.quantity())?;
    writeln!(out)
}

pub fn render_products(out: &mut impl Write, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "{}", "No products available in inventory.".yellow());
    }
    for product in products {
        render_product(out, product)?;
    }
    Ok(())
}

pub fn render_low_stock_report(
    out: &mut impl Write,
    threshold: i32,
    products: &[&Product],
) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Low Stock Report (Below {threshold} items):").cyan()
    )?;
    for product in products {
        render_product(out, product)?;
    }
    Ok(())
}

pub fn render_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.red())
}

pub fn render_status(out: &mut impl Write, status: &StatusMessage) -> io::Result<()> {
    match status.kind {
        StatusKind::Success => writeln!(out, "{}", status.text.as_str().green()),
        StatusKind::Warning => writeln!(out, "{}", status.text.as_str().yellow()),
        StatusKind::Error => render_error(out, &status.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_parse_all_choices() {
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(MenuChoice::parse(&(i + 1).to_string()), Some(*choice));
            assert_eq!(choice.number(), i + 1);
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("-1"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_render_menu_lists_choices() {
        let text = rendered(|out| render_menu(out));
        assert!(text.contains("1. Add Product"));
        assert!(text.contains("5. Generate Low Stock Report"));
        assert!(text.contains("6. Save and Exit"));
        assert!(text.ends_with("Enter your choice: "));
    }

    #[test]
    fn test_render_product() {
        let product = Product::new(2, "Book", 15.0, 3);
        let text = rendered(|out| render_product(out, &product));
        assert_eq!(text, "Product ID: 2\nName: Book\nPrice: ₹15\nQuantity: 3\n\n");
    }

    #[test]
    fn test_render_products_empty() {
        let text = rendered(|out| render_products(out, &[]));
        assert!(text.contains("No products available in inventory."));
    }

    #[test]
    fn test_render_low_stock_report() {
        let book = Product::new(2, "Book", 15.0, 3);
        let text = rendered(|out| render_low_stock_report(out, 10, &[&book]));
        assert!(text.contains("Low Stock Report (Below 10 items):"));
        assert!(text.contains("Name: Book"));
    }

    #[test]
    fn test_render_status_colours_by_kind() {
        let ok = StatusMessage::new(StatusKind::Success, "Product added successfully.");
        let bad = StatusMessage::new(StatusKind::Error, "Product not found.");

        let ok_text = rendered(|out| render_status(out, &ok));
        let bad_text = rendered(|out| render_status(out, &bad));

        assert!(ok_text.contains("Product added successfully."));
        assert!(bad_text.contains("Product not found."));
        assert_eq!(ok_text, format!("{}\n", "Product added successfully.".green()));
        assert_eq!(bad_text, format!("{}\n", "Product not found.".red()));
    }
}
