use super::menu::{
    render_error, render_low_stock_report, render_menu, render_products, render_status, MenuChoice,
};
use crate::application::App;
use crate::domain::Product;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::debug;

pub struct InputHandler;

impl InputHandler {
    /// Runs the menu loop until the user picks "Save and Exit" or input ends.
    ///
    /// End of input is handled like "Save and Exit". Returns whether the final
    /// save succeeded.
    pub fn run<R: BufRead, W: Write>(app: &mut App, input: &mut R, out: &mut W) -> io::Result<bool> {
        Self::flush_status(app, out)?;
        loop {
            render_menu(out)?;
            let Some(line) = read_line(input)? else {
                writeln!(out)?;
                return Self::save_and_exit(app, out);
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::SaveAndExit) => return Self::save_and_exit(app, out),
                Some(choice) => {
                    debug!(?choice, "menu choice");
                    Self::handle_choice(app, choice, input, out)?;
                }
                None => render_error(out, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn handle_choice<R: BufRead, W: Write>(
        app: &mut App,
        choice: MenuChoice,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        match choice {
            MenuChoice::AddProduct => Self::handle_add(app, input, out)?,
            MenuChoice::DisplayAll => render_products(out, app.inventory.list_all())?,
            MenuChoice::UpdateProduct => Self::handle_update(app, input, out)?,
            MenuChoice::DeleteProduct => Self::handle_delete(app, input, out)?,
            MenuChoice::LowStockReport => Self::handle_low_stock(app, input, out)?,
            MenuChoice::SaveAndExit => {}
        }
        Self::flush_status(app, out)
    }

    fn handle_add<R: BufRead, W: Write>(app: &mut App, input: &mut R, out: &mut W) -> io::Result<()> {
        let Some(id) = prompt_parse::<i32, _, _>(input, out, "Enter product ID: ")? else {
            return Ok(());
        };
        let Some(name) = prompt_line(input, out, "Enter product name: ")? else {
            return Ok(());
        };
        let Some(price) = prompt_parse::<f64, _, _>(input, out, "Enter product price: ")? else {
            return Ok(());
        };
        let Some(quantity) = prompt_parse::<i32, _, _>(input, out, "Enter product quantity: ")?
        else {
            return Ok(());
        };
        app.add_product(Product::new(id, name, price, quantity));
        Ok(())
    }

    fn handle_update<R: BufRead, W: Write>(app: &mut App, input: &mut R, out: &mut W) -> io::Result<()> {
        let Some(id) = prompt_parse::<i32, _, _>(input, out, "Enter product ID to update: ")? else {
            return Ok(());
        };
        let Some(price) = prompt_parse::<f64, _, _>(input, out, "Enter new price: ")? else {
            return Ok(());
        };
        let Some(quantity) = prompt_parse::<i32, _, _>(input, out, "Enter new quantity: ")? else {
            return Ok(());
        };
        app.update_product(id, price, quantity);
        Ok(())
    }

    fn handle_delete<R: BufRead, W: Write>(app: &mut App, input: &mut R, out: &mut W) -> io::Result<()> {
        if let Some(id) = prompt_parse::<i32, _, _>(input, out, "Enter product ID to delete: ")? {
            app.delete_product(id);
        }
        Ok(())
    }

    fn handle_low_stock<R: BufRead, W: Write>(app: &mut App, input: &mut R, out: &mut W) -> io::Result<()> {
        if let Some(threshold) =
            prompt_parse::<i32, _, _>(input, out, "Enter stock threshold for report: ")?
        {
            render_low_stock_report(out, threshold, &app.low_stock(threshold))?;
        }
        Ok(())
    }

    fn save_and_exit<W: Write>(app: &mut App, out: &mut W) -> io::Result<bool> {
        let saved = app.save();
        Self::flush_status(app, out)?;
        if saved {
            writeln!(out, "Exiting...")?;
        }
        out.flush()?;
        Ok(saved)
    }

    fn flush_status<W: Write>(app: &mut App, out: &mut W) -> io::Result<()> {
        if let Some(status) = app.take_status_message() {
            render_status(out, &status)?;
        }
        Ok(())
    }
}

/// Reads one line without its terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    read_line(input)
}

/// Prompts until the answer parses as `T`. `None` at end of input.
fn prompt_parse<T, R, W>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<T>>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(line) = prompt_line(input, out, prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => render_error(out, &format!("Invalid number: {:?}", line.trim()))?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(app: &mut App, script: &str) -> (bool, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let saved = InputHandler::run(app, &mut input, &mut out).unwrap();
        (saved, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_add_and_display() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(dir.path().join("inventory.txt"));

        let (saved, text) = run_session(&mut app, "1\n7\nDesk lamp\n19.99\n4\n2\n6\n");

        assert!(saved);
        assert_eq!(app.inventory.list_all(), &[Product::new(7, "Desk lamp", 19.99, 4)]);
        assert!(text.contains("Product added successfully."));
        assert!(text.contains("Name: Desk lamp"));
        assert!(text.contains("Price: ₹19.99"));
        assert!(text.contains("Exiting..."));
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(dir.path().join("inventory.txt"));

        let (_, text) = run_session(&mut app, "9\nabc\n6\n");

        assert_eq!(text.matches("Invalid choice. Please try again.").count(), 2);
        assert_eq!(text.matches("Enter your choice: ").count(), 3);
    }

    #[test]
    fn test_invalid_number_reprompts() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(dir.path().join("inventory.txt"));

        let (_, text) = run_session(&mut app, "1\nten\n10\nPen\n2.5\n100\n6\n");

        assert!(text.contains("Invalid number: \"ten\""));
        assert_eq!(app.inventory.find_by_id(10).unwrap().name(), "Pen");
    }

    #[test]
    fn test_update_and_delete_missing() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(dir.path().join("inventory.txt"));
        app.add_product(Product::new(1, "Pen", 2.5, 100));

        let (_, text) = run_session(&mut app, "3\n1\n3.0\n40\n3\n5\n1.0\n1\n4\n9\n6\n");

        assert!(text.contains("Product updated successfully."));
        assert_eq!(text.matches("Product not found.").count(), 2);
        assert_eq!(app.inventory.find_by_id(1).unwrap().quantity(), 40);
    }

    #[test]
    fn test_low_stock_report() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(dir.path().join("inventory.txt"));
        app.add_product(Product::new(1, "Pen", 2.5, 100));
        app.add_product(Product::new(2, "Book", 15.0, 3));

        let (_, text) = run_session(&mut app, "5\n10\n6\n");

        let report = text.split("Low Stock Report (Below 10 items):").nth(1).unwrap();
        assert!(report.contains("Name: Book"));
        assert!(!report.contains("Name: Pen"));
    }

    #[test]
    fn test_scenario_saves_remaining_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        let mut app = App::new(&path);

        let script = "1\n1\nPen\n2.5\n100\n1\n2\nBook\n15.0\n3\n4\n1\n6\n";
        let (saved, text) = run_session(&mut app, script);

        assert!(saved);
        assert!(text.contains("Product deleted successfully."));
        let reloaded = App::load(&path);
        assert_eq!(reloaded.inventory.list_all(), &[Product::new(2, "Book", 15.0, 3)]);
    }

    #[test]
    fn test_end_of_input_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        let mut app = App::new(&path);

        let (saved, _) = run_session(&mut app, "1\n3\nRuler\n1.0\n5\n");

        assert!(saved);
        assert_eq!(fs::read_to_string(&path).unwrap(), "3,Ruler,1.0,5\n");
    }

    #[test]
    fn test_end_of_input_mid_prompt_adds_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(dir.path().join("inventory.txt"));

        let (saved, _) = run_session(&mut app, "1\n3\nRuler\n");

        assert!(saved);
        assert!(app.inventory.is_empty());
    }

    #[test]
    fn test_save_failure_reported() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(dir.path().join("missing").join("inventory.txt"));

        let (saved, text) = run_session(&mut app, "6\n");

        assert!(!saved);
        assert!(text.contains("Error: Unable to save to file"));
        assert!(!text.contains("Exiting..."));
    }

    #[test]
    fn test_load_status_printed_first() {
        let dir = TempDir::new().unwrap();
        let mut app = App::load(dir.path().join("inventory.txt"));

        let (_, text) = run_session(&mut app, "6\n");

        let first_menu = text.find("Inventory Management System Menu:").unwrap();
        let status = text.find("File not found. Starting with an empty inventory.").unwrap();
        assert!(status < first_menu);
    }
}
