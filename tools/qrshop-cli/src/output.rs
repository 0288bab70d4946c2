//! Output formatting for the CLI.

use console::style;
use qrshop_commerce::cart::CartLineItem;
use qrshop_commerce::{Money, VariantKey};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the cart lines as a table.
    pub fn cart_table(&self, items: &[CartLineItem]) {
        if self.json {
            return;
        }
        let widths = [6, 24, 6, 7, 12];
        self.table_row(&["ID", "PRODUCT", "SIZE", "QTY", "SUBTOTAL"], &widths);
        for item in items {
            let cells = cart_line_cells(item);
            let cols: Vec<&str> = cells.iter().map(String::as_str).collect();
            self.table_row(&cols, &widths);
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Stock badge for a size.
pub fn stock_badge(stock: i64) -> String {
    match stock {
        s if s <= 0 => style("sold out").red().to_string(),
        s if s <= 3 => style(format!("{} left", s)).yellow().to_string(),
        s => style(format!("{} avail.", s)).green().to_string(),
    }
}

/// Price label, `N/A` for unpriced products.
pub fn price_or_na(price: Option<Money>) -> String {
    price.map(|m| m.display()).unwrap_or_else(|| "N/A".to_string())
}

/// Table cells for one cart line: id, name, size, `qty/ceiling`, subtotal.
fn cart_line_cells(item: &CartLineItem) -> [String; 5] {
    let size = item.variant_key.as_ref().map(VariantKey::as_str).unwrap_or("-");
    [
        item.product_id.to_string(),
        item.product_name.clone(),
        size.to_string(),
        format!("{}/{}", item.quantity, item.stock_ceiling),
        price_or_na(item.line_total()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrshop_commerce::{Currency, ProductId};

    #[test]
    fn test_cart_line_cells() {
        let item = CartLineItem::new(ProductId::new(7), "Polo", 3, 5)
            .with_variant("M")
            .with_unit_price(Money::new(1000, Currency::PEN));
        assert_eq!(cart_line_cells(&item), ["7", "Polo", "M", "3/5", "S/.30.00"]);

        let unpriced = CartLineItem::new(ProductId::new(8), "Gift", 1, 1);
        assert_eq!(cart_line_cells(&unpriced), ["8", "Gift", "-", "1/1", "N/A"]);
    }

    #[test]
    fn test_stock_badge_thresholds() {
        let plain = |stock| console::strip_ansi_codes(&stock_badge(stock)).to_string();
        assert_eq!(plain(0), "sold out");
        assert_eq!(plain(-2), "sold out");
        assert_eq!(plain(3), "3 left");
        assert_eq!(plain(12), "12 avail.");
    }
}
