use core::fmt;

use crate::stock::Stock;

pub const REPORT_HEADER: &str = "Items Report";

/// Human-readable listing: a header, then `<item> -> <quantity>` per line.
#[derive(Debug, Clone, Copy)]
pub struct StockReport<'a> {
    stock: &'a Stock,
}

impl<'a> StockReport<'a> {
    pub fn new(stock: &'a Stock) -> Self {
        Self { stock }
    }
}

impl fmt::Display for StockReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_HEADER}")?;
        for (item, qty) in self.stock.iter() {
            writeln!(f, "{item} -> {qty}")?;
        }
        Ok(())
    }
}
