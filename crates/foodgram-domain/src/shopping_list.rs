//! Plain-text shopping list rendered from aggregated cart ingredients.

use std::fmt::Write as _;

const HEADER: &str = "Shopping list:\n\n";
const FOOTER: &str = "\nFoodgram\nHappy shopping!\n";

/// One distinct (name, unit) pair with the amount summed over every cart recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Render the aggregated items, one line per item in the given order.
pub fn render(items: &[ShoppingListItem]) -> String {
    let mut out = String::from(HEADER);
    for item in items {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "~ {} - {} ({})",
            item.name, item.amount, item.measurement_unit
        );
    }
    out.push_str(FOOTER);
    out
}
