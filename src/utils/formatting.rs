use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{settings::{Alignment, Style}, Table, Tabled};

use crate::models::{
    cart::CartLine,
    order::{OrderConfirmation, OrderReview},
    product::{CatalogItem, Price},
};

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Dessert")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Image")]
    image: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

#[derive(Tabled)]
struct ReviewTableRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

pub fn format_catalog_table(items: &[CatalogItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<CatalogTableRow> = items
        .iter()
        .map(|item| CatalogTableRow {
            id: item.id.to_string(),
            name: truncate(&item.name, 30),
            price: item.price.to_string(),
            image: item.image.clone(),
        })
        .collect();

    render(rows)
}

pub fn format_cart_table(lines: &[CartLine]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = lines
        .iter()
        .map(|line| CartTableRow {
            id: line.id().to_string(),
            name: truncate(line.name(), 30),
            price: line.unit_price().to_string(),
            quantity: line.quantity().to_string(),
            subtotal: line.subtotal().to_string(),
        })
        .collect();

    render(rows)
}

/// The confirmation dialog lists each item with its unit price.
pub fn format_review(review: &OrderReview) -> String {
    let mut output = String::new();

    if review.is_empty() {
        output.push_str(&format!("{}\n", style("(no items)").dim()));
    } else {
        let rows: Vec<ReviewTableRow> = review
            .lines
            .iter()
            .map(|line| ReviewTableRow {
                name: line.name().to_string(),
                price: line.unit_price().to_string(),
            })
            .collect();
        output.push_str(&render(rows));
        output.push('\n');
    }

    output.push_str(&format_total(review.total));
    output
}

pub fn format_cart_heading(line_count: usize) -> String {
    format!("🛒 {}", style(format!("Your Cart ({})", line_count)).bold())
}

pub fn format_total(total: Price) -> String {
    format!("{}: {}", style("💵 Order Total").bold(), style(total).green().bold())
}

pub fn format_confirmation(confirmation: &OrderConfirmation) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style(&confirmation.message).green().bold()));
    output.push_str(&format!("{}: {}\n", style("Order").bold(), style(confirmation.order_id).cyan()));
    output.push_str(&format!(
        "{}: {} ({} lines)\n",
        style("Items").bold(),
        confirmation.unit_count,
        confirmation.line_count
    ));
    output.push_str(&format!("{}: {}\n", style("Total").bold(), style(confirmation.total).green()));
    output.push_str(&format!(
        "{}: {}\n",
        style("Confirmed").bold(),
        style(format_date(&confirmation.confirmed_at)).dim()
    ));

    output
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
