//! Rendering of the `smmData` JavaScript block.
//!
//! Layout is fixed so a rewritten page diffs cleanly against the previous run:
//! the block sits at 8 spaces, group comments and fields at 12, and array
//! items at 16, two items per line.

use spot_price_ingestor::models::{
    data_set::DataSet,
    price::{PricePoint, PriceSeries},
    product::{Category, Product},
};

/// Comment that opens the block; the fetch date follows it.
pub const BLOCK_MARKER: &str = "// SMM真实数据";
/// Name of the JavaScript constant holding the series.
pub const DATA_VARIABLE: &str = "smmData";

const ITEMS_PER_LINE: usize = 2;
const ITEM_INDENT: &str = "                ";
const FIELD_INDENT: &str = "            ";
const BLOCK_INDENT: &str = "        ";

/// Shortest decimal that round-trips, always with a fractional part
/// (`11.0`, not `11`).
///
/// Magnitudes below `1e-4` or from `1e16` up switch to exponent form without
/// zero padding (`1e-5`, `1e16`), which JavaScript parses the same as the
/// padded `1e-05`.
pub fn format_price(price: f64) -> String {
    format!("{price:?}")
}

fn format_point(point: &PricePoint) -> String {
    format!(
        "{{date: \"{}\", price: {}}}",
        point.date,
        format_price(point.price)
    )
}

/// Renders a series as a JavaScript array literal.
///
/// An empty series is `[]`; otherwise one item pair per line, closed at the
/// field indentation.
pub fn format_series(series: &PriceSeries) -> String {
    if series.is_empty() {
        return "[]".to_string();
    }
    let lines: Vec<String> = series
        .points()
        .chunks(ITEMS_PER_LINE)
        .map(|chunk| {
            let items: Vec<String> = chunk.iter().map(format_point).collect();
            format!("{ITEM_INDENT}{}", items.join(", "))
        })
        .collect();
    format!("[\n{}\n{FIELD_INDENT}]", lines.join(",\n"))
}

/// Renders the whole block for `products`, in order.
///
/// Products absent from `data` render as `[]`. A group comment is written
/// whenever the category changes from the previous product.
pub fn render_block(products: &[Product], data: &DataSet, fetch_date: &str) -> String {
    let empty = PriceSeries::empty();
    let mut out = String::new();
    out.push_str(&format!("{BLOCK_INDENT}{BLOCK_MARKER} ({fetch_date}获取)\n"));
    out.push_str(&format!("{BLOCK_INDENT}const {DATA_VARIABLE} = {{\n"));

    let mut current: Option<Category> = None;
    for (i, product) in products.iter().enumerate() {
        if current != Some(product.category) {
            out.push_str(&format!("{FIELD_INDENT}// {}\n", product.category.label()));
            current = Some(product.category);
        }
        let series = data.get(&product.key).unwrap_or(&empty);
        let sep = if i + 1 == products.len() { "" } else { "," };
        out.push_str(&format!(
            "{FIELD_INDENT}{}: {}{sep}\n",
            product.key,
            format_series(series)
        ));
    }

    out.push_str(&format!("{BLOCK_INDENT}}};"));
    out
}
