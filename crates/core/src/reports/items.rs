//! Line-item report

use dealscope_domain::{BoxStyle, EnrichedDeal};
use serde::{Deserialize, Serialize};

use super::format;
use super::table::{ReportTable, TabularReport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub deal_id: String,
    pub deal_name: String,
    pub item_name: String,
    pub style: BoxStyle,
    pub length_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub quantity: f64,
    pub unit_area_m2: f64,
    pub total_area_m2: f64,
    pub unit_price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemsReport {
    pub rows: Vec<ItemRow>,
    pub total_quantity: f64,
    pub total_area_m2: f64,
    pub total_amount: f64,
}

/// Flatten every deal's line items into one row each.
pub fn build_items_report(deals: &[EnrichedDeal]) -> ItemsReport {
    let mut report = ItemsReport::default();

    for deal in deals {
        for line in &deal.line_items {
            let amount = line.item.effective_amount();
            report.total_quantity += line.item.quantity;
            report.total_area_m2 += line.total_area_m2;
            report.total_amount += amount;
            report.rows.push(ItemRow {
                deal_id: deal.id.clone(),
                deal_name: deal.name.clone(),
                item_name: line.item.name.clone(),
                style: line.style,
                length_mm: line.item.length_mm,
                width_mm: line.item.width_mm,
                height_mm: line.item.height_mm,
                quantity: line.item.quantity,
                unit_area_m2: line.unit_area_m2,
                total_area_m2: line.total_area_m2,
                unit_price: line.item.unit_price,
                amount,
            });
        }
    }

    report
}

impl TabularReport for ItemsReport {
    fn to_table(&self) -> ReportTable {
        let mut table = ReportTable::new(
            "Line items",
            [
                "Deal",
                "Item",
                "Style",
                "Dimensions (mm)",
                "Qty",
                "Unit area (m²)",
                "Total area (m²)",
                "Unit price",
                "Amount",
            ],
        );

        for row in &self.rows {
            table.push_row(vec![
                row.deal_name.clone(),
                row.item_name.clone(),
                row.style.label().to_string(),
                format::dimensions(row.length_mm, row.width_mm, row.height_mm),
                format::trim(row.quantity),
                format::area(row.unit_area_m2),
                format::area(row.total_area_m2),
                format::amount(row.unit_price),
                format::amount(row.amount),
            ]);
        }

        table.with_footer(vec![
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            format::trim(self.total_quantity),
            String::new(),
            format::area(self.total_area_m2),
            String::new(),
            format::amount(self.total_amount),
        ])
    }
}
