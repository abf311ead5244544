//! The retail sales warehouse schema drawn by this crate.
//!
//! Everything here is fixed data: four tables, their columns, where they sit
//! on the canvas and how the fact table references each dimension.

use std::fmt;

use serde::Serialize;

use crate::error::DiagramError;
use crate::layout::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    #[serde(rename = "")]
    None,
    #[serde(rename = "PK")]
    Pk,
    #[serde(rename = "FK")]
    Fk,
}

impl Badge {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Badge::None => None,
            Badge::Pk => Some("PK"),
            Badge::Fk => Some("FK"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub badge: Badge,
    pub name: &'static str,
    pub data_type: &'static str,
}

impl Column {
    pub const fn pk(name: &'static str, data_type: &'static str) -> Self {
        Self {
            badge: Badge::Pk,
            name,
            data_type,
        }
    }

    pub const fn fk(name: &'static str, data_type: &'static str) -> Self {
        Self {
            badge: Badge::Fk,
            name,
            data_type,
        }
    }

    pub const fn plain(name: &'static str, data_type: &'static str) -> Self {
        Self {
            badge: Badge::None,
            name,
            data_type,
        }
    }
}

pub const FACT_SALES: &[Column] = &[
    Column::pk("sale_id", "INTEGER"),
    Column::fk("date_id", "INTEGER"),
    Column::fk("product_id", "INTEGER"),
    Column::fk("customer_id", "INTEGER"),
    Column::plain("quantity", "INTEGER"),
    Column::plain("price", "REAL"),
    Column::plain("total_spent", "REAL"),
    Column::plain("payment_method", "TEXT"),
    Column::plain("location", "TEXT"),
];

pub const DIM_DATE: &[Column] = &[
    Column::pk("date_id", "INTEGER"),
    Column::plain("full_date", "DATE"),
    Column::plain("day_of_week", "INTEGER"),
    Column::plain("day_name", "TEXT"),
    Column::plain("is_weekend", "INTEGER"),
    Column::plain("month", "INTEGER"),
    Column::plain("month_name", "TEXT"),
    Column::plain("quarter", "INTEGER"),
    Column::plain("year", "INTEGER"),
    Column::plain("fiscal_year", "INTEGER"),
];

pub const DIM_PRODUCT: &[Column] = &[
    Column::pk("product_id", "INTEGER"),
    Column::plain("product_name", "TEXT"),
    Column::plain("category", "TEXT"),
];

pub const DIM_CUSTOMER: &[Column] = &[
    Column::pk("customer_id", "INTEGER"),
    Column::plain("customer_name", "TEXT"),
    Column::plain("total_transactions", "INTEGER"),
    Column::plain("total_spent", "REAL"),
    Column::plain("avg_basket_size", "REAL"),
    Column::plain("preferred_category", "TEXT"),
    Column::plain("preferred_location", "TEXT"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableId {
    FactSales,
    DimDate,
    DimProduct,
    DimCustomer,
}

impl TableId {
    pub fn name(self) -> &'static str {
        match self {
            TableId::FactSales => "FactSales",
            TableId::DimDate => "DimDate",
            TableId::DimProduct => "DimProduct",
            TableId::DimCustomer => "DimCustomer",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A table together with its placement. `(x, y)` is the top-left corner in
/// diagram units, with y growing upwards.
#[derive(Debug, Clone)]
pub struct Table {
    pub id: TableId,
    pub title: &'static str,
    pub columns: &'static [Column],
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct Relationship {
    pub from: TableId,
    pub to: TableId,
    pub from_side: Side,
    pub to_side: Side,
    pub label: &'static str,
}

impl Relationship {
    /// Builds a relationship from side names such as `"left"` or `"top"`.
    pub fn parse(
        from: TableId,
        to: TableId,
        from_side: &str,
        to_side: &str,
        label: &'static str,
    ) -> Result<Self, DiagramError> {
        Ok(Self {
            from,
            to,
            from_side: from_side.parse()?,
            to_side: to_side.parse()?,
            label,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Caption {
    pub text: &'static str,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct StarSchema {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
    pub title: Caption,
    pub subtitle: Caption,
}

const FACT_WIDTH: f32 = 4.6;
const DIM_WIDTH: f32 = 4.2;

impl StarSchema {
    /// Fact table in the middle, DimDate to its left, DimProduct upper right
    /// and DimCustomer lower right.
    pub fn retail_sales() -> Result<Self, DiagramError> {
        let tables = vec![
            Table {
                id: TableId::FactSales,
                title: "FactSales  (Fact Table)",
                columns: FACT_SALES,
                x: 5.8,
                y: 1.5,
                width: FACT_WIDTH,
            },
            Table {
                id: TableId::DimDate,
                title: "DimDate",
                columns: DIM_DATE,
                x: 0.0,
                y: 1.2,
                width: DIM_WIDTH,
            },
            Table {
                id: TableId::DimProduct,
                title: "DimProduct",
                columns: DIM_PRODUCT,
                x: 12.0,
                y: 1.2,
                width: DIM_WIDTH,
            },
            Table {
                id: TableId::DimCustomer,
                title: "DimCustomer",
                columns: DIM_CUSTOMER,
                x: 12.0,
                y: -1.5,
                width: DIM_WIDTH,
            },
        ];

        let relationships = vec![
            Relationship::parse(TableId::FactSales, TableId::DimDate, "left", "right", "date_id")?,
            Relationship::parse(
                TableId::FactSales,
                TableId::DimProduct,
                "right",
                "left",
                "product_id",
            )?,
            Relationship::parse(
                TableId::FactSales,
                TableId::DimCustomer,
                "right",
                "left",
                "customer_id",
            )?,
        ];

        Ok(Self {
            tables,
            relationships,
            title: Caption {
                text: "Star Schema  \u{2014}  Retail Sales Data Warehouse",
                x: 8.0,
                y: -7.6,
            },
            subtitle: Caption {
                text: "FactSales references three dimension tables via foreign keys",
                x: 8.0,
                y: -8.1,
            },
        })
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|table| table.id == id)
    }
}
