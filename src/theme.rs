use serde::{Deserialize, Serialize};

use crate::schema::TableId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColors {
    pub header: String,
    pub body: String,
}

impl TableColors {
    fn new(header: &str, body: &str) -> Self {
        Self {
            header: header.to_string(),
            body: body.to_string(),
        }
    }
}

/// Stroke/text colour and pill fill for a key badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeColors {
    pub stroke: String,
    pub fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub mono_font_family: String,
    pub background: String,
    pub text_dark: String,
    pub text_light: String,
    pub text_muted: String,
    pub line_color: String,
    pub separator_color: String,
    pub label_background: String,
    pub label_background_opacity: f32,
    pub pk: BadgeColors,
    pub fk: BadgeColors,
    pub fact: TableColors,
    pub dim_date: TableColors,
    pub dim_product: TableColors,
    pub dim_customer: TableColors,
}

impl Theme {
    /// Palette of the retail sales warehouse diagram.
    pub fn retail() -> Self {
        Self {
            font_family: "DejaVu Sans, Helvetica, Arial, sans-serif".to_string(),
            mono_font_family: "DejaVu Sans Mono, Menlo, Consolas, monospace".to_string(),
            background: "#FDFEFE".to_string(),
            text_dark: "#1C2833".to_string(),
            text_light: "#FFFFFF".to_string(),
            text_muted: "#7F8C8D".to_string(),
            line_color: "#566573".to_string(),
            separator_color: "#D5D8DC".to_string(),
            label_background: "#FFFFFF".to_string(),
            label_background_opacity: 0.9,
            pk: BadgeColors {
                stroke: "#E74C3C".to_string(),
                fill: "#FDEDEC".to_string(),
            },
            fk: BadgeColors {
                stroke: "#2980B9".to_string(),
                fill: "#EBF5FB".to_string(),
            },
            fact: TableColors::new("#C0392B", "#FADBD8"),
            dim_date: TableColors::new("#2471A3", "#D4E6F1"),
            dim_product: TableColors::new("#1E8449", "#D5F5E3"),
            dim_customer: TableColors::new("#7D3C98", "#E8DAEF"),
        }
    }

    pub fn table_colors(&self, id: TableId) -> &TableColors {
        match id {
            TableId::FactSales => &self.fact,
            TableId::DimDate => &self.dim_date,
            TableId::DimProduct => &self.dim_product,
            TableId::DimCustomer => &self.dim_customer,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::retail()
    }
}
