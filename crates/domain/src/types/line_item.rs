//! Quoted product lines and box styles

use serde::{Deserialize, Serialize};

/// One quoted product line of a deal.
///
/// Dimensions are millimetres. Values are already sanitized at the CRM
/// boundary, so they are finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    /// Parent deal id (empty when the CRM did not report the association)
    #[serde(default)]
    pub deal_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub length_mm: f64,
    #[serde(default)]
    pub width_mm: f64,
    #[serde(default)]
    pub height_mm: f64,
    /// Free-text box style as typed by the sales rep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_style: Option<String>,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
}

impl LineItem {
    /// Parsed box style for this line.
    pub fn style(&self) -> BoxStyle {
        BoxStyle::parse(self.box_style.as_deref())
    }

    /// Line amount, falling back to `unit_price × quantity` when the CRM left
    /// the amount empty.
    pub fn effective_amount(&self) -> f64 {
        if self.amount > 0.0 {
            self.amount
        } else {
            self.unit_price * self.quantity
        }
    }
}

/// Cutting formula family of a box, parsed once from the free-text tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoxStyle {
    TwoSheets,
    Tray,
    Fence,
    CrossedFlapTwoSides,
    CrossedFlapOneSide,
    Telescopic,
    Sheet,
    #[default]
    SimpleFlap,
}

const TWO_SHEETS_KEYWORDS: &[&str] = &["two sheets", "2 sheets", "dos planchas", "2 planchas"];
const TRAY_KEYWORDS: &[&str] = &["tray", "bandeja"];
const FENCE_KEYWORDS: &[&str] = &["fence", "wrap", "cerco", "envolvente"];
const CROSSED_KEYWORDS: &[&str] = &["crossed", "cruzad"];
const TWO_SIDES_KEYWORDS: &[&str] = &["x2", "2 sides", "2 lados", "ambos lados"];
const ONE_SIDE_KEYWORDS: &[&str] = &["x1", "1 side", "1 lado"];
const TELESCOPIC_KEYWORDS: &[&str] = &["telesc"];
const SHEET_KEYWORDS: &[&str] = &["sheet", "plancha", "lamina", "lámina"];

impl BoxStyle {
    /// Parse a raw style tag.
    ///
    /// Matching is case-insensitive substring matching in a fixed priority
    /// order; the first family that matches wins and anything unrecognized
    /// (including a missing tag) is the simple-flap default.
    ///
    /// ```
    /// use dealscope_domain::BoxStyle;
    ///
    /// assert_eq!(BoxStyle::parse(Some("Dos Planchas")), BoxStyle::TwoSheets);
    /// assert_eq!(BoxStyle::parse(Some("Aleta cruzada ×2")), BoxStyle::CrossedFlapTwoSides);
    /// assert_eq!(BoxStyle::parse(Some("Plancha")), BoxStyle::Sheet);
    /// assert_eq!(BoxStyle::parse(None), BoxStyle::SimpleFlap);
    /// ```
    pub fn parse(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::SimpleFlap;
        };
        let normalized = tag.to_lowercase().replace('×', "x");
        let has = |keywords: &[&str]| keywords.iter().any(|k| normalized.contains(k));

        if has(TWO_SHEETS_KEYWORDS) {
            Self::TwoSheets
        } else if has(TRAY_KEYWORDS) {
            Self::Tray
        } else if has(FENCE_KEYWORDS) {
            Self::Fence
        } else if has(CROSSED_KEYWORDS) && has(TWO_SIDES_KEYWORDS) {
            Self::CrossedFlapTwoSides
        } else if has(CROSSED_KEYWORDS) && has(ONE_SIDE_KEYWORDS) {
            Self::CrossedFlapOneSide
        } else if has(TELESCOPIC_KEYWORDS) {
            Self::Telescopic
        } else if has(SHEET_KEYWORDS) {
            Self::Sheet
        } else {
            Self::SimpleFlap
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoSheets => "Two sheets",
            Self::Tray => "Tray",
            Self::Fence => "Fence / wrap",
            Self::CrossedFlapTwoSides => "Crossed flap (2 sides)",
            Self::CrossedFlapOneSide => "Crossed flap (1 side)",
            Self::Telescopic => "Telescopic",
            Self::Sheet => "Sheet",
            Self::SimpleFlap => "Simple flap",
        }
    }
}
