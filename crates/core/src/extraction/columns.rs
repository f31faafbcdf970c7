//! Header-to-schema column mapping.
//!
//! Source documents name the same column in many ways ("S/N", "WBS Code",
//! "Unit Cost (NGN)", ...). Each WBS field has an ordered alias list; the
//! first alias present in a table's headers wins.

use serde::Serialize;

/// A field of the WBS budget template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WbsField {
    /// Hierarchical WBS code.
    WbsCode,
    /// Line item description.
    Description,
    /// Budgeted unit cost.
    UnitCost,
    /// Budgeted quantity.
    Quantity,
    /// Budgeted duration in days.
    Duration,
}

impl WbsField {
    /// All fields in template order.
    pub const ALL: [Self; 5] = [
        Self::WbsCode,
        Self::Description,
        Self::UnitCost,
        Self::Quantity,
        Self::Duration,
    ];

    /// Header aliases in priority order.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::WbsCode => &["S/N", "WBS Category", "WBS Code"],
            Self::Description => &["Item Description", "Item Description (Detailed Breakdown)"],
            Self::UnitCost => &["Unit Cost", "Unit Cost (NGN)"],
            Self::Quantity => &["Quantity", "Quantity (Nos.)"],
            Self::Duration => &["Man-day (from source document)", "Duration (Days)"],
        }
    }

    /// Tables missing an essential field are skipped.
    #[must_use]
    pub const fn is_essential(self) -> bool {
        !matches!(self, Self::Duration)
    }
}

impl std::fmt::Display for WbsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::WbsCode => "wbs_code",
            Self::Description => "description",
            Self::UnitCost => "unit_cost",
            Self::Quantity => "quantity",
            Self::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Normalises a header for comparison: trimmed, inner whitespace collapsed,
/// lowercase.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Column indexes of the WBS fields within one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// WBS code column.
    pub wbs_code: usize,
    /// Description column.
    pub description: usize,
    /// Unit cost column.
    pub unit_cost: usize,
    /// Quantity column.
    pub quantity: usize,
    /// Duration column, if present.
    pub duration: Option<usize>,
}

impl ColumnMap {
    /// Resolves the column map for a table's headers.
    ///
    /// # Errors
    ///
    /// Returns the list of essential fields with no matching header.
    pub fn resolve(headers: &[String]) -> Result<Self, Vec<WbsField>> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let find = |field: WbsField| {
            field.aliases().iter().find_map(|alias| {
                let alias = normalize_header(alias);
                normalized.iter().position(|header| *header == alias)
            })
        };

        let missing: Vec<WbsField> = WbsField::ALL
            .into_iter()
            .filter(|field| field.is_essential() && find(*field).is_none())
            .collect();

        match (
            find(WbsField::WbsCode),
            find(WbsField::Description),
            find(WbsField::UnitCost),
            find(WbsField::Quantity),
        ) {
            (Some(wbs_code), Some(description), Some(unit_cost), Some(quantity)) => Ok(Self {
                wbs_code,
                description,
                unit_cost,
                quantity,
                duration: find(WbsField::Duration),
            }),
            _ => Err(missing),
        }
    }
}
