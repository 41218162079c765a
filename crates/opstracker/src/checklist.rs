//! The fixed 6S checklist taxonomy.
//!
//! Six categories, seventeen items. The audit form, the compliance score and
//! the failing-items report all iterate [`ITEMS`], so declaration order here
//! is the order everywhere else.

use serde::Serialize;

/// One of the six 6S categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Remove what is not needed.
    Sort,
    /// A place for everything.
    SetInOrder,
    /// Keep it clean.
    Shine,
    /// Same process everywhere.
    Standardize,
    /// Keep the habits going.
    Sustain,
    /// Hazards under control.
    Safety,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Sort,
        Category::SetInOrder,
        Category::Shine,
        Category::Standardize,
        Category::Sustain,
        Category::Safety,
    ];

    /// Display name of the category.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sort => "Sort",
            Self::SetInOrder => "Set in Order",
            Self::Shine => "Shine",
            Self::Standardize => "Standardize",
            Self::Sustain => "Sustain",
            Self::Safety => "Safety",
        }
    }

    /// The checklist items belonging to this category, in order.
    pub fn items(self) -> impl Iterator<Item = &'static ChecklistItem> {
        ITEMS.iter().filter(move |item| item.category == self)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single checklist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Stable key, e.g. `item_4`.
    pub key: &'static str,
    /// Category the item is audited under.
    pub category: Category,
    /// Human-readable description shown on the form and in reports.
    pub description: &'static str,
}

impl ChecklistItem {
    /// Column name of the item's pass/fail flag, e.g. `item_4_Status`.
    #[must_use]
    pub fn status_column(&self) -> String {
        format!("{}_Status", self.key)
    }
}

/// Number of checklist items.
pub const ITEM_COUNT: usize = 17;

const fn item(
    key: &'static str,
    category: Category,
    description: &'static str,
) -> ChecklistItem {
    ChecklistItem {
        key,
        category,
        description,
    }
}

/// Every checklist item, in declaration order.
pub static ITEMS: [ChecklistItem; ITEM_COUNT] = [
    item("item_1", Category::Sort, "Workstation free of items"),
    item("item_2", Category::Sort, "Floors clear"),
    item("item_3", Category::Sort, "Unneeded bins removed"),
    item("item_4", Category::SetInOrder, "Tools in designated locations"),
    item("item_5", Category::SetInOrder, "Bin locations marked"),
    item("item_6", Category::SetInOrder, "Ergonomic arrangement"),
    item("item_7", Category::Shine, "Port/workstation clean"),
    item("item_8", Category::Shine, "Grid/chargers free of dust"),
    item("item_9", Category::Shine, "Bins clean"),
    item("item_10", Category::Standardize, "SOPs visible/followed"),
    item("item_11", Category::Standardize, "Cleaning schedules posted"),
    item("item_12", Category::Standardize, "Operators follow same process"),
    item("item_13", Category::Sustain, "Previous actions completed"),
    item("item_14", Category::Sustain, "Operators actively participate"),
    item("item_15", Category::Safety, "E-stops accessible"),
    item("item_16", Category::Safety, "PPE used correctly"),
    item("item_17", Category::Safety, "No safety hazards present"),
];

/// Percentage of passing items: `100 * passed / 17`.
///
/// `statuses` is indexed like [`ITEMS`].
#[must_use]
#[allow(clippy::cast_precision_loss)] // counts never exceed 17
pub fn compliance_score(statuses: &[bool; ITEM_COUNT]) -> f64 {
    let passed = statuses.iter().filter(|passed| **passed).count();
    passed as f64 / ITEM_COUNT as f64 * 100.0
}

/// The taxonomy as an indented text listing, category by category.
#[must_use]
pub fn render_taxonomy() -> String {
    let mut out = String::new();
    for category in Category::ALL {
        out.push_str(category.name());
        out.push('\n');
        for item in category.items() {
            out.push_str(&format!("  {:<8} {}\n", item.key, item.description));
        }
    }
    out
}
