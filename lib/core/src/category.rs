use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Closed set of catalog categories.
///
/// `Other` is both a real catalog label and the fallback answer when the
/// engine has no confident match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Produce,
    Dairy,
    Bakery,
    #[serde(rename = "Meat & Seafood")]
    MeatAndSeafood,
    Pantry,
    Frozen,
    Snacks,
    Beverages,
    Household,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Pet Supplies")]
    PetSupplies,
    #[default]
    Other,
}

impl Category {
    pub const COUNT: usize = 12;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Produce,
        Category::Dairy,
        Category::Bakery,
        Category::MeatAndSeafood,
        Category::Pantry,
        Category::Frozen,
        Category::Snacks,
        Category::Beverages,
        Category::Household,
        Category::PersonalCare,
        Category::PetSupplies,
        Category::Other,
    ];

    /// Display label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::MeatAndSeafood => "Meat & Seafood",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Snacks => "Snacks",
            Category::Beverages => "Beverages",
            Category::Household => "Household",
            Category::PersonalCare => "Personal Care",
            Category::PetSupplies => "Pet Supplies",
            Category::Other => "Other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Produce => "🥬",
            Category::Dairy => "🥛",
            Category::Bakery => "🥖",
            Category::MeatAndSeafood => "🥩",
            Category::Pantry => "🥫",
            Category::Frozen => "🧊",
            Category::Snacks => "🍿",
            Category::Beverages => "🥤",
            Category::Household => "🧴",
            Category::PersonalCare => "🧼",
            Category::PetSupplies => "🐾",
            Category::Other => "📦",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .find(|c| c.label() == s)
            .or_else(|| Category::ALL.iter().find(|c| c.label().eq_ignore_ascii_case(s)))
            .copied()
            .ok_or_else(|| Error::Serialization(format!("unknown category '{}'", s)))
    }
}
