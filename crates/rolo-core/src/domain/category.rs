use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed contact classification; selects the destination remote table and
/// the local cache partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    General,
    Doctor,
    RealEstate,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::General, Category::Doctor, Category::RealEstate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Doctor => "doctor",
            Category::RealEstate => "real_estate",
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            Category::General => "general_contacts",
            Category::Doctor => "doctor_contacts",
            Category::RealEstate => "real_estate_contacts",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Category::General),
            "doctor" => Ok(Category::Doctor),
            "real_estate" | "real-estate" => Ok(Category::RealEstate),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Category;
    use std::str::FromStr;

    #[test]
    fn category_parses_canonical_names() {
        assert_eq!(Category::from_str("general").unwrap(), Category::General);
        assert_eq!(Category::from_str(" Doctor ").unwrap(), Category::Doctor);
        assert_eq!(
            Category::from_str("real_estate").unwrap(),
            Category::RealEstate
        );
    }

    #[test]
    fn category_rejects_unknown_names() {
        assert!(Category::from_str("lawyer").is_err());
    }

    #[test]
    fn category_maps_to_fixed_tables() {
        assert_eq!(Category::General.table_name(), "general_contacts");
        assert_eq!(Category::Doctor.table_name(), "doctor_contacts");
        assert_eq!(Category::RealEstate.table_name(), "real_estate_contacts");
    }
}
