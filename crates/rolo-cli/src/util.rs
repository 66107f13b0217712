use crate::error::invalid_input;
use anyhow::Result;
use rolo_core::domain::Category;
use std::str::FromStr;

pub fn parse_category(raw: &str) -> Result<Category> {
    Category::from_str(raw)
        .map_err(|_| invalid_input("invalid category: expected general|doctor|real_estate"))
}

#[cfg(test)]
mod tests {
    use super::parse_category;
    use rolo_core::domain::Category;

    #[test]
    fn parse_category_accepts_known_names() {
        assert_eq!(parse_category("doctor").unwrap(), Category::Doctor);
    }

    #[test]
    fn parse_category_rejects_unknown_names() {
        assert!(parse_category("plumber").is_err());
    }
}
