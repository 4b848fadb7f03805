// src/models/category.rs
// DOCUMENTATION: Quick-filter categories
// PURPOSE: Fixed set of one-tap searches offered to users

use serde::{Deserialize, Serialize};

/// Quick-filter category
/// DOCUMENTATION: Selecting a category searches for its Burmese label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Restaurant,
    Hotel,
    Hospital,
    Landmark,
    Atm,
}

/// Category entry as listed by GET /categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Category,
    pub label: String,
}

impl Category {
    /// Display order used by every client
    pub const ALL: [Category; 5] = [
        Category::Restaurant,
        Category::Hotel,
        Category::Hospital,
        Category::Landmark,
        Category::Atm,
    ];

    /// Burmese label, also used verbatim as the search term
    pub fn label(self) -> &'static str {
        match self {
            Category::Restaurant => "စားသောက်ဆိုင်",
            Category::Hotel => "ဟိုတယ်/တည်းခိုခန်း",
            Category::Hospital => "ဆေးရုံ/ဆေးခန်း",
            Category::Landmark => "အထင်ကရနေရာ",
            Category::Atm => "ATM/ဘဏ်",
        }
    }

    pub fn to_response(self) -> CategoryResponse {
        CategoryResponse {
            id: self,
            label: self.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_value(Category::Atm).unwrap(),
            serde_json::json!("ATM")
        );
        let parsed: Category = serde_json::from_str("\"HOSPITAL\"").unwrap();
        assert_eq!(parsed, Category::Hospital);
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Category::ALL.len());
    }
}
