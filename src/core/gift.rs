use serde::{Deserialize, Serialize};

use super::matches_search;

/// A gift idea kept in the vault until (and after) it is purchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub price_range: String,
    pub occasion: String,
    pub category: String,
    pub image_url: String,
    pub purchased: bool,
    pub notes: String,
    pub link: String,
}

impl Gift {
    /// Canonical form options. The backend stores these as free strings.
    pub const PRICE_RANGES: [&'static str; 5] =
        ["$0-25", "$26-50", "$51-100", "$101-200", "$201+"];
    pub const OCCASIONS: [&'static str; 6] = [
        "Birthday",
        "Anniversary",
        "Christmas",
        "Valentine's Day",
        "Wedding",
        "Other",
    ];
    pub const CATEGORIES: [&'static str; 8] = [
        "Electronics",
        "Clothing",
        "Home & Kitchen",
        "Books",
        "Sports",
        "Beauty",
        "Toys",
        "Other",
    ];

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            price_range: String::new(),
            occasion: String::new(),
            category: String::new(),
            image_url: String::new(),
            purchased: false,
            notes: String::new(),
            link: String::new(),
        }
    }

    pub fn mark_purchased(&mut self) {
        self.purchased = true;
    }
}

#[derive(Debug, Clone, Default)]
pub struct GiftFilter {
    pub category: Option<String>,
    pub occasion: Option<String>,
    pub price_range: Option<String>,
    /// `None` shows everything, `Some(true)` only purchased, `Some(false)` only unpurchased.
    pub purchased: Option<bool>,
    pub search: String,
}

impl GiftFilter {
    pub fn matches(&self, gift: &Gift) -> bool {
        if self.category.as_deref().is_some_and(|c| gift.category != c) {
            return false;
        }
        if self.occasion.as_deref().is_some_and(|o| gift.occasion != o) {
            return false;
        }
        if self
            .price_range
            .as_deref()
            .is_some_and(|p| gift.price_range != p)
        {
            return false;
        }
        if self.purchased.is_some_and(|p| gift.purchased != p) {
            return false;
        }
        matches_search(
            &self.search,
            &[&gift.title, &gift.description, &gift.notes],
        )
    }

    pub fn apply<'a>(&self, gifts: &'a [Gift]) -> Vec<&'a Gift> {
        gifts.iter().filter(|g| self.matches(g)).collect()
    }
}
