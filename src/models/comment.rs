use crate::models::user::UserId;
use std::fmt;
use std::str::FromStr;

pub type CommentId = u32;

/// Author id recorded for comments written from the admin account.
/// User ids start at 1, so this never collides with a real user.
pub const ADMIN_AUTHOR_ID: UserId = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    /// Sequential comment ID, never reused
    pub id: CommentId,
    /// Owner of the comment; not checked against the user store
    pub author_id: UserId,
    pub text: String,
    /// Sentiment label. Any string is accepted here, forms restrict it to `Category`.
    pub category: String,
}

impl Comment {
    pub fn new(
        id: CommentId,
        author_id: UserId,
        text: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author_id,
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Closed set of sentiment categories offered by the comment forms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Positive,
    Neutral,
    Negative,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Positive, Category::Neutral, Category::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Neutral => "neutral",
            Category::Negative => "negative",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the lowercase name in any ASCII case, or the menu number 1-3
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "1" => Ok(Category::Positive),
            "neutral" | "2" => Ok(Category::Neutral),
            "negative" | "3" => Ok(Category::Negative),
            other => Err(other.to_string()),
        }
    }
}

/// Per-category totals for the admin statistics view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Positive => self.positive,
            Category::Neutral => self.neutral,
            Category::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_names() {
        assert_eq!("positive".parse::<Category>(), Ok(Category::Positive));
        assert_eq!("Neutral".parse::<Category>(), Ok(Category::Neutral));
        assert_eq!(" NEGATIVE ".parse::<Category>(), Ok(Category::Negative));
    }

    #[test]
    fn test_category_parse_menu_numbers() {
        assert_eq!("1".parse::<Category>(), Ok(Category::Positive));
        assert_eq!("2".parse::<Category>(), Ok(Category::Neutral));
        assert_eq!("3".parse::<Category>(), Ok(Category::Negative));
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert!("happy".parse::<Category>().is_err());
        assert!("4".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_round_trips_name() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_category_counts_total() {
        let counts = CategoryCounts { positive: 2, neutral: 0, negative: 1 };
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get(Category::Positive), 2);
        assert_eq!(counts.get(Category::Neutral), 0);
    }
}
