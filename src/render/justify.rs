//! Column alignment for badge fields
//!
//! Each value sits after a run of dots (`<id>_dots`) so the right edge of every line stays
//! put whatever the value's length.

use crate::domain::BadgeStats;
use crate::utils::format_with_commas;

/// Filler placed before a value so that filler + value spans `width` characters.
pub fn filler(width: usize, text_len: usize) -> String {
    let shortfall = width.saturating_sub(text_len);
    match shortfall {
        0 => String::new(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => format!(" {} ", ".".repeat(n)),
    }
}

/// A text field of the badge and the column width its value is justified to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: &'static str,
    pub text: String,
    pub width: usize,
}

impl Field {
    fn new(id: &'static str, text: String, width: usize) -> Self {
        Self { id, text, width }
    }

    pub fn dots_id(&self) -> String {
        format!("{}_dots", self.id)
    }

    pub fn filler(&self) -> String {
        filler(self.width, self.text.chars().count())
    }
}

/// Every badge field with its formatted value.
pub fn badge_fields(stats: &BadgeStats) -> Vec<Field> {
    vec![
        Field::new("age_data", stats.age.clone(), 49),
        Field::new("commit_data", format_with_commas(stats.commits), 22),
        Field::new("star_data", format_with_commas(stats.stars), 14),
        Field::new("repo_data", format_with_commas(stats.repos), 7),
        Field::new("contrib_data", format_with_commas(stats.contributed), 0),
        Field::new("follower_data", format_with_commas(stats.followers), 10),
        Field::new("loc_data", format_with_commas(stats.loc.net()), 9),
        Field::new("loc_add", format_with_commas(stats.loc.added), 0),
        Field::new("loc_del", format_with_commas(stats.loc.deleted), 7),
        Field::new("pr_data", format_with_commas(stats.pull_requests), 17),
        Field::new("issue_data", format_with_commas(stats.issues), 13),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocTotals;

    #[test]
    fn no_filler_when_value_fills_the_column() {
        assert_eq!(filler(10, 10), "");
        assert_eq!(filler(10, 12), "");
        assert_eq!(filler(0, 3), "");
    }

    #[test]
    fn short_gaps_use_fixed_fillers() {
        assert_eq!(filler(10, 9), " ");
        assert_eq!(filler(10, 8), ". ");
    }

    #[test]
    fn wider_gaps_are_dotted() {
        assert_eq!(filler(10, 7), " ... ");
        assert_eq!(filler(10, 5), " ..... ");
        assert_eq!(filler(10, 5).matches('.').count(), 5);
    }

    #[test]
    fn fields_use_grouped_numbers() {
        let stats = BadgeStats {
            age: "19 years, 11 months, 28 days".to_string(),
            commits: 1234,
            stars: 5,
            repos: 12,
            contributed: 40,
            followers: 1_000_000,
            loc: LocTotals { added: 120_000, deleted: 20_500, commits: 1234 },
            pull_requests: 3,
            issues: 0,
        };
        let fields = badge_fields(&stats);
        let get = |id: &str| fields.iter().find(|f| f.id == id).expect("field").clone();

        assert_eq!(get("commit_data").text, "1,234");
        assert_eq!(get("loc_data").text, "99,500");
        assert_eq!(get("loc_add").text, "120,000");
        assert_eq!(get("follower_data").text, "1,000,000");
        assert_eq!(get("follower_data").filler(), " ");
        assert_eq!(get("repo_data").filler(), " ..... ");
        assert_eq!(get("loc_add").filler(), "");
        assert_eq!(get("loc_del").dots_id(), "loc_del_dots");
    }
}
