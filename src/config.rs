//! Build-time game constants.

/// Number of categories on a board.
pub const CATEGORY_COUNT: usize = 6;

/// Number of clues shown per category, one per grid row.
pub const CLUES_PER_CATEGORY: usize = 5;

/// How many candidate categories are requested before sampling.
pub const CATEGORY_POOL_SIZE: usize = 100;

/// Base URL of the trivia API, with trailing slash.
/// Set `TRIVIA_API_BASE` when building to point at another deployment.
pub const API_BASE: &str = match option_env!("TRIVIA_API_BASE") {
    Some(base) => base,
    None => "https://rithm-jeopardy.herokuapp.com/api/",
};

pub fn categories_url() -> String {
    format!("{}categories?count={}", API_BASE, CATEGORY_POOL_SIZE)
}

pub fn category_url(id: u32) -> String {
    format!("{}category?id={}", API_BASE, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_the_api_base() {
        assert!(API_BASE.ends_with('/'));
        assert_eq!(
            categories_url(),
            format!("{}categories?count=100", API_BASE)
        );
        assert_eq!(category_url(42), format!("{}category?id=42", API_BASE));
    }
}
