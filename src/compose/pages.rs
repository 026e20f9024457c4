//! Mapping of content pages onto letterhead page roles
//!
//! The first content page uses letterhead page 0, every later page uses the
//! continuation page 1. A one-page letterhead serves both roles.

use super::error::ComposeError;

/// Branding variant a content page is laid on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRole {
    First,
    Continuation,
}

impl PageRole {
    pub fn for_content_index(index: usize) -> Self {
        if index == 0 {
            PageRole::First
        } else {
            PageRole::Continuation
        }
    }
}

/// Letterhead page index for a content page, `None` for an empty letterhead
pub fn letterhead_page_for(content_index: usize, letterhead_pages: usize) -> Option<usize> {
    if letterhead_pages == 0 {
        return None;
    }
    match PageRole::for_content_index(content_index) {
        PageRole::First => Some(0),
        PageRole::Continuation => Some(1.min(letterhead_pages - 1)),
    }
}

/// Letterhead page index for every content page, in content order
pub fn page_plan(content_pages: usize, letterhead_pages: usize) -> Result<Vec<usize>, ComposeError> {
    if letterhead_pages == 0 {
        return Err(ComposeError::EmptyLetterhead);
    }
    (0..content_pages)
        .map(|i| letterhead_page_for(i, letterhead_pages).ok_or(ComposeError::EmptyLetterhead))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_pages_on_two_page_letterhead() {
        assert_eq!(page_plan(3, 2).unwrap(), vec![0, 1, 1]);
    }

    #[test]
    fn test_single_page_letterhead_is_reused() {
        assert_eq!(page_plan(2, 1).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_extra_letterhead_pages_are_ignored() {
        assert_eq!(page_plan(4, 5).unwrap(), vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_empty_letterhead_fails() {
        assert!(matches!(page_plan(2, 0), Err(ComposeError::EmptyLetterhead)));
        assert!(matches!(page_plan(0, 0), Err(ComposeError::EmptyLetterhead)));
        assert_eq!(letterhead_page_for(0, 0), None);
    }

    #[test]
    fn test_empty_content() {
        assert!(page_plan(0, 2).unwrap().is_empty());
    }

    #[test]
    fn test_page_roles() {
        assert_eq!(PageRole::for_content_index(0), PageRole::First);
        assert_eq!(PageRole::for_content_index(1), PageRole::Continuation);
        assert_eq!(PageRole::for_content_index(17), PageRole::Continuation);
    }
}
