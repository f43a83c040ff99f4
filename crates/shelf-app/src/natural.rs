// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

pub fn compare_labels(left: &str, right: &str) -> Ordering {
    let mut left_tokens = left.split_whitespace();
    let mut right_tokens = right.split_whitespace();
    loop {
        match (left_tokens.next(), right_tokens.next()) {
            (Some(left), Some(right)) => {
                let ordering = compare_tokens(left, right);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}

pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|byte| byte.is_ascii_digit())
}

fn compare_tokens(left: &str, right: &str) -> Ordering {
    if is_numeric_token(left) && is_numeric_token(right) {
        compare_digits(left, right)
    } else {
        left.cmp(right)
    }
}

// Digit strings of any length: drop leading zeros, then the longer run is the larger value.
fn compare_digits(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::{compare_labels, is_numeric_token};
    use std::cmp::Ordering;

    #[test]
    fn numeric_tokens_compare_by_value() {
        assert_eq!(compare_labels("Item 9", "Item 10"), Ordering::Less);
        assert_eq!(compare_labels("Item 10", "Item 9"), Ordering::Greater);
        assert_eq!(compare_labels("Item 276", "Item 28"), Ordering::Greater);
        assert_eq!(compare_labels("2", "10"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_do_not_change_value() {
        assert_eq!(compare_labels("Item 007", "Item 7"), Ordering::Equal);
        assert_eq!(compare_labels("0", "000"), Ordering::Equal);
        assert_eq!(compare_labels("Item 010", "Item 9"), Ordering::Greater);
    }

    #[test]
    fn huge_numeric_tokens_compare_by_value() {
        let big = "123456789012345678901234567890";
        let bigger = "123456789012345678901234567891";
        assert_eq!(compare_labels(big, bigger), Ordering::Less);
        assert_eq!(compare_labels(bigger, "99"), Ordering::Greater);
    }

    #[test]
    fn mixed_tokens_compare_by_code_point() {
        assert_eq!(compare_labels("Item 9a", "Item 10"), Ordering::Greater);
        assert_eq!(compare_labels("Item -1", "Item 1"), Ordering::Less);
        assert_eq!(compare_labels("Alpha", "Beta"), Ordering::Less);
    }

    #[test]
    fn case_is_not_folded() {
        assert_eq!(compare_labels("Apple", "apple"), Ordering::Less);
        assert_eq!(compare_labels("apple", "Apple"), Ordering::Greater);
        assert_ne!(compare_labels("ITEM 1", "item 1"), Ordering::Equal);
        assert_eq!(compare_labels("Zebra", "apple"), Ordering::Less);
    }

    #[test]
    fn shorter_token_run_sorts_first_on_tie() {
        assert_eq!(compare_labels("Item", "Item 1"), Ordering::Less);
        assert_eq!(compare_labels("Item 1 b", "Item 1"), Ordering::Greater);
        assert_eq!(compare_labels("", "Item"), Ordering::Less);
        assert_eq!(compare_labels("", ""), Ordering::Equal);
    }

    #[test]
    fn runs_of_whitespace_split_like_single_spaces() {
        assert_eq!(compare_labels("Item   9", "Item 9"), Ordering::Equal);
        assert_eq!(compare_labels(" Item\t10 ", "Item 9"), Ordering::Greater);
        assert_eq!(compare_labels("   ", ""), Ordering::Equal);
    }

    #[test]
    fn comparison_is_antisymmetric() {
        let labels = ["Item 9", "Item 10", "item 9", "Item", "Alpha 2", "Alpha 02", ""];
        for left in labels {
            for right in labels {
                assert_eq!(
                    compare_labels(left, right),
                    compare_labels(right, left).reverse(),
                    "{left:?} vs {right:?}"
                );
            }
        }
    }

    #[test]
    fn numeric_token_detection() {
        assert!(is_numeric_token("0"));
        assert!(is_numeric_token("0042"));
        assert!(!is_numeric_token(""));
        assert!(!is_numeric_token("-1"));
        assert!(!is_numeric_token("1.5"));
        assert!(!is_numeric_token("١٢"));
    }
}
