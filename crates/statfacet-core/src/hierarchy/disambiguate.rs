//! Sibling-scoped label disambiguation.
//!
//! Runs as a separate pass once a sibling list is fully materialized
//! and sorted; the rule is local to one list and never global.

use std::collections::HashMap;

use crate::models::option_tree::LocationOptionNode;

/// Rewrite colliding leaf labels within one sibling list.
///
/// Leaves sharing a label but holding different values are all
/// relabelled `"label (value)"`. Leaves that also share the value are
/// genuine duplicate rows and keep their label unchanged.
pub fn disambiguate_labels(siblings: &mut [LocationOptionNode]) {
    let mut by_label: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, node) in siblings.iter().enumerate() {
        if node.is_leaf() {
            by_label.entry(node.label.clone()).or_default().push(index);
        }
    }

    for indices in by_label.into_values() {
        if indices.len() < 2 {
            continue;
        }
        let all_values_equal = indices
            .windows(2)
            .all(|pair| siblings[pair[0]].value == siblings[pair[1]].value);
        if all_values_equal {
            continue;
        }
        for &index in &indices {
            let node = &mut siblings[index];
            node.label = format!("{} ({})", node.label, node.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::LocationId;

    fn leaf(label: &str, value: &str) -> LocationOptionNode {
        LocationOptionNode::leaf(LocationId::new(), label, value)
    }

    #[test]
    fn test_colliding_labels_with_distinct_values_are_rewritten() {
        let mut siblings = vec![leaf("Derby", "E06000015"), leaf("Derby", "E06000016")];
        disambiguate_labels(&mut siblings);

        assert_eq!(siblings[0].label, "Derby (E06000015)");
        assert_eq!(siblings[1].label, "Derby (E06000016)");
    }

    #[test]
    fn test_identical_duplicates_are_left_untouched() {
        let mut siblings = vec![leaf("Derby", "E06000015"), leaf("Derby", "E06000015")];
        disambiguate_labels(&mut siblings);

        assert_eq!(siblings[0].label, "Derby");
        assert_eq!(siblings[1].label, "Derby");
    }

    #[test]
    fn test_unique_labels_are_left_untouched() {
        let mut siblings = vec![leaf("Derby", "E06000015"), leaf("Nottingham", "E06000018")];
        disambiguate_labels(&mut siblings);

        assert_eq!(siblings[0].label, "Derby");
        assert_eq!(siblings[1].label, "Nottingham");
    }

    #[test]
    fn test_mixed_collision_rewrites_every_member() {
        // Two leaves share a value, a third differs: values are not all
        // identical, so the whole set is rewritten
        let mut siblings = vec![
            leaf("Derby", "E06000015"),
            leaf("Derby", "E06000015"),
            leaf("Derby", "E06000016"),
        ];
        disambiguate_labels(&mut siblings);

        assert_eq!(siblings[0].label, "Derby (E06000015)");
        assert_eq!(siblings[1].label, "Derby (E06000015)");
        assert_eq!(siblings[2].label, "Derby (E06000016)");
    }

    #[test]
    fn test_group_nodes_are_ignored() {
        use crate::models::location::GeographicLevel;

        let mut siblings = vec![
            LocationOptionNode::group(GeographicLevel::Region, "North", "E12000001", vec![]),
            LocationOptionNode::group(GeographicLevel::Region, "North", "E12000002", vec![]),
        ];
        disambiguate_labels(&mut siblings);

        assert_eq!(siblings[0].label, "North");
        assert_eq!(siblings[1].label, "North");
    }
}
