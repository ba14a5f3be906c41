//! Namespaced save keys used by the unlock core.

/// Signature used in marker keys when a requirement lists no maps
const EMPTY_SIGNATURE: &str = "*";

/// Flag: the prerequisite item of `map_id` has been collected for `group_id`
pub fn collection_key(group_id: &str, map_id: &str) -> String {
    format!("collect/{group_id}/{map_id}")
}

/// Counter: total prerequisite pickups recorded for a group (diagnostic only)
pub fn collection_count_key(group_id: &str) -> String {
    format!("collect_count/{group_id}")
}

/// Flag: the unlock sequence for this group and map set has been committed
pub fn marker_key(group_id: &str, member_maps: &[String]) -> String {
    let signature = if member_maps.is_empty() {
        EMPTY_SIGNATURE.to_string()
    } else {
        member_maps.join(",")
    };
    format!("unlock/{group_id}/{signature}")
}

/// Flag: the revealed bonus item itself has been picked up
pub fn bonus_collected_key(group_id: &str) -> String {
    format!("bonus/{group_id}/collected")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_key_namespacing() {
        assert_eq!(collection_key("G1", "A"), "collect/G1/A");
        assert_ne!(collection_key("G1", "A"), collection_key("G2", "A"));
    }

    #[test]
    fn test_marker_key_uses_member_maps() {
        let maps = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(marker_key("G1", &maps), "unlock/G1/A,B,C");
    }

    #[test]
    fn test_marker_key_differs_when_map_set_changes() {
        let maps_a = vec!["A".to_string(), "B".to_string()];
        let maps_b = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_ne!(marker_key("G1", &maps_a), marker_key("G1", &maps_b));
    }

    #[test]
    fn test_marker_key_empty_signature() {
        assert_eq!(marker_key("G1", &[]), "unlock/G1/*");
    }

    #[test]
    fn test_count_key_cannot_collide_with_map_named_count() {
        assert_ne!(collection_count_key("G1"), collection_key("G1", "count"));
    }
}
