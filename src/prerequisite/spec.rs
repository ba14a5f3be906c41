use bevy::prelude::*;

use crate::store::keys;

/// Separators accepted in design-time member map lists
const MAP_SEPARATORS: [char; 2] = [',', ';'];

/// Which prerequisite maps must be collected before a bonus item appears.
///
/// Built once from level placement data. `member_maps` keeps placement order
/// with duplicates removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSpec {
    group_id: String,
    member_maps: Vec<String>,
    required_count: Option<i32>,
    malformed: bool,
}

impl RequirementSpec {
    pub fn new<S: Into<String>>(
        group_id: impl Into<String>,
        member_maps: impl IntoIterator<Item = S>,
        required_count: Option<i32>,
    ) -> Self {
        let mut maps: Vec<String> = Vec::new();
        for map in member_maps {
            let map = map.into();
            if !maps.contains(&map) {
                maps.push(map);
            }
        }

        Self {
            group_id: group_id.into(),
            member_maps: maps,
            required_count,
            malformed: false,
        }
    }

    /// Parses placement strings.
    ///
    /// `member_maps` is delimited by `,` or `;`. Empty entries are dropped; an
    /// entry containing whitespace or control characters makes the whole list
    /// malformed, which degrades to no maps. An unparsable `required_count` is
    /// ignored and a negative one is treated as zero.
    pub fn parse(group_id: &str, member_maps: &str, required_count: Option<&str>) -> Self {
        let group_id = group_id.trim();
        if group_id.is_empty() {
            warn!("Collectible placement has an empty group id");
        }

        let entries: Vec<&str> = member_maps
            .split(MAP_SEPARATORS)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();

        let malformed = entries
            .iter()
            .any(|entry| entry.chars().any(|c| c.is_whitespace() || c.is_control()));

        let required_count = required_count.and_then(|raw| parse_required_count(group_id, raw));

        if malformed {
            warn!(
                "Malformed member map list {:?} for group {:?}; treating as no maps",
                member_maps, group_id
            );
            let mut spec = Self::new(group_id, Vec::<String>::new(), required_count);
            spec.malformed = true;
            return spec;
        }

        Self::new(group_id, entries, required_count)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn member_maps(&self) -> &[String] {
        &self.member_maps
    }

    pub fn required_count(&self) -> Option<i32> {
        self.required_count
    }

    /// True when the placement's map list could not be parsed
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Save key of the one-time unlock marker for this requirement
    pub fn marker_key(&self) -> String {
        keys::marker_key(&self.group_id, &self.member_maps)
    }

    /// Save key of one member map's collection flag
    pub fn collection_key(&self, map_id: &str) -> String {
        keys::collection_key(&self.group_id, map_id)
    }

    pub fn contains_map(&self, map_id: &str) -> bool {
        self.member_maps.iter().any(|map| map == map_id)
    }
}

fn parse_required_count(group_id: &str, raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<i32>() {
        Ok(count) if count < 0 => {
            warn!("Negative required count {count} for group {group_id:?}; using 0");
            Some(0)
        }
        Ok(count) => Some(count),
        Err(_) => {
            warn!("Ignoring unparsable required count {raw:?} for group {group_id:?}");
            None
        }
    }
}
