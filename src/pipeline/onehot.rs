//! One-hot group detection
//!
//! A categorical variable expanded into indicator columns is recognised by
//! its naming pattern `<base>_<digits>`. All columns sharing a base form one
//! group and are ranked, selected, and rejected together.

use serde::Serialize;
use std::collections::HashMap;

/// Indicator columns that jointly encode one categorical variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OneHotGroup {
    /// Shared prefix (text before the trailing `_<digits>`)
    pub base: String,
    /// Member feature names, in dataset order
    pub members: Vec<String>,
}

/// Return the group base of a feature name, or `None` if the name does not
/// end in an underscore followed by one or more ASCII digits.
pub fn one_hot_base(feature: &str) -> Option<&str> {
    let (base, suffix) = feature.rsplit_once('_')?;
    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
        Some(base)
    } else {
        None
    }
}

/// Group features by one-hot base. Groups appear in order of their first
/// member; features that do not match the pattern are left out.
pub fn identify_one_hot_groups<S: AsRef<str>>(features: &[S]) -> Vec<OneHotGroup> {
    let mut groups: Vec<OneHotGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for feature in features {
        let feature = feature.as_ref();
        let Some(base) = one_hot_base(feature) else {
            continue;
        };

        match index.get(base) {
            Some(&i) => groups[i].members.push(feature.to_string()),
            None => {
                index.insert(base, groups.len());
                groups.push(OneHotGroup {
                    base: base.to_string(),
                    members: vec![feature.to_string()],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_base() {
        assert_eq!(one_hot_base("RACE_1"), Some("RACE"));
        assert_eq!(one_hot_base("EDUC_LEVEL_12"), Some("EDUC_LEVEL"));
        assert_eq!(one_hot_base("_3"), Some(""));
        assert_eq!(one_hot_base("INCTOT"), None);
        assert_eq!(one_hot_base("RACE_"), None);
        assert_eq!(one_hot_base("RACE_1a"), None);
        assert_eq!(one_hot_base("RACE_-1"), None);
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let features = ["SEX_2", "INCTOT", "RACE_1", "SEX_1", "RACE_2", "RACE_3"];
        let groups = identify_one_hot_groups(&features);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].base, "SEX");
        assert_eq!(groups[0].members, vec!["SEX_2", "SEX_1"]);
        assert_eq!(groups[1].base, "RACE");
        assert_eq!(groups[1].members, vec!["RACE_1", "RACE_2", "RACE_3"]);
    }

    #[test]
    fn test_single_member_is_still_a_group() {
        let groups = identify_one_hot_groups(&["METRO_4".to_string()]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!["METRO_4"]);
    }

    #[test]
    fn test_no_groups() {
        let groups = identify_one_hot_groups(&["INCTOT", "POVERTY", "RENT"]);
        assert!(groups.is_empty());
    }
}
