//! Pure category-set reconciliation.
//!
//! Categories are a derived set: the distinct names observed across
//! constraint records, optionally seeded with a fixed default set. These
//! functions are synchronous and side-effect free; [`super::store`] decides
//! when their results become authoritative.

use serde_json::Value;

use schedai_proto::normalize::normalize_category_name;

/// Merges category names out of heterogeneous constraint records.
///
/// Each record is classified through
/// [`normalize_category_name`]; unclassifiable records are dropped. The
/// result is the union of `prior` (first, so a configured default set
/// always appears even when never observed) and the discovered names, in
/// observation order, deduplicated by exact string equality. Idempotent:
/// merging the same input twice yields the same output.
#[must_use]
pub fn merge_category_names(records: &[Value], prior: &[String]) -> Vec<String> {
    let discovered = records.iter().filter_map(normalize_category_name);
    let mut merged: Vec<String> = Vec::new();
    for name in prior.iter().cloned().chain(discovered) {
        if !merged.contains(&name) {
            merged.push(name);
        }
    }
    merged
}

/// Speculative local insertion of a just-added category name.
///
/// Returns `current` unchanged when `name` is already present
/// (case-sensitive exact match), otherwise a copy with `name` prepended.
/// The result is provisional: the next authoritative
/// [`merge_category_names`] from a reload supersedes it, and may silently
/// drop the entry if the server never persisted it.
#[must_use]
pub fn add_category(name: &str, current: &[String]) -> Vec<String> {
    if current.iter().any(|c| c == name) {
        return current.to_vec();
    }
    let mut updated = Vec::with_capacity(current.len() + 1);
    updated.push(name.to_string());
    updated.extend(current.iter().cloned());
    updated
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    // --- merge_category_names ---

    #[test]
    fn dedups_preserving_first_seen_order() {
        let records = vec![json!({"name": "A"}), json!({"name": "A"}), json!({"name": "B"})];
        assert_eq!(merge_category_names(&records, &[]), strings(&["A", "B"]));
    }

    #[test]
    fn defaults_come_first_even_when_never_observed() {
        let records = vec![json!({"name": "Projek"})];
        let defaults = strings(&["Tugas", "Olahraga", "Kuliah"]);
        assert_eq!(
            merge_category_names(&records, &defaults),
            strings(&["Tugas", "Olahraga", "Kuliah", "Projek"])
        );
    }

    #[test]
    fn observed_duplicate_of_a_default_is_not_repeated() {
        let records = vec![json!("Kuliah"), json!({"name": "Lab"})];
        let defaults = strings(&["Tugas", "Kuliah"]);
        assert_eq!(
            merge_category_names(&records, &defaults),
            strings(&["Tugas", "Kuliah", "Lab"])
        );
    }

    #[test]
    fn unclassifiable_records_are_dropped() {
        let records = vec![json!({}), json!(null), json!({"name": "A"}), json!(3)];
        assert_eq!(merge_category_names(&records, &[]), strings(&["A"]));
    }

    #[test]
    fn mixed_record_shapes_all_contribute() {
        let records = vec![
            json!("Plain"),
            json!({"name": "Named"}),
            json!({"value": {"name": "Nested"}}),
            json!({"value": "{\"name\":\"Embedded\"}"}),
            json!({"value": "Loose"}),
            json!({"type": "deadline"}),
        ];
        assert_eq!(
            merge_category_names(&records, &[]),
            strings(&["Plain", "Named", "Nested", "Embedded", "Loose", "deadline"])
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let records = vec![json!({"name": "A"}), json!("B")];
        let prior = strings(&["Z"]);
        let once = merge_category_names(&records, &prior);
        let twice = merge_category_names(&records, &prior);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_everything_yields_empty() {
        assert!(merge_category_names(&[], &[]).is_empty());
    }

    // --- add_category ---

    #[test]
    fn add_prepends_new_name() {
        let current = strings(&["B", "C"]);
        assert_eq!(add_category("A", &current), strings(&["A", "B", "C"]));
    }

    #[test]
    fn add_existing_name_is_unchanged() {
        let current = strings(&["A", "B"]);
        assert_eq!(add_category("B", &current), current);
    }

    #[test]
    fn add_is_case_sensitive() {
        let current = strings(&["work"]);
        assert_eq!(add_category("Work", &current), strings(&["Work", "work"]));
    }
}
