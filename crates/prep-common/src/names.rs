//! Column name deduplication.

use std::collections::{HashMap, HashSet};

/// Makes names unique by suffixing repeats with `.1`, `.2`, ...
///
/// A suffixed name never reuses a name that is already taken, including
/// one that appeared literally earlier in the input.
///
/// # Examples
///
/// ```
/// use prep_common::unique_names;
///
/// let names = unique_names(["id", "value", "id"].map(String::from));
/// assert_eq!(names, vec!["id", "value", "id.1"]);
///
/// let names = unique_names(["a", "a.1", "a"].map(String::from));
/// assert_eq!(names, vec!["a", "a.1", "a.2"]);
/// ```
pub fn unique_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::new();
    for name in names {
        let name = if taken.contains(&name) {
            let suffix = next_suffix.entry(name.clone()).or_insert(1);
            loop {
                let candidate = format!("{name}.{suffix}");
                *suffix += 1;
                if !taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            name
        };
        taken.insert(name.clone());
        unique.push(name);
    }
    unique
}
