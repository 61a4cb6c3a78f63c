use std::collections::HashSet;

/// Distinct version strings collected over one run, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl VersionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version; returns false if it was already present
    pub fn insert(&mut self, version: impl Into<String>) -> bool {
        let version = version.into();
        if self.seen.contains(&version) {
            return false;
        }
        self.seen.insert(version.clone());
        self.ordered.push(version);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }
}

impl<S: Into<String>> Extend<S> for VersionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for version in iter {
            self.insert(version);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for VersionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = VersionSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let set: VersionSet = ["1.2.4", "1.2.4", "1.3.0"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), &["1.2.4".to_string(), "1.3.0".to_string()]);
    }

    #[test]
    fn test_insert_reports_novelty() {
        let mut set = VersionSet::new();
        assert!(set.insert("2.0.0"));
        assert!(!set.insert("2.0.0"));
        assert!(set.insert("1.0.0"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["2.0.0", "1.0.0"]);
    }

    #[test]
    fn test_empty() {
        assert!(VersionSet::new().is_empty());
    }
}
