use std::fmt;

///
/// ErrorTree
///
/// Route-keyed validation error aggregation. Validation passes never fail
/// fast; every problem is collected with the schema route it was found at
/// so callers see the full picture in one pass.
///

#[derive(Clone, Debug, Default)]
pub struct ErrorTree {
    entries: Vec<TreeEntry>,
}

#[derive(Clone, Debug)]
struct TreeEntry {
    route: String,
    message: String,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a problem at the current (empty) route.
    pub fn add(&mut self, message: impl Into<String>) {
        self.add_at("", message);
    }

    /// Record a problem at an explicit route.
    pub fn add_at(&mut self, route: impl Into<String>, message: impl Into<String>) {
        self.entries.push(TreeEntry {
            route: route.into(),
            message: message.into(),
        });
    }

    /// Fold another tree into this one, prefixing its routes.
    pub fn merge(&mut self, prefix: &str, other: Self) {
        for entry in other.entries {
            let route = match (prefix.is_empty(), entry.route.is_empty()) {
                (true, _) => entry.route,
                (false, true) => prefix.to_string(),
                (false, false) => format!("{prefix}.{}", entry.route),
            };
            self.entries.push(TreeEntry {
                route,
                message: entry.message,
            });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ordered `(route, message)` view, primarily for assertions.
    #[must_use]
    pub fn flatten(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.route.as_str(), e.message.as_str()))
            .collect()
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if entry.route.is_empty() {
                write!(f, "{}", entry.message)?;
            } else {
                write!(f, "{}: {}", entry.route, entry.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefixes_routes() {
        let mut inner = ErrorTree::new();
        inner.add("bad id");
        inner.add_at("title", "empty label");

        let mut outer = ErrorTree::new();
        outer.merge("slides", inner);

        assert_eq!(
            outer.flatten(),
            vec![("slides", "bad id"), ("slides.title", "empty label")]
        );
    }

    #[test]
    fn test_result_is_ok_when_empty() {
        assert!(ErrorTree::new().result().is_ok());

        let mut errs = ErrorTree::new();
        errs.add("boom");
        assert_eq!(errs.result().unwrap_err().len(), 1);
    }
}
