// File: crates/stream-core/src/selector.rs
// Summary: Searchable location dropdown model.

/// Location shown before the user picks one.
pub const DEFAULT_LOCATION: &str = "Japan";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationSelector {
    options: Vec<String>,
    query: String,
    value: String,
}

impl LocationSelector {
    /// `options` are expected sorted and distinct (see `record::distinct_locations`).
    /// The initial value is kept even when it is not among the options.
    pub fn new(options: Vec<String>, value: impl Into<String>) -> Self {
        Self { options, query: String::new(), value: value.into() }
    }

    pub fn options(&self) -> &[String] { &self.options }
    pub fn value(&self) -> &str { &self.value }
    pub fn query(&self) -> &str { &self.query }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_query(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
    }

    /// Options containing the query, case-insensitively.
    pub fn matches(&self) -> Vec<&str> {
        let q = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|o| q.is_empty() || o.to_lowercase().contains(&q))
            .map(String::as_str)
            .collect()
    }

    /// Select `value`; returns true when the selection changed.
    pub fn select(&mut self, value: &str) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value.to_owned();
        true
    }

    /// Step through the current matches (wrapping); returns the new value when it changed.
    pub fn step(&mut self, forward: bool) -> Option<&str> {
        let matches = self.matches();
        if matches.is_empty() {
            return None;
        }
        let n = matches.len();
        let next = match matches.iter().position(|m| *m == self.value) {
            Some(i) if forward => (i + 1) % n,
            Some(i) => (i + n - 1) % n,
            None => 0,
        };
        let picked = matches[next].to_owned();
        if self.select(&picked) { Some(self.value.as_str()) } else { None }
    }
}
