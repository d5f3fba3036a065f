use std::collections::HashMap;

/// `nobelPrizeYear` -> `NOBEL PRIZE YEAR`.
pub fn pretty_header(identifier: &str) -> String {
    let mut spaced = String::with_capacity(identifier.len() + 4);
    for ch in identifier.chars() {
        if ch.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }
    spaced.trim().to_uppercase()
}

/// Memoizes [`pretty_header`] for the duration of one render.
#[derive(Debug, Default)]
pub struct HeaderCache {
    known: HashMap<String, String>,
}

impl HeaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&mut self, identifier: &str) -> String {
        if let Some(header) = self.known.get(identifier) {
            return header.clone();
        }
        let header = pretty_header(identifier);
        self.known.insert(identifier.to_string(), header.clone());
        header
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
