use indexmap::IndexMap;

/// Ordered header set. Keys are unique and keep insertion order.
pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::with_estimate(5)
    }

    pub(crate) fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
        }
    }

    pub(crate) fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.headers.insert(name.into(), value.into());
    }

    pub(crate) fn extend(&mut self, other: HeaderCollection) {
        for (name, value) in other.headers {
            self.headers.insert(name, value);
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

/// Merges `incoming` into `target`, matching names case-insensitively.
///
/// On a collision the incoming value replaces the existing one in place, so the
/// response keeps its original header order and the CORS value wins.
pub fn merge_headers(target: &mut Headers, incoming: &Headers) {
    for (name, value) in incoming {
        match target
            .keys()
            .position(|existing| existing.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                if let Some((_, slot)) = target.get_index_mut(index) {
                    *slot = value.clone();
                }
            }
            None => {
                target.insert(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
