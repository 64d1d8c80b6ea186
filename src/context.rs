/// Per-request input supplied by the host transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    /// `None` when the client sent no `Origin` header.
    pub origin: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str, origin: Option<&'a str>) -> Self {
        Self { method, origin }
    }
}
