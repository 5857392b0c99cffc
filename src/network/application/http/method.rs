//! Request methods recognised on the request line.

/// An HTTP request method.
///
/// Every method of the table is recognised, but only [`Method::Get`] and
/// [`Method::Post`] are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `TRACE`
    Trace,
    /// `OPTIONS`
    Options,
    /// `CONNECT`
    Connect,
    /// `PATCH`
    Patch,
}

const METHODS: [Method; 9] = [
    Method::Get,
    Method::Head,
    Method::Post,
    Method::Put,
    Method::Delete,
    Method::Trace,
    Method::Options,
    Method::Connect,
    Method::Patch,
];

impl Method {
    /// The method token as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Trace => "TRACE",
            Method::Options => "OPTIONS",
            Method::Connect => "CONNECT",
            Method::Patch => "PATCH",
        }
    }

    /// Match the start of a request line against the method table.
    ///
    /// The token must match exactly (case-sensitive) and be followed by a
    /// space, so `GETX /` does not match `GET`. Returns the method and the
    /// offset of the byte following that space.
    pub fn parse(line: &[u8]) -> Option<(Method, usize)> {
        METHODS.iter().find_map(|method| {
            let token = method.as_str().as_bytes();
            match line.strip_prefix(token) {
                Some([b' ', ..]) => Some((*method, token.len() + 1)),
                _ => None,
            }
        })
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
