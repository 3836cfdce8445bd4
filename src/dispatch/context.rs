//! Per-request data handed to handler methods.

use std::collections::HashMap;
use std::fmt;

use crate::dispatch::error::DispatchError;

/// Query parameters, each name mapped to one or more raw values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` string such as a URI query.
    pub fn parse(raw: &str) -> Self {
        let mut params = Self::new();
        params.extend_from_encoded(raw.as_bytes());
        params
    }

    /// Appends values decoded from a urlencoded byte string.
    pub fn extend_from_encoded(&mut self, raw: &[u8]) {
        for (name, value) in url::form_urlencoded::parse(raw) {
            self.append(name.into_owned(), value.into_owned());
        }
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Builder-style [`append`](Self::append).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The inbound request as seen by the core.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: String,
    /// Absolute request path, context prefix still attached.
    pub path: String,
    pub query: QueryParams,
    headers: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query,
            headers: HashMap::new(),
        }
    }

    /// Shorthand for a GET with the given query.
    pub fn get(path: impl Into<String>, query: QueryParams) -> Self {
        Self::new("GET", path, query)
    }

    /// Header names are stored lowercase.
    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// The outbound response a handler may write to directly.
#[derive(Debug, Clone, Default)]
pub struct ResponseContext {
    body: String,
    headers: Vec<(String, String)>,
}

impl ResponseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) {
        self.body.push_str(text);
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub(crate) fn into_parts(self) -> (String, Vec<(String, String)>) {
        (self.body, self.headers)
    }
}

/// One resolved entry of the per-dispatch argument array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// No value was bound at this position.
    Unbound,
    Text(String),
    Integer(i64),
    Request,
    Response,
}

/// What a handler returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to write beyond what the handler put on the response.
    Void,
    /// Textual representation of the returned value.
    Body(String),
}

impl Reply {
    pub fn body(value: impl fmt::Display) -> Self {
        Reply::Body(value.to_string())
    }
}

/// Positional arguments plus the contexts they may refer to.
pub struct Invocation<'a> {
    args: Vec<Argument>,
    request: &'a RequestContext,
    response: &'a mut ResponseContext,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        args: Vec<Argument>,
        request: &'a RequestContext,
        response: &'a mut ResponseContext,
    ) -> Self {
        Self { args, request, response }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.args.get(index)
    }

    /// Text argument at `index`; fails when unbound or of another kind.
    pub fn text(&self, index: usize) -> Result<&str, DispatchError> {
        match self.slot(index)? {
            Argument::Text(value) => Ok(value),
            other => Err(kind_error(index, "text", other)),
        }
    }

    /// Text argument at `index`, `None` when unbound.
    pub fn optional_text(&self, index: usize) -> Option<&str> {
        match self.args.get(index) {
            Some(Argument::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Integer argument at `index`; fails when unbound or of another kind.
    pub fn integer(&self, index: usize) -> Result<i64, DispatchError> {
        match self.slot(index)? {
            Argument::Integer(value) => Ok(*value),
            other => Err(kind_error(index, "integer", other)),
        }
    }

    /// Request context bound at `index`.
    pub fn request(&self, index: usize) -> Result<&RequestContext, DispatchError> {
        match self.slot(index)? {
            Argument::Request => Ok(self.request),
            other => Err(kind_error(index, "request", other)),
        }
    }

    /// Response context bound at `index`.
    pub fn response(&mut self, index: usize) -> Result<&mut ResponseContext, DispatchError> {
        match self.slot(index)? {
            Argument::Response => {}
            other => return Err(kind_error(index, "response", other)),
        }
        Ok(&mut *self.response)
    }

    fn slot(&self, index: usize) -> Result<&Argument, DispatchError> {
        match self.args.get(index) {
            None | Some(Argument::Unbound) => Err(DispatchError::MissingArgument { index }),
            Some(arg) => Ok(arg),
        }
    }
}

fn kind_error(index: usize, expected: &'static str, found: &Argument) -> DispatchError {
    DispatchError::ArgumentKind {
        index,
        expected,
        found: format!("{:?}", found),
    }
}
