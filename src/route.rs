//! Resolution of a method and path into a typed route.

use crate::error::Error;

use axum::http::Method;

/// Resource a path points at.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResourceKind {
    /// `/items`
    Items,
    /// `/users`
    Users,
}

impl ResourceKind {
    /// Path segment of the resource.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Users => "users",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "items" => Some(Self::Items),
            "users" => Some(Self::Users),
            _ => None,
        }
    }
}

/// Operation requested on a resource.
///
/// The id carried by write actions is the one found in the path, if any; the
/// authoritative key of creates and updates comes from the body.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    /// `GET /{resource}`
    List,
    /// `GET /{resource}/{id}`
    Get(String),
    /// `POST /{resource}[/{id}]`
    Create(Option<String>),
    /// `PUT /{resource}[/{id}]`
    Replace(Option<String>),
    /// `PATCH /{resource}[/{id}]`
    Patch(Option<String>),
    /// `DELETE /{resource}[/{id}]`
    Delete(Option<String>),
}

/// A resolved request target.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Route {
    /// Resource the request targets.
    pub resource: ResourceKind,
    /// Operation to run on it.
    pub action: Action,
}

impl Route {
    /// Match `method` and `path` against the route table.
    ///
    /// A trailing slash is ignored and at most one id segment is accepted. The
    /// id is percent-decoded after the path is split, so `%2F` stays inside it.
    ///
    /// ```rust
    /// use axum::http::Method;
    /// use dynamodb_rest::route::{Action, ResourceKind, Route};
    ///
    /// let route = Route::resolve(&Method::GET, "/items/i1").unwrap();
    /// assert_eq!(route.resource, ResourceKind::Items);
    /// assert_eq!(route.action, Action::Get("i1".to_string()));
    /// ```
    pub fn resolve(method: &Method, path: &str) -> Result<Self, Error> {
        let path = path.strip_suffix('/').unwrap_or(path);
        let mut segments = path.strip_prefix('/').ok_or(Error::RouteNotFound)?.split('/');
        let resource = segments
            .next()
            .and_then(ResourceKind::from_segment)
            .ok_or(Error::RouteNotFound)?;
        let id = match (segments.next(), segments.next()) {
            (None, _) => None,
            (Some(id), None) if !id.is_empty() => Some(urlencoding::decode(id)?.into_owned()),
            _ => return Err(Error::RouteNotFound),
        };
        let action = match *method {
            Method::GET => match id {
                Some(id) => Action::Get(id),
                None => Action::List,
            },
            Method::POST => Action::Create(id),
            Method::PUT => Action::Replace(id),
            Method::PATCH => Action::Patch(id),
            Method::DELETE => Action::Delete(id),
            _ => return Err(Error::MethodNotAllowed(resource.segment())),
        };
        Ok(Self { resource, action })
    }
}
