//! Route classification for the squirrel collection
//!
//! Classifies every request into exactly one outcome through an ordered
//! gate chain: method support, then path shape, then method/shape
//! compatibility. Unsupported verbs answer 501 before any path
//! inspection, so `PATCH /anything/at/all` is never a 404. A supported
//! verb on the wrong shape is indistinguishable on the wire from an
//! unknown path: both are 404.

use hyper::Method;

/// Shape of a request path after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape<'a> {
    /// Exactly `/squirrels`
    Collection,
    /// Exactly `/squirrels/<token>` with a non-empty token
    Item(&'a str),
    /// Anything else: empty token, nested segments, different root
    Unrecognized,
}

/// Store operation selected for a request that passed every gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    ListAll,
    GetOne(&'a str),
    Create,
    Update(&'a str),
    Delete(&'a str),
}

/// Terminal classification of a (method, path) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'a> {
    /// Run the selected store operation
    Dispatch(Action<'a>),
    /// Verb outside {GET, POST, PUT, DELETE}: 501
    UnsupportedMethod,
    /// Unknown path, or a supported verb on the wrong shape: 404
    RouteNotFound,
}

/// Classify a request path into one of the three recognized shapes
pub fn classify_path(path: &str) -> PathShape<'_> {
    let Some(rest) = path.strip_prefix('/') else {
        return PathShape::Unrecognized;
    };

    let mut segments = rest.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("squirrels"), None, _) => PathShape::Collection,
        (Some("squirrels"), Some(token), None) if !token.is_empty() => PathShape::Item(token),
        _ => PathShape::Unrecognized,
    }
}

/// Resolve a (method, path) pair to a terminal decision
///
/// The method-support gate runs first: an unsupported verb is 501 even
/// when the path would not have matched anything.
pub fn resolve<'a>(method: &Method, path: &'a str) -> Decision<'a> {
    if !is_supported_method(method) {
        return Decision::UnsupportedMethod;
    }

    match (method, classify_path(path)) {
        (&Method::GET, PathShape::Collection) => Decision::Dispatch(Action::ListAll),
        (&Method::GET, PathShape::Item(token)) => Decision::Dispatch(Action::GetOne(token)),
        (&Method::POST, PathShape::Collection) => Decision::Dispatch(Action::Create),
        (&Method::PUT, PathShape::Item(token)) => Decision::Dispatch(Action::Update(token)),
        (&Method::DELETE, PathShape::Item(token)) => Decision::Dispatch(Action::Delete(token)),
        _ => Decision::RouteNotFound,
    }
}

fn is_supported_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::POST | Method::PUT | Method::DELETE
    )
}
