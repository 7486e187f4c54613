//! Marker types.

/// Marker type describing an entity expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Marker type describing a successful fetch of entities from a remote
/// source.
#[derive(Clone, Copy, Debug)]
pub struct Fetch;
