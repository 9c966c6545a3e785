use crate::node::Link;

/// What a path-copying edit did to a subtree. Every variant except
/// `NotFound` carries the rebuilt subtree.
pub(crate) enum Edit<T> {
    /// Nothing matched so nothing was rebuilt. The caller keeps its subtree.
    NotFound,
    /// The subtree was rebuilt holding as many elements as before.
    Replaced(Link<T>),
    /// The subtree was rebuilt with one new element.
    Grown(Link<T>),
    /// The subtree was rebuilt with one element removed.
    Shrunk(Link<T>),
}

impl<T> Edit<T> {
    /// Rebuilds the parent around the edited child, keeping the kind of edit.
    pub(crate) fn map<F>(self, rebuild: F) -> Self
    where
        F: FnOnce(Link<T>) -> Link<T>,
    {
        match self {
            Self::NotFound => Self::NotFound,
            Self::Replaced(link) => Self::Replaced(rebuild(link)),
            Self::Grown(link) => Self::Grown(rebuild(link)),
            Self::Shrunk(link) => Self::Shrunk(rebuild(link)),
        }
    }
}
