/// Options controlling `DocumentRef::set_with_options`.
///
/// With `merge` set, an existing document object is shallow-merged with the
/// incoming data at the top level; without it, the incoming data fully
/// replaces whatever is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    pub merge: bool,
}

impl SetOptions {
    /// Options performing a shallow top-level merge into the existing document.
    pub fn merge() -> Self {
        SetOptions { merge: true }
    }
}
