/// Opaque confirmation of a mutating operation.
///
/// `affected` is the count the remote reported (`added`, `removed`,
/// `deleted`), when it reported one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    pub affected: Option<u64>,
}
