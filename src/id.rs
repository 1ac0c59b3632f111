/// Stable identifier of an interactive node, used as its spatial-index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct InteractionId(pub u32);

impl InteractionId {
    /// Id derived from an explicit label. Equal labels give equal ids.
    pub fn from_label(label: &str) -> Self {
        Self(hash_string(label, 0))
    }

    /// Id of the `index`-th child below a parent whose path hash is `seed`.
    pub fn from_path(index: u32, seed: u32) -> Self {
        Self(hash_number(index, seed))
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl From<&str> for InteractionId {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

pub(crate) fn hash_string(key: &str, seed: u32) -> u32 {
    let mut hash: u32 = seed;
    for b in key.bytes() {
        hash = hash.wrapping_add(b as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash.wrapping_add(1)
}

/// Hash of a child position below `seed`. Chained along a tree path this gives every
/// structural position its own value.
pub(crate) fn hash_number(offset: u32, seed: u32) -> u32 {
    let mut hash = seed;
    hash = hash.wrapping_add(offset.wrapping_add(48));
    hash = hash.wrapping_add(hash << 10);
    hash ^= hash >> 6;
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash.wrapping_add(1)
}
