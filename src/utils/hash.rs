use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hasher};

pub type FastHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FastHasher>>;
pub type FastHashSet<K> = HashSet<K, BuildHasherDefault<FastHasher>>;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A FNV-1a hasher. It is much faster than the default SipHash for short keys
/// like program and uniform names, but offers no protection against collision
/// attacks.
#[derive(Debug, Clone, Copy)]
pub struct FastHasher(u64);

impl Default for FastHasher {
    #[inline]
    fn default() -> Self {
        FastHasher(FNV_OFFSET_BASIS)
    }
}

impl Hasher for FastHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fnv1a() {
        let mut state = FastHasher::default();
        state.write(b"a");
        assert_eq!(state.finish(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn map() {
        let mut map = FastHashMap::default();
        map.insert("Line2D.vert", 1);
        map.insert("Line2D.frag", 2);
        map.insert("Line2D.vert", 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Line2D.vert"), Some(&3));
    }
}
