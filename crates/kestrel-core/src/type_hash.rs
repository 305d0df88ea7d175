//! Deterministic hash-based identities for types and functions.
//!
//! A [`TypeHash`] is computed from a name (types) or a name plus the
//! parameter hashes (functions, constructors, template instances). The same
//! input always yields the same hash, so structurally equal template
//! instantiations such as `Box<int>` share one identity no matter where
//! they are written.
//!
//! ```
//! use kestrel_core::{TypeHash, primitives};
//!
//! assert_eq!(TypeHash::from_name("int"), primitives::INT32);
//!
//! let boxed = TypeHash::from_name("Box");
//! let a = TypeHash::from_template_instance(boxed, &[primitives::INT32]);
//! let b = TypeHash::from_template_instance(boxed, &[primitives::INT32]);
//! assert_eq!(a, b);
//! ```

use std::fmt;

use xxhash_rust::const_xxh64;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants.
pub mod hash_constants {
    /// Separator used when folding argument hashes.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;
    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;
    /// Domain marker for function hashes.
    pub const FUNCTION: u64 = 0x5ea77ffbcdf5f302;
    /// Domain marker for constructor hashes.
    pub const CONSTRUCTOR: u64 = 0x9a7f3d5e2b8c4601;
    /// Domain marker for template parameter hashes.
    pub const TEMPLATE_PARAM: u64 = 0x1a095090689d4647;

    /// Per-position markers so argument order changes the hash.
    pub const PARAM_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
    ];
}

/// A deterministic 64-bit identity for a type, function or constructor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a type name.
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ const_xxh64::xxh64(name.as_bytes(), 0))
    }

    /// Create a function hash from its name and parameter types.
    #[inline]
    pub fn from_function(name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::FUNCTION ^ xxh64(name.as_bytes(), 0);
        TypeHash(fold_ordered(seed, param_hashes))
    }

    /// Create a constructor hash from the owning class and parameter types.
    #[inline]
    pub fn from_constructor(owner: TypeHash, param_hashes: &[TypeHash]) -> Self {
        TypeHash(fold_ordered(hash_constants::CONSTRUCTOR ^ owner.0, param_hashes))
    }

    /// Create a template instance hash from the template and its type arguments.
    ///
    /// Argument order matters: `Pair<int, float>` and `Pair<float, int>` differ.
    #[inline]
    pub fn from_template_instance(template: TypeHash, args: &[TypeHash]) -> Self {
        TypeHash(fold_ordered(template.0, args))
    }

    /// Create the placeholder hash of a template's type parameter.
    #[inline]
    pub fn from_template_param(template: TypeHash, name: &str) -> Self {
        TypeHash(hash_constants::TEMPLATE_PARAM ^ template.0 ^ xxh64(name.as_bytes(), 0))
    }

    /// Check if this is the empty hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

fn fold_ordered(seed: u64, args: &[TypeHash]) -> u64 {
    args.iter().enumerate().fold(seed, |hash, (i, arg)| {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        hash.wrapping_mul(hash_constants::SEP)
            .wrapping_add(marker ^ arg.0)
    })
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Well-known hashes for the primitive types.
pub mod primitives {
    use super::TypeHash;

    pub const VOID: TypeHash = TypeHash::from_name("void");
    pub const BOOL: TypeHash = TypeHash::from_name("bool");
    pub const INT8: TypeHash = TypeHash::from_name("int8");
    pub const INT16: TypeHash = TypeHash::from_name("int16");
    pub const INT32: TypeHash = TypeHash::from_name("int");
    pub const INT64: TypeHash = TypeHash::from_name("int64");
    pub const UINT8: TypeHash = TypeHash::from_name("uint8");
    pub const UINT16: TypeHash = TypeHash::from_name("uint16");
    pub const UINT32: TypeHash = TypeHash::from_name("uint");
    pub const UINT64: TypeHash = TypeHash::from_name("uint64");
    pub const FLOAT: TypeHash = TypeHash::from_name("float");
    pub const DOUBLE: TypeHash = TypeHash::from_name("double");
    /// Pointer-sized unsigned integer; 4 or 8 bytes depending on the target.
    pub const UINTPTR: TypeHash = TypeHash::from_name("uintptr");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_and_runtime_name_hashes_agree() {
        let runtime = TypeHash(hash_constants::TYPE ^ xxh64(b"int", 0));
        assert_eq!(runtime, primitives::INT32);
    }

    #[test]
    fn primitive_hashes_are_distinct() {
        let all = [
            primitives::VOID,
            primitives::BOOL,
            primitives::INT8,
            primitives::INT16,
            primitives::INT32,
            primitives::INT64,
            primitives::UINT8,
            primitives::UINT16,
            primitives::UINT32,
            primitives::UINT64,
            primitives::FLOAT,
            primitives::DOUBLE,
            primitives::UINTPTR,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn template_instance_order_matters() {
        let pair = TypeHash::from_name("Pair");
        let a = TypeHash::from_template_instance(pair, &[primitives::INT32, primitives::FLOAT]);
        let b = TypeHash::from_template_instance(pair, &[primitives::FLOAT, primitives::INT32]);
        assert_ne!(a, b);
    }

    #[test]
    fn constructor_hash_depends_on_owner() {
        let a = TypeHash::from_constructor(TypeHash::from_name("A"), &[primitives::INT32]);
        let b = TypeHash::from_constructor(TypeHash::from_name("B"), &[primitives::INT32]);
        assert_ne!(a, b);
    }

    #[test]
    fn template_params_are_scoped_to_their_template() {
        let t1 = TypeHash::from_template_param(TypeHash::from_name("Box"), "T");
        let t2 = TypeHash::from_template_param(TypeHash::from_name("List"), "T");
        assert_ne!(t1, t2);
    }
}
