//! Constant pool for compiled modules.
//!
//! The constant pool stores values referenced by bytecode instructions:
//! numeric literals and the symbol names used as call targets.

use rustc_hash::FxHashMap;

/// Values stored in the constant pool.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// A call target, resolved by name at load time.
    Symbol(String),
}

/// Module-level constant pool with deduplication.
///
/// Shared across all functions in a module to avoid duplicate values.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    /// The actual constants.
    constants: Vec<Constant>,
    /// Deduplication index: maps constant to its index.
    index: FxHashMap<ConstantKey, u32>,
}

/// Key for constant deduplication (hashable version of Constant).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ConstantKey {
    I32(i32),
    I64(i64),
    F32(u32), // Bit pattern for hashing
    F64(u64), // Bit pattern for hashing
    Symbol(String),
}

impl ConstantPool {
    /// Create a new empty constant pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or get existing constant, returns index.
    pub fn add(&mut self, constant: Constant) -> u32 {
        let key = Self::to_key(&constant);

        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }

        let idx = self.constants.len() as u32;
        self.constants.push(constant);
        self.index.insert(key, idx);
        idx
    }

    pub fn add_i32(&mut self, value: i32) -> u32 {
        self.add(Constant::I32(value))
    }

    pub fn add_i64(&mut self, value: i64) -> u32 {
        self.add(Constant::I64(value))
    }

    pub fn add_symbol(&mut self, name: &str) -> u32 {
        self.add(Constant::Symbol(name.to_string()))
    }

    /// Get constant by index.
    pub fn get(&self, index: u32) -> Option<&Constant> {
        self.constants.get(index as usize)
    }

    /// Symbol name at `index`, if that constant is a symbol.
    pub fn symbol(&self, index: u32) -> Option<&str> {
        match self.get(index)? {
            Constant::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    fn to_key(constant: &Constant) -> ConstantKey {
        match constant {
            Constant::I32(v) => ConstantKey::I32(*v),
            Constant::I64(v) => ConstantKey::I64(*v),
            Constant::F32(v) => ConstantKey::F32(v.to_bits()),
            Constant::F64(v) => ConstantKey::F64(v.to_bits()),
            Constant::Symbol(s) => ConstantKey::Symbol(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_is_empty() {
        let pool = ConstantPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn deduplicates_by_value_and_kind() {
        let mut pool = ConstantPool::new();
        let a = pool.add_i32(4);
        let b = pool.add_i32(4);
        let c = pool.add_i64(4);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn symbols() {
        let mut pool = ConstantPool::new();
        let idx = pool.add_symbol("malloc");
        assert_eq!(pool.add_symbol("malloc"), idx);
        assert_eq!(pool.symbol(idx), Some("malloc"));
        let num = pool.add_i32(1);
        assert_eq!(pool.symbol(num), None);
    }

    #[test]
    fn float_keys_use_bit_patterns() {
        let mut pool = ConstantPool::new();
        let pos = pool.add(Constant::F64(0.0));
        let neg = pool.add(Constant::F64(-0.0));
        assert_ne!(pos, neg);
    }
}
