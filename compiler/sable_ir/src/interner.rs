//! Sharded string interner for identifier storage.

use crate::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Per-shard storage for interned strings.
#[derive(Debug)]
struct InternShard {
    /// Map from string content to local index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

impl InternShard {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        }
    }

    fn with_empty() -> Self {
        let mut shard = Self::new();
        // Pre-intern empty string at index 0
        let empty: &'static str = "";
        shard.map.insert(empty, 0);
        shard.strings.push(empty);
        shard
    }
}

/// Sharded string interner.
///
/// Provides O(1) lookup and equality comparison for interned strings.
/// Uses an `RwLock` per shard so a shared handle can be passed to every
/// pipeline stage.
#[derive(Debug)]
pub struct StringInterner {
    shards: [RwLock<InternShard>; Name::NUM_SHARDS],
}

impl StringInterner {
    /// Create a new interner with pre-interned keywords.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            if i == 0 {
                RwLock::new(InternShard::with_empty())
            } else {
                RwLock::new(InternShard::new())
            }
        });

        let interner = Self { shards };
        interner.pre_intern_keywords();
        interner
    }

    /// Compute the shard for a string from a prefix hash.
    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if a shard exceeds its capacity of 2^28 strings.
    pub fn intern(&self, s: &str) -> Name {
        let shard_idx = Self::shard_for(s);
        // shard_idx < NUM_SHARDS (16) by the modulo above
        let shard_idx_u32 = u32::try_from(shard_idx).unwrap_or_else(|_| {
            unreachable!("shard index {shard_idx} cannot exceed u32")
        });
        let shard = &self.shards[shard_idx];

        // Fast path: already interned
        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(s) {
                return Name::new(shard_idx_u32, local);
            }
        }

        let mut guard = shard.write();

        // Re-check under the write lock: another caller may have raced us
        if let Some(&local) = guard.map.get(s) {
            return Name::new(shard_idx_u32, local);
        }

        // Leak the string to get 'static lifetime
        let owned: String = s.to_owned();
        let leaked: &'static str = Box::leak(owned.into_boxed_str());

        let local = u32::try_from(guard.strings.len()).unwrap_or_else(|_| {
            panic!("interner shard {shard_idx} exceeded capacity")
        });
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);

        Name::new(shard_idx_u32, local)
    }

    /// Look up the string for a Name.
    pub fn lookup(&self, name: Name) -> &str {
        let shard = &self.shards[name.shard()];
        let guard = shard.read();
        guard.strings[name.local()]
    }

    /// Pre-intern all Sable keywords and well-known names.
    fn pre_intern_keywords(&self) {
        const KEYWORDS: &[&str] = &[
            // Reserved keywords
            "and", "or", "not", "true", "false", "if", "then", "else",
            "where", "end", "trait", "struct", "impl", "for", "forall",
            "let", "in",
            // Primitive types
            "Int", "Bool", "String",
            // Builtin functions and values
            "print", "println", "read", "string_to_int", "int_to_string",
            "cons", "head", "tail",
        ];

        for kw in KEYWORDS {
            self.intern(kw);
        }
    }

    /// Get the number of interned strings.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().strings.len()).sum()
    }

    /// Check if the interner is empty (only has the empty string).
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clonable interner handle shared by every pipeline stage.
///
/// The lexer, parser, desugarer, checker, dispatcher, and evaluator must
/// all resolve the same `Name`s, so a single interner is created by the
/// driver and handed to each stage through this wrapper.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
