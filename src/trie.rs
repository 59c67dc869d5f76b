//! Symbol-keyed prefix tree with multimap semantics.
//!
//! Every key is stored as the path of its symbols followed by an end edge. The
//! node behind the end edge owns the values added under exactly that key, so a
//! key can be complete and also be the prefix of longer keys.
//!
//! ```text
//! root
//! └─ 'f' ─ 'o' ─ 'o' ─┬─ End  -> [1]          add("foo", 1)
//!                     └─ 'b' ─ End -> [2, 3]  add("foob", 2); add("foob", 3)
//! ```

use crate::error::{GeoTrieError, Result};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

/// A value that can be walked as a sequence of trie symbols.
pub trait TrieKey {
    type Symbol: Eq + Hash;

    fn symbols(&self) -> impl Iterator<Item = Self::Symbol> + '_;

    /// Human readable form used in `KeyNotFound` errors.
    fn describe(&self) -> String;
}

impl TrieKey for str {
    type Symbol = char;

    fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }

    fn describe(&self) -> String {
        self.to_owned()
    }
}

impl TrieKey for String {
    type Symbol = char;

    fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }

    fn describe(&self) -> String {
        self.clone()
    }
}

impl<T: Eq + Hash + Clone + fmt::Debug> TrieKey for [T] {
    type Symbol = T;

    fn symbols(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().cloned()
    }

    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}

impl<T: Eq + Hash + Clone + fmt::Debug> TrieKey for Vec<T> {
    type Symbol = T;

    fn symbols(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().cloned()
    }

    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}

impl<K: TrieKey + ?Sized> TrieKey for &K {
    type Symbol = K::Symbol;

    fn symbols(&self) -> impl Iterator<Item = K::Symbol> + '_ {
        (**self).symbols()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Outgoing edge of a node. `End` terminates a key and never collides with a
/// symbol of the key alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Edge<S> {
    Symbol(S),
    End,
}

#[derive(Debug, Clone)]
struct Node<S, V> {
    values: SmallVec<[V; 1]>,
    children: FxHashMap<Edge<S>, Node<S, V>>,
}

impl<S, V> Default for Node<S, V> {
    fn default() -> Self {
        Self {
            values: SmallVec::new(),
            children: FxHashMap::default(),
        }
    }
}

impl<S: Eq + Hash, V> Node<S, V> {
    /// Returns the child behind `edge`, inserting an empty one if missing.
    fn child_or_insert(&mut self, edge: Edge<S>) -> &mut Self {
        self.children.entry(edge).or_default()
    }

    /// Walks `symbols` plus the end edge, creating nodes along the way.
    fn walk_or_create(&mut self, symbols: impl Iterator<Item = S>) -> &mut Self {
        let mut node = self;
        for symbol in symbols {
            node = node.child_or_insert(Edge::Symbol(symbol));
        }
        node.child_or_insert(Edge::End)
    }

    /// Walks `symbols` (and the end edge if `terminal`) without creating nodes.
    fn walk(&self, symbols: impl Iterator<Item = S>, terminal: bool) -> Option<&Self> {
        let mut node = self;
        for symbol in symbols {
            node = node.children.get(&Edge::Symbol(symbol))?;
        }
        if terminal {
            node = node.children.get(&Edge::End)?;
        }
        Some(node)
    }
}

/// Prefix tree mapping symbol sequences to any number of values.
///
/// Values added under the same key accumulate in insertion order. Nodes are
/// never removed.
///
/// # Examples
///
/// ```rust
/// use geotrie::Trie;
///
/// let mut trie = Trie::new();
/// trie.add("foo", 1);
/// trie.add("foobar", 2);
///
/// assert!(trie.has("foo"));
/// assert!(trie.has_prefix("foob"));
/// assert!(!trie.has("foob"));
/// assert_eq!(trie.values("foo")?, &[1]);
///
/// let mut all: Vec<_> = trie.values_for_prefix("fo")?.copied().collect();
/// all.sort();
/// assert_eq!(all, vec![1, 2]);
/// # Ok::<(), geotrie::GeoTrieError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Trie<S, V> {
    root: Node<S, V>,
}

impl<S, V> Default for Trie<S, V> {
    fn default() -> Self {
        Self {
            root: Node::default(),
        }
    }
}

impl<S: Eq + Hash, V> Trie<S, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values stored under `key`.
    pub fn add<K>(&mut self, key: &K, value: V)
    where
        K: TrieKey<Symbol = S> + ?Sized,
    {
        self.root.walk_or_create(key.symbols()).values.push(value);
    }

    /// Adds every `(key, value)` pair in order.
    pub fn add_many<K, I>(&mut self, pairs: I)
    where
        K: TrieKey<Symbol = S>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.add(&key, value);
        }
    }

    /// Returns `true` if `key` was added as a complete key.
    pub fn has<K>(&self, key: &K) -> bool
    where
        K: TrieKey<Symbol = S> + ?Sized,
    {
        self.root.walk(key.symbols(), true).is_some()
    }

    /// Returns `true` if some added key starts with `key`.
    pub fn has_prefix<K>(&self, key: &K) -> bool
    where
        K: TrieKey<Symbol = S> + ?Sized,
    {
        self.root.walk(key.symbols(), false).is_some()
    }

    /// Values added under exactly `key`, in insertion order.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if `key` was never added as a complete key.
    pub fn values<K>(&self, key: &K) -> Result<&[V]>
    where
        K: TrieKey<Symbol = S> + ?Sized,
    {
        self.root
            .walk(key.symbols(), true)
            .map(|node| node.values.as_slice())
            .ok_or_else(|| key_not_found(key))
    }

    /// Lazily yields every value whose key starts with `key`.
    ///
    /// The walk is depth-first; the order of siblings is unspecified.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if no added key starts with `key`.
    pub fn values_for_prefix<K>(&self, key: &K) -> Result<PrefixValues<'_, S, V>>
    where
        K: TrieKey<Symbol = S> + ?Sized,
    {
        self.root
            .walk(key.symbols(), false)
            .map(PrefixValues::new)
            .ok_or_else(|| key_not_found(key))
    }

    /// Every value in the trie.
    pub fn iter(&self) -> PrefixValues<'_, S, V> {
        PrefixValues::new(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

fn key_not_found<K: TrieKey + ?Sized>(key: &K) -> GeoTrieError {
    GeoTrieError::KeyNotFound {
        key: key.describe(),
    }
}

/// Depth-first iterator over the values of a subtree.
///
/// Driven by an explicit stack of pending nodes, so deep keys cannot overflow
/// the call stack.
pub struct PrefixValues<'a, S, V> {
    stack: Vec<&'a Node<S, V>>,
    current: std::slice::Iter<'a, V>,
}

impl<'a, S, V> PrefixValues<'a, S, V> {
    fn new(start: &'a Node<S, V>) -> Self {
        Self {
            stack: vec![start],
            current: Default::default(),
        }
    }
}

impl<'a, S, V> Iterator for PrefixValues<'a, S, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.current.next() {
                return Some(value);
            }
            let node = self.stack.pop()?;
            self.stack.extend(node.children.values());
            self.current = node.values.iter();
        }
    }
}

impl<S, V> FusedIterator for PrefixValues<'_, S, V> {}

impl<'a, S: Eq + Hash, V> IntoIterator for &'a Trie<S, V> {
    type Item = &'a V;
    type IntoIter = PrefixValues<'a, S, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
