//! Ordered-container capabilities accepted by the typed writing operations.
//!
//! The serializer writes elements in exactly the order these traits yield them and
//! never sorts. `BTreeSet`/`BTreeMap` iterate in ascending order, so they produce
//! sorted output; for `Vec`, slices and the other sequence types the caller is
//! responsible for supplying the order it wants to see.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Serialize, Serializer};

/// A collection of values visited in a fixed order.
pub trait OrderedSeq {
    type Item;

    /// Iterate the elements in output order.
    fn ordered_iter(&self) -> impl Iterator<Item = &Self::Item>;
}

/// A collection of key-value pairs visited in a fixed key order.
///
/// Implementors also serialize as a map through serde, so [`crate::write`] renders
/// them exactly like [`crate::write_object`] does.
pub trait OrderedMap {
    type Key;
    type Value;

    /// Iterate the entries in output order.
    fn ordered_iter(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive numeric types that can appear as array elements or object values.
pub trait Number: Serialize + sealed::Sealed {}

macro_rules! impl_number {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}
            impl Number for $t {}
        )*
    };
}

impl_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T> OrderedSeq for BTreeSet<T> {
    type Item = T;
    fn ordered_iter(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> OrderedSeq for [T] {
    type Item = T;
    fn ordered_iter(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, const N: usize> OrderedSeq for [T; N] {
    type Item = T;
    fn ordered_iter(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> OrderedSeq for Vec<T> {
    type Item = T;
    fn ordered_iter(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> OrderedSeq for VecDeque<T> {
    type Item = T;
    fn ordered_iter(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<K, V> OrderedMap for BTreeMap<K, V> {
    type Key = K;
    type Value = V;
    fn ordered_iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

// ------------------------------------------------------------
// Serde views: present an ordered container to the serializer
// as a sequence or a map without copying it.
// ------------------------------------------------------------

/// Serializes an [`OrderedSeq`] as a sequence.
pub(crate) struct SeqView<'a, S: ?Sized>(pub &'a S);

impl<S> Serialize for SeqView<'_, S>
where
    S: OrderedSeq + ?Sized,
    S::Item: Serialize,
{
    fn serialize<Ser: Serializer>(&self, s: Ser) -> Result<Ser::Ok, Ser::Error> {
        s.collect_seq(self.0.ordered_iter())
    }
}

/// Serializes an [`OrderedMap`] with string-like keys as a map.
pub(crate) struct MapView<'a, M: ?Sized>(pub &'a M);

impl<M> Serialize for MapView<'_, M>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: Serialize,
{
    fn serialize<Ser: Serializer>(&self, s: Ser) -> Result<Ser::Ok, Ser::Error> {
        s.collect_map(self.0.ordered_iter().map(|(k, v)| (k.as_ref(), v)))
    }
}

/// Serializes an [`OrderedMap`] whose values are themselves [`OrderedSeq`]s.
pub(crate) struct NestedView<'a, M: ?Sized>(pub &'a M);

impl<M> Serialize for NestedView<'_, M>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: OrderedSeq,
    <M::Value as OrderedSeq>::Item: Serialize,
{
    fn serialize<Ser: Serializer>(&self, s: Ser) -> Result<Ser::Ok, Ser::Error> {
        s.collect_map(
            self.0
                .ordered_iter()
                .map(|(k, v)| (k.as_ref(), SeqView(v))),
        )
    }
}
