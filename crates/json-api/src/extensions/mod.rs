//! Extension traits for salvo types.

mod depot;

pub(crate) use depot::DepotExt as _;
