pub(crate) mod alpha;
pub(crate) mod paste;
