pub(crate) mod corner;
pub(crate) mod rounded;
