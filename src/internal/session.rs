pub mod impl_ops;
pub mod structs;
