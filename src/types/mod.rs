mod byte_order;
mod ordinates;

pub use byte_order::ByteOrder;
pub use ordinates::Ordinates;
