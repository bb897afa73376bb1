mod asn;
mod payload;
mod prefix;
mod source;

pub use asn::*;
pub use payload::*;
pub use prefix::*;
pub use source::*;
