mod source;
mod target;
mod workload;

pub use crate::source::*;
pub use crate::target::*;
pub use crate::workload::*;
