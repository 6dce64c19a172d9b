pub mod errors;
pub mod parameter_set;
pub mod properties;
pub mod task;
pub mod value;

pub use errors::*;
pub use parameter_set::*;
pub use properties::*;
pub use task::*;
pub use value::*;
