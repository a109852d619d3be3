#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod booking;
mod driver;
mod position;
mod settings;
mod telemetry;
mod zone;

pub use booking::*;
pub use driver::*;
pub use position::*;
pub use settings::*;
pub use telemetry::*;
pub use zone::*;
