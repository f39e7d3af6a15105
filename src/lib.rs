pub mod errors;
pub mod exact;
pub mod graph;
pub mod log;

pub mod prelude {
    pub use super::errors::*;
    pub use super::exact::*;
    pub use super::graph::*;
}

#[cfg(test)]
mod testing;
