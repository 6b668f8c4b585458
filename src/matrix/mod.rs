// Matrix data structures and operations

pub mod arithmetic;
pub mod config;
pub mod parse;
pub mod row_index;
pub mod serialize;
pub mod sparse;
pub mod store;

pub use arithmetic::{add, multiply, multiply_with, subtract};
pub use config::{BoundsPolicy, EngineConfig};
pub use parse::parse_matrix;
pub use row_index::RowIndex;
pub use serialize::write_matrix;
pub use sparse::{Entry, SparseMatrix, Value};
pub use store::SparseStore;
