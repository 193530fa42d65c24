pub mod batch;
pub mod error;
pub mod export;
pub mod mapgen;
pub mod types;

pub use batch::{RandomBatchPlan, generate_random_batch, generate_symmetric_batch};
pub use error::{BatchError, MapGenError};
pub use export::{ExportError, MapRecord, OutputFormat};
pub use mapgen::{
    ConstrainedRandomLayoutGenerator, Layout, MapSet, Orientation, SymmetricLayoutGenerator, Trial,
    manhattan,
};
pub use types::*;
