mod analysis;
mod issue;
mod repo;
mod scan;

pub use analysis::*;
pub use issue::*;
pub use repo::*;
pub use scan::*;
