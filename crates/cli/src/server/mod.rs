pub mod lookup;
pub mod stdio;

pub use lookup::run_lookups;
pub use stdio::serve_stdio;
