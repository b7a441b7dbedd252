pub mod bmf;
pub mod table;

pub use bmf::BmfProvider;
