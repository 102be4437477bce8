pub mod heston;

pub use heston::HestonParams;
