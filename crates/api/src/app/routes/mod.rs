pub mod cards;
pub mod system;
