pub mod athlete;
pub mod category;
pub mod training_center;
