pub mod plant_save;
pub mod plant_select;

pub use plant_save::PlantSaveApp;
pub use plant_select::PlantSelectApp;
