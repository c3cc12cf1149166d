mod controllers;
pub use controllers::ControllerManagerOptions;

mod master;
pub use master::{ApiOptions, MasterOptions};
