pub mod config;
pub mod dataset;
pub mod export;
pub mod icons;
pub mod selection;
pub mod state;
pub mod trend;
pub mod view;
