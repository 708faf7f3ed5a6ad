mod component;
mod decision;
mod model;
mod project;
mod zone;

pub use component::{ComponentCommands, EditArgs};
pub use decision::DecisionCommands;
pub use model::ModelCommands;
pub use project::ProjectCommands;
pub use zone::ZoneCommands;
