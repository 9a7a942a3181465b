pub mod request;
pub mod task;
pub mod view;

pub use request::{AddTaskRequest, DeleteTaskRequest, Rejection};
pub use task::{Task, TaskStore};
pub use view::{select, Projection, TasksByDate, View, VisibleTask};
