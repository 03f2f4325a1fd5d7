pub mod app;
pub mod apps;
pub mod command;
pub mod multi_runtime;
pub mod resource;
pub mod runtime;
pub mod subscription;
pub mod theme;

pub use app::{App, AppContext};
pub use command::{AppId, Command, Event};
pub use multi_runtime::MultiAppRuntime;
pub use resource::Resource;
pub use runtime::Runtime;
pub use subscription::Subscription;
pub use theme::{Theme, ThemeVariant};
