pub mod dbs;
pub mod error;
pub mod memory;
pub mod models;
pub mod trait_client;

pub use error::PersistError;
pub use memory::InMemoryTodoStore;
pub use models::{NewTodo, Todo, TodoId};
pub use trait_client::TodoStore;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoTodoStore;
