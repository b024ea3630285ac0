mod todo;

pub use todo::{NewTodo, Todo, TodoId};
