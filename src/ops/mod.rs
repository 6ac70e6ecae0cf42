pub mod search;
pub mod sort;
pub mod task_ops;
