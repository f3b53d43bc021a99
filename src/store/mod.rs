pub mod id_gen;
pub mod task_store;

pub use id_gen::IdGenerator;
pub use task_store::TaskStore;
