mod entity;
mod repository;

pub use entity::Container;
pub use repository::ContainerRepository;
