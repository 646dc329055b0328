pub mod car;
pub mod fallback;
