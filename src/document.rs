// src/document.rs
//! Documents: [`Document`], [`DocumentId`], the ambient jar and its stores.

mod ambient;
mod builder;
mod document;
mod page_jar;
mod persistent_jar;
mod store;

pub use ambient::Cookie;
pub use ambient::{AmbientJarHandle, JarStoreHandle};

pub use builder::DocumentBuilder;
pub use document::Document;
pub use document::DocumentId;

pub use page_jar::AmbientJar;
pub use page_jar::PageJar;
pub use persistent_jar::PersistentJar;

pub use store::InMemoryJarStore;
pub use store::JarStore;
pub use store::JsonJarStore;
