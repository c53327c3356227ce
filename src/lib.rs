pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;

pub use client::{DetectorClient, ProductDescriptor};
pub use config::{Config, ConfigOverrides};
pub use error::{Error, Result, TransportKind};
pub use server::Server;
pub use tools::{DetectStripeTool, FilterProductsTool};
