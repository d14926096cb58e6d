pub mod resolver;

pub use resolver::TemplateResolver;
