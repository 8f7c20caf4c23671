pub mod builder;
pub mod corpus;
pub mod defaults;
pub mod runtime;
pub mod traits;
