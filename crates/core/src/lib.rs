mod dialect;
mod error;
mod handler;
mod setting;
mod statement;
pub mod text;

pub use dialect::{Dialect, LimitPlacement, MergeRequest, same_field};
pub use error::{Error, MappingError, Result, StatementError};
pub use handler::{
    PropertyHandler, PropertyHandlerRegistry, Resolver, SharedHandler, TypeLevelHandlerResolver,
};
pub use setting::DbSetting;
pub use statement::{Order, OrderField, QueryRequest, StatementBuilder};
