//! Contract invocation surface.
//!
//! Routes named operations with positional string arguments to:
//! - Entry create / read
//! - Vote create / read / hash replacement
//! - Rich vote queries (by poll, by voter, ad hoc selector)
//! - The identity proof gate, ahead of vote creation when configured
//!
//! Every invocation is stateless: all context comes from the arguments and
//! the host's current state.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod operation;
pub mod response;

pub use config::ContractConfig;
pub use dispatcher::Contract;
pub use error::{ContractError, ErrorKind};
pub use operation::Operation;
pub use response::Response;
