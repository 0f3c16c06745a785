/// Types for transaction requests
pub mod request;
mod r#type;

pub use self::{
    request::Request,
    r#type::{TransactionType, UnknownTransactionType},
};
