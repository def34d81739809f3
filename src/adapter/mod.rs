//! The two adapter layers between the parser's object graph and the
//! emitters: one for the WSDL contract, one for the schema components.

pub mod contract;
pub mod schema;

pub use contract::{ContractAdapter, PartContent, ResolvedOperation, SoapPort};
pub use schema::{
    class_name_for_element, class_name_for_type, ClassifiedIndex, ClassifiedItem, ItemShape,
    Member, SchemaAdapter, TypeRef,
};
