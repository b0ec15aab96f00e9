//! 由外键推导模型之间的关联

mod alias;
mod ambiguity;
mod profile;
mod resolver;
mod types;

pub use alias::{AliasNamer, extract_qualifier};
pub use ambiguity::AmbiguityIndex;
pub use profile::{BodyStyle, TargetProfile};
pub use resolver::{AssociationResolver, ResolverSettings};
pub use types::*;

#[cfg(test)]
mod tests;
