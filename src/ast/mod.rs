pub mod builders;
pub mod filter;
pub mod operators;
pub mod rule;
pub mod source;

pub use self::filter::FilterSpec;
pub use self::operators::{Combinator, Operator};
pub use self::rule::CaseRule;
pub use self::source::SourceKind;
