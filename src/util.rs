/// Numeric conversion helpers.
///
/// Safe conversions from integer counts to `f64` that refuse values which
/// would lose precision.
pub mod num;
