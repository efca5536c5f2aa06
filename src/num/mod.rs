pub mod number;

pub use number::{
    classify_f64, classify_i128, classify_token, classify_u128, classify_u64, Classified,
};
