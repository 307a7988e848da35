mod value;

pub use value::{
    filters_from_pairs, parse_filter, parse_scalar, row_to_json, value_to_json, value_to_text,
};
