pub mod describe;
pub mod infer;
pub mod naming;
pub mod synthesize;

pub use describe::describe;
pub use infer::{MAX_DEPTH, infer_across, infer_type, is_date_string};
pub use naming::{
    interface_name_for, is_array_field_name, to_singular, type_name_from_array_field, unique_name,
};
pub use synthesize::{
    SynthesisOptions, analyze_record, analyze_record_with, analyze_records, clean_record,
};
