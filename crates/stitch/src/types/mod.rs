pub mod bundle_output;
