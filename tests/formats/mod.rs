//! Codec tests over the shared fixture map

mod tests_roundtrip;
