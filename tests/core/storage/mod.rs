//! Storage layer tests

mod test_snapshot;
