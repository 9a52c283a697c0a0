//! Command implementations for the refalign CLI

pub mod run;
