//! Pure helper functions shared by the domain types

pub mod numbers;
