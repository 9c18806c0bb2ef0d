pub mod calculator;
pub mod panels;
pub mod plot;
